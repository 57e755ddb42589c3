use async_trait::async_trait;
use contracts::domain::a001_document_analysis::aggregate::DocumentAnalysis;
use contracts::domain::a002_document_chat::aggregate::ChatReply;

use crate::domain::a001_document_analysis::ui::details::model::upload_document;
use crate::domain::a002_document_chat::ui::details::model::ask_question;
use crate::shared::api_utils::ApiError;
use crate::shared::validation::SelectedFile;

/// The two remote operations the session drives.
#[async_trait(?Send)]
pub trait AnalysisApi: 'static {
    type File: SelectedFile;

    /// `POST /` with the document as multipart field `file`
    async fn upload(&self, file: Self::File) -> Result<DocumentAnalysis, ApiError>;

    /// `POST /chat` with `{"message": ...}`
    async fn ask(&self, message: String) -> Result<ChatReply, ApiError>;
}

/// Browser implementation over `fetch`
#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    api_base: String,
}

impl HttpAnalysisApi {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

#[async_trait(?Send)]
impl AnalysisApi for HttpAnalysisApi {
    type File = web_sys::File;

    async fn upload(&self, file: web_sys::File) -> Result<DocumentAnalysis, ApiError> {
        upload_document(&self.api_base, &file).await
    }

    async fn ask(&self, message: String) -> Result<ChatReply, ApiError> {
        ask_question(&self.api_base, message).await
    }
}
