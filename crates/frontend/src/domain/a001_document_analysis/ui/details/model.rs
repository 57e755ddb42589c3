//! Document Analysis - Model (API functions)

use crate::shared::api_utils::{api_url, decode_reply, ApiError};
use contracts::domain::a001_document_analysis::aggregate::{
    DocumentAnalysis, UPLOAD_FIELD, UPLOAD_PATH,
};
use gloo_net::http::Request;
use web_sys::FormData;

/// Send a document for analysis (multipart, single `file` field)
pub async fn upload_document(
    api_base: &str,
    file: &web_sys::File,
) -> Result<DocumentAnalysis, ApiError> {
    let form_data = FormData::new().map_err(|e| ApiError::Transport(format!("{e:?}")))?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(|e| ApiError::Transport(format!("{e:?}")))?;

    let response = Request::post(&api_url(api_base, UPLOAD_PATH))
        .body(form_data)?
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    decode_reply(status, &body)
}
