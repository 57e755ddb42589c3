//! Document Chat - Model (API functions)

use crate::shared::api_utils::{api_url, decode_reply, ApiError};
use contracts::domain::a002_document_chat::aggregate::{ChatReply, ChatRequest, CHAT_PATH};
use gloo_net::http::Request;

/// Ask a question about the most recently uploaded document
pub async fn ask_question(api_base: &str, message: String) -> Result<ChatReply, ApiError> {
    let request = ChatRequest { message };

    let response = Request::post(&api_url(api_base, CHAT_PATH))
        .json(&request)?
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    decode_reply(status, &body)
}
