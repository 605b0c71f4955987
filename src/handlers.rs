use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::chat_payload::ChatPayload;
use crate::chat_response::ChatResponse;
use crate::doc_service::DocServiceClient;
use crate::llm_service::LlmService;
use crate::prompt;

pub struct AppState {
    pub doc_service: DocServiceClient,
    pub llm: LlmService,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorBody>);

fn bad_request(error: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: error.to_string(),
            details: None,
        }),
    )
}

fn upstream_error(error: &str, details: String) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: error.to_string(),
            details: Some(details),
        }),
    )
}

/// API routes. Static file serving and CORS are layered on in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Upload transfers carry no size cap at this layer; the document
        // service decides what it accepts. Chat keeps the default body limit.
        .route(
            "/upload",
            post(handle_upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/chat", post(handle_chat))
        .with_state(state)
}

/// Writes the uploaded bytes to a uniquely named temp file. The file is
/// removed when the returned guard is dropped.
fn spool_upload(bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(bytes)?;
    Ok(file)
}

pub async fn handle_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, HandlerError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field.bytes().await.map_err(|e| bad_request(&e.to_string()))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(bad_request("No file uploaded"));
    };

    let spooled = spool_upload(&bytes)
        .map_err(|e| upstream_error("Failed to forward to document service", e.to_string()))?;

    // The spooled copy is removed when `spooled` drops, on both branches.
    match state.doc_service.forward_upload(spooled.path(), &filename).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            log::error!("Upload error: {}", e);
            Err(upstream_error(
                "Failed to forward to document service",
                e.to_string(),
            ))
        }
    }
}

pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let (session_id, question) = match (payload.session_id.as_deref(), payload.question.as_deref())
    {
        (Some(s), Some(q)) if !s.is_empty() && !q.is_empty() => (s, q),
        _ => return Err(bad_request("session_id and question are required")),
    };

    let chunks = match state.doc_service.query(session_id, question).await {
        Ok(chunks) => chunks,
        Err(e) => {
            log::error!("Chat error: {}", e);
            // Retrieval and completion failures share one error shape on purpose.
            return Err(upstream_error("Chat failed", e.to_string()));
        }
    };

    let user_prompt = prompt::compose_prompt(&chunks, question);
    match state.llm.complete(prompt::SYSTEM_ROLE_MESSAGE, &user_prompt).await {
        Ok(answer) => Ok(Json(ChatResponse { answer })),
        Err(e) => {
            log::error!("Chat error: {}", e);
            Err(upstream_error("Chat failed", e.to_string()))
        }
    }
}
