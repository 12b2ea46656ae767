use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use pressbox_index::ChunkIndex;
use pressbox_llm::LlmProvider;

use crate::error::ApiError;
use crate::server::AppState;
use crate::session::DocumentSession;

#[derive(serde::Deserialize)]
pub(crate) struct ChatRequest {
    pub question: String,
}

#[derive(serde::Serialize)]
struct ChatResponse {
    answer: String,
}

#[derive(serde::Serialize)]
struct UploadResponse {
    article: String,
    star_performers: Vec<String>,
}

#[derive(serde::Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

/// Process an uploaded match PDF: extract text, chunk it, build the
/// embedding index, generate the article, and only then swap the new
/// session in. A failure at any step leaves the previous session intact.
pub(crate) async fn upload_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read file field: {e}")))?;
            file_bytes = Some(data.to_vec());
            break;
        }
    }

    let bytes = file_bytes
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::BadRequest("no file uploaded (expected field 'file')".into()))?;

    let document = state.pipeline.extractor.extract(bytes).await?;
    let chunks = state.pipeline.splitter.split(&document.content);
    let index = ChunkIndex::build(state.provider.as_ref(), &chunks).await?;
    let article = state
        .pipeline
        .article
        .generate(state.provider.as_ref(), &document.content)
        .await?;

    tracing::info!(
        chunks = chunks.len(),
        performers = article.star_performers.len(),
        "document processed"
    );

    let response = UploadResponse {
        article: article.body.clone(),
        star_performers: article.star_performers.clone(),
    };
    let session = DocumentSession {
        text: document.content,
        index,
        article,
    };
    *state.sessions.write().await = Some(session);

    Ok(Json(response))
}

pub(crate) async fn chat_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".into()));
    }

    let guard = state.sessions.read().await;
    let session = guard.as_ref().ok_or(ApiError::NoActiveSession)?;

    let answer = state
        .pipeline
        .chat
        .answer(state.provider.as_ref(), &session.index, question)
        .await?;

    Ok(Json(ChatResponse { answer }))
}

pub(crate) async fn clear_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
) -> impl IntoResponse {
    *state.sessions.write().await = None;
    tracing::info!("session cleared");
    Json(StatusResponse { status: "cleared" })
}

pub(crate) async fn health_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
