use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};

/// Multipart field carrying the food photo.
pub const IMAGE_FIELD: &str = "image";

/// Pull the first `image` file part out of a multipart body.
///
/// Parts with another name, or without a file name (a plain text field, or a
/// browser form submitted with no file chosen), are skipped.
pub async fn read_image_field(
    mut multipart: Multipart,
) -> Result<Option<(String, Bytes)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                log::debug!("Skipping '{}' part without a file name", IMAGE_FIELD);
                continue;
            }
        };

        let bytes = field.bytes().await?;
        return Ok(Some((file_name, bytes)));
    }

    Ok(None)
}

pub mod server {
    use super::*;
    use axum::{
        extract::{multipart::MultipartRejection, DefaultBodyLimit, State},
        http::StatusCode,
        response::{Html, IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use std::sync::Arc;

    use crate::handlers::UploadHandler;
    use crate::models::{CaloriesResponse, ErrorResponse};

    const NO_FILE_UPLOADED: &str = "No file uploaded";

    pub struct AppState {
        pub upload_handler: Arc<UploadHandler>,
    }

    /// `max_upload_bytes = None` lifts axum's default request body cap.
    pub fn create_router(handler: Arc<UploadHandler>, max_upload_bytes: Option<usize>) -> Router {
        let state = Arc::new(AppState {
            upload_handler: handler,
        });

        let body_limit = match max_upload_bytes {
            Some(limit) => DefaultBodyLimit::max(limit),
            None => DefaultBodyLimit::disable(),
        };

        Router::new()
            .route("/", get(index_handler))
            .route("/upload", post(upload_handler))
            .route("/health", get(health_check))
            .layer(body_limit)
            .with_state(state)
    }

    async fn index_handler() -> Html<&'static str> {
        log::debug!("Rendering index.html");
        Html(include_str!("../static/index.html"))
    }

    async fn upload_handler(
        State(state): State<Arc<AppState>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Response {
        let multipart = match multipart {
            Ok(multipart) => multipart,
            Err(e) => {
                log::warn!("⚠️ Upload is not a multipart request: {}", e);
                return error_response(StatusCode::BAD_REQUEST, NO_FILE_UPLOADED);
            }
        };

        let (file_name, bytes) = match read_image_field(multipart).await {
            Ok(Some(upload)) => upload,
            Ok(None) => {
                log::warn!("⚠️ Upload request without '{}' file", IMAGE_FIELD);
                return error_response(StatusCode::BAD_REQUEST, NO_FILE_UPLOADED);
            }
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                log::warn!("⚠️ Upload rejected: {}", e);
                return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Uploaded file is too large");
            }
            Err(e) => {
                log::warn!("⚠️ Malformed multipart body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, NO_FILE_UPLOADED);
            }
        };

        match state.upload_handler.handle(&file_name, &bytes).await {
            Ok(calories) => (StatusCode::OK, Json(CaloriesResponse { calories })).into_response(),
            Err(e) => {
                log::error!("❌ Upload processing error: {:#}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store uploaded file")
            }
        }
    }

    fn error_response(status: StatusCode, message: &str) -> Response {
        (status, Json(ErrorResponse::new(message))).into_response()
    }

    async fn health_check() -> &'static str {
        "OK"
    }
}
