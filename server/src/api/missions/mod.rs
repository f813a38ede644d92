pub mod extract_upload;
pub mod status;
pub mod tar_file_download;
pub mod tar_status;
pub mod tar_upload;
pub mod tarball_download;

use crate::api::ErrorResponse;
use crate::AppState;
use axum::body::{Body, Bytes};
use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

/// Maximum accepted size for uploaded mission submissions.
pub const MAX_UPLOAD_SIZE: usize = 2 * 1024 * 1024;

/// Returns the router for authenticated mission endpoints (mounted at /api/missions)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(status::missions_status))
        .route("/tar", get(tar_status::tar_mission))
        .route("/tar/upload", post(tar_upload::tar_upload))
        .route("/tar/unpack/upload", post(extract_upload::extract_upload))
}

/// Returns the router for the mission download endpoints, which are public:
/// fetching the files to pack must work before the user has signed up.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/missions/tar/files/{name}",
            get(tar_file_download::tar_file_download),
        )
        .route(
            "/api/missions/tar/unpack/tarball",
            get(tarball_download::tarball_download),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        status::missions_status,
        tar_status::tar_mission,
        tar_upload::tar_upload,
        tar_file_download::tar_file_download,
        tarball_download::tarball_download,
        extract_upload::extract_upload,
    ),
    components(schemas(
        status::MissionsStatusResponse,
        tar_status::TarMissionState,
        tar_upload::TarUploadRequest,
        extract_upload::ExtractUploadRequest,
    ))
)]
pub struct ApiDoc;

/// Serve raw bytes as a browser download.
fn attachment_response(name: &str, data: &'static [u8]) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={name}"),
        )
        .body(Body::from(data))
        .unwrap()
}

/// Pull the named file field out of a multipart body, skipping any other
/// fields. On failure the caller gets a ready-to-send error response.
async fn read_file_field(multipart: &mut Multipart, field_name: &str) -> Result<Bytes, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("No \"{field_name}\" file provided"),
                    }),
                )
                    .into_response())
            }
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                let error = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    format!("File too large. Maximum size is {MAX_UPLOAD_SIZE} bytes")
                } else {
                    format!("Failed to read multipart data: {}", e.body_text())
                };
                return Err((e.status(), Json(ErrorResponse { error })).into_response());
            }
        };

        if field.name() != Some(field_name) {
            continue;
        }

        return match field.bytes().await {
            Ok(bytes) if bytes.len() > MAX_UPLOAD_SIZE => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("File too large. Maximum size is {MAX_UPLOAD_SIZE} bytes"),
                }),
            )
                .into_response()),
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::warn!("Field read error: {}", e);
                let error = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    format!("File too large. Maximum size is {MAX_UPLOAD_SIZE} bytes")
                } else {
                    format!("Failed to read file data: {}", e.body_text())
                };
                Err((e.status(), Json(ErrorResponse { error })).into_response())
            }
        };
    }
}
