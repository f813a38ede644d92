use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::missions::{record_completion, STEP_TAR};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use missions_core::check_tarball;
use std::sync::Arc;
use utoipa::ToSchema;

use super::tar_status::TarMissionState;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TarUploadRequest {
    #[schema(value_type = String, format = Binary)]
    pub tarfile: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/missions/tar/upload",
    tag = "missions",
    request_body(content_type = "multipart/form-data", content = TarUploadRequest),
    responses(
        (status = 200, description = "Mission state after checking the tarball", body = TarMissionState),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn tar_upload(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let data = match super::read_file_field(&mut multipart, "tarfile").await {
        Ok(data) => data,
        Err(response) => return response,
    };

    let mut conn = get_conn!(pool);

    let check = check_tarball(&data);
    if check.is_ok() {
        if let Err(e) = record_completion(&mut conn, user.id, STEP_TAR) {
            tracing::error!("Failed to record tar completion: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to record completion".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut state = match TarMissionState::for_user(&mut conn, user.id) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to load tar mission state: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load mission state".to_string(),
                }),
            )
                .into_response();
        }
    };

    match check {
        Ok(()) => state.create_success = true,
        Err(e) => state.what_was_wrong_with_the_tarball = e.to_string(),
    }

    (StatusCode::OK, Json(state)).into_response()
}
