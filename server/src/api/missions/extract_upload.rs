use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::missions::{record_completion, STEP_TAR_EXTRACT};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use missions_core::tar_unpack;
use std::sync::Arc;
use utoipa::ToSchema;

use super::tar_status::TarMissionState;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ExtractUploadRequest {
    #[schema(value_type = String, format = Binary)]
    pub extracted_file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/missions/tar/unpack/upload",
    tag = "missions",
    request_body(content_type = "multipart/form-data", content = ExtractUploadRequest),
    responses(
        (status = 200, description = "Mission state after checking the extracted file", body = TarMissionState),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn extract_upload(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let data = match super::read_file_field(&mut multipart, "extracted_file").await {
        Ok(data) => data,
        Err(response) => return response,
    };

    let mut conn = get_conn!(pool);

    let correct = data.as_ref() == tar_unpack::contents_we_want();
    if correct {
        if let Err(e) = record_completion(&mut conn, user.id, STEP_TAR_EXTRACT) {
            tracing::error!("Failed to record extract completion: {}", e);
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

    if correct {
        state.unpack_success = true;
    } else {
        state.what_was_wrong_with_the_extracted_file =
            "The uploaded file does not have the correct contents.".to_string();
    }

    (StatusCode::OK, Json(state)).into_response()
}
