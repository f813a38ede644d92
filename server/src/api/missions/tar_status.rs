use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::missions::{mission_completed, STEP_TAR, STEP_TAR_EXTRACT};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::PgConnection;
use missions_core::{tar_create, tar_unpack};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Everything the tar mission page needs in one payload: fixture listings,
/// the outcome of the submission being responded to (if any), and whether
/// each half of the mission has ever been completed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TarMissionState {
    pub create_success: bool,
    pub what_was_wrong_with_the_tarball: String,
    pub filenames_for_tarball: Vec<String>,
    pub unpack_success: bool,
    pub what_was_wrong_with_the_extracted_file: String,
    pub tarball_for_unpacking_mission: String,
    pub file_we_want: String,
    pub create_done: bool,
    pub unpack_done: bool,
}

impl TarMissionState {
    /// Default state for a user. Upload handlers override the per-submission
    /// fields before responding.
    pub fn for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Self, diesel::result::Error> {
        Ok(Self {
            create_success: false,
            what_was_wrong_with_the_tarball: String::new(),
            filenames_for_tarball: tar_create::filenames(),
            unpack_success: false,
            what_was_wrong_with_the_extracted_file: String::new(),
            tarball_for_unpacking_mission: tar_unpack::TARBALL_NAME.to_string(),
            file_we_want: tar_unpack::FILE_WE_WANT.to_string(),
            create_done: mission_completed(conn, user_id, STEP_TAR)?,
            unpack_done: mission_completed(conn, user_id, STEP_TAR_EXTRACT)?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/missions/tar",
    tag = "missions",
    responses(
        (status = 200, description = "Current tar mission state", body = TarMissionState),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn tar_mission(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match TarMissionState::for_user(&mut conn, user.id) {
        Ok(state) => (StatusCode::OK, Json(state)).into_response(),
        Err(e) => {
            tracing::error!("Failed to load tar mission state: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load mission state".to_string(),
                }),
            )
                .into_response()
        }
    }
}
