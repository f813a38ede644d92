use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::missions::completed_step_names;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissionsStatusResponse {
    /// Step name -> true, for every step the user has completed.
    pub completed_missions: BTreeMap<String, bool>,
}

#[utoipa::path(
    get,
    path = "/api/missions",
    tag = "missions",
    responses(
        (status = 200, description = "Steps the current user has completed", body = MissionsStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn missions_status(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let names = match completed_step_names(&mut conn, user.id) {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Failed to load completed steps: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load mission status".to_string(),
                }),
            )
                .into_response();
        }
    };

    let completed_missions = names.into_iter().map(|name| (name, true)).collect();

    (
        StatusCode::OK,
        Json(MissionsStatusResponse { completed_missions }),
    )
        .into_response()
}
