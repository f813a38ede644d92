use axum::response::IntoResponse;
use missions_core::tar_unpack;

#[utoipa::path(
    get,
    path = "/api/missions/tar/unpack/tarball",
    tag = "missions",
    responses(
        (status = 200, description = "The tarball to extract, as a download", content_type = "application/octet-stream")
    )
)]
pub async fn tarball_download() -> impl IntoResponse {
    super::attachment_response(tar_unpack::TARBALL_NAME, tar_unpack::tarball_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn serves_the_reference_tarball() {
        let response = tarball_download().await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename={}", tar_unpack::TARBALL_NAME)
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], tar_unpack::tarball_bytes());
    }
}
