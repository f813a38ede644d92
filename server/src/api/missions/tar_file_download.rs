use crate::api::ErrorResponse;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use missions_core::tar_create;

#[utoipa::path(
    get,
    path = "/api/missions/tar/files/{name}",
    tag = "missions",
    params(
        ("name" = String, Path, description = "Name of the mission file to download")
    ),
    responses(
        (status = 200, description = "File contents as a download", content_type = "application/octet-stream"),
        (status = 404, description = "No mission file with that name", body = ErrorResponse)
    )
)]
pub async fn tar_file_download(Path(name): Path<String>) -> impl IntoResponse {
    match tar_create::file_bytes(&name) {
        Some(bytes) => super::attachment_response(&name, bytes).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No mission file named \"{name}\""),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;

    #[tokio::test]
    async fn serves_known_files_as_attachments() {
        let response = tar_file_download(Path("hello.c".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=hello.c"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], tar_create::file_bytes("hello.c").unwrap());
    }

    #[tokio::test]
    async fn unknown_name_is_a_404() {
        let response = tar_file_download(Path("passwd".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn every_listed_filename_is_downloadable() {
        for name in tar_create::filenames() {
            let response = tar_file_download(Path(name.clone())).await.into_response();
            assert_eq!(response.status(), StatusCode::OK, "missing file {name}");
        }
    }
}
