use crate::upload::types::{SelectedFile, UploadSession};
use crate::upload::UploadError;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// Multipart field every selected file is attached under.
pub const FILES_FIELD: &str = "files";

#[derive(Clone)]
pub struct UploadClient {
    api_base: String,
    client: reqwest::Client,
}

impl UploadClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload/", self.api_base)
    }

    pub fn delete_url(&self, file_id: &str) -> String {
        format!("{}/files/{}/delete/", self.api_base, file_id)
    }

    pub fn sessions_url(&self) -> String {
        format!("{}/sessions/", self.api_base)
    }

    pub fn session_url(&self, session_id: &str) -> String {
        format!("{}/sessions/{}/", self.api_base, session_id)
    }

    /// Posts every file in one multipart request and returns the raw body.
    ///
    /// The body is handed back as text so the caller decides how a
    /// malformed payload is treated.
    pub async fn upload(&self, files: &[SelectedFile]) -> Result<String, UploadError> {
        let form = Self::build_form(files).await?;
        let url = self.upload_url();
        info!("Uploading {} file(s) to {}", files.len(), url);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upload rejected with status {}", status);
            return Err(UploadError::Status(status));
        }

        let text = response.text().await?;
        debug!("Upload response text: {}", text);
        Ok(text)
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<(), UploadError> {
        let url = self.delete_url(file_id);
        info!("Deleting uploaded file {}", file_id);

        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!("Delete of {} failed with status {}", file_id, status);
            Err(UploadError::Status(status))
        }
    }

    /// Every stored session, newest first as the server orders them.
    pub async fn list_sessions(&self) -> Result<Vec<UploadSession>, UploadError> {
        let text = self.get_text(&self.sessions_url()).await?;
        serde_json::from_str(&text).map_err(UploadError::InvalidResponse)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<UploadSession, UploadError> {
        let text = self.get_text(&self.session_url(session_id)).await?;
        serde_json::from_str(&text).map_err(UploadError::InvalidResponse)
    }

    async fn get_text(&self, url: &str) -> Result<String, UploadError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} failed with status {}", url, status);
            return Err(UploadError::Status(status));
        }

        Ok(response.text().await?)
    }

    async fn build_form(files: &[SelectedFile]) -> Result<Form, UploadError> {
        let mut form = Form::new();

        for file in files {
            let data = tokio::fs::read(&file.path)
                .await
                .map_err(|source| UploadError::ReadFile {
                    path: file.path.clone(),
                    source,
                })?;

            let mime = file
                .content_type
                .as_deref()
                .unwrap_or("application/octet-stream");

            let part = Part::bytes(data)
                .file_name(file.name.clone())
                .mime_str(mime)?;

            form = form.part(FILES_FIELD, part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> SelectedFile {
        let file_path = dir.join(name);
        std::fs::write(&file_path, contents).unwrap();
        SelectedFile::from_path(&file_path).unwrap()
    }

    #[test]
    fn urls_follow_api_base() {
        let client = UploadClient::new("http://localhost:8000/api/");
        assert_eq!(client.upload_url(), "http://localhost:8000/api/upload/");
        assert_eq!(
            client.delete_url("abc"),
            "http://localhost:8000/api/files/abc/delete/"
        );
        assert_eq!(client.sessions_url(), "http://localhost:8000/api/sessions/");
        assert_eq!(
            client.session_url("s-1"),
            "http://localhost:8000/api/sessions/s-1/"
        );
    }

    #[tokio::test]
    async fn posts_all_files_under_one_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":1}"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "a.txt", b"alpha"),
            write_file(dir.path(), "b.txt", b"bravo"),
        ];

        let client = UploadClient::new(format!("{}/api", server.uri()));
        let body = client.upload(&files).await.unwrap();
        assert_eq!(body, "{\"ok\":1}");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));

        let body = String::from_utf8_lossy(&requests[0].body);
        assert_eq!(body.matches("name=\"files\"").count(), 2);
        assert!(body.contains("filename=\"a.txt\""));
        assert!(body.contains("filename=\"b.txt\""));
        assert!(body.contains("alpha"));
        assert!(body.contains("bravo"));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_file(dir.path(), "a.txt", b"alpha")];

        let client = UploadClient::new(format!("{}/api", server.uri()));
        let err = client.upload(&files).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn unreadable_file_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "gone.txt", b"x");
        std::fs::remove_file(&file.path).unwrap();

        let client = UploadClient::new(format!("{}/api", server.uri()));
        let err = client.upload(&[file]).await.unwrap_err();
        assert!(matches!(err, UploadError::ReadFile { .. }));
    }

    #[tokio::test]
    async fn delete_hits_file_route() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/files/f-1/delete/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/files/missing/delete/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = UploadClient::new(format!("{}/api", server.uri()));
        client.delete_file("f-1").await.unwrap();

        let err = client.delete_file("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    const SESSION_JSON: &str = r#"{
        "id": "s-1",
        "created_at": "2024-05-01T10:00:00Z",
        "total_files": 1,
        "completed_files": 1,
        "status": "completed",
        "files": [{
            "id": "f-1", "original_name": "a.txt", "file_size": 5,
            "content_type": "text/plain", "s3_url": "https://b/f-1",
            "upload_status": "completed", "error_message": null,
            "created_at": "2024-05-01T10:00:00Z"
        }]
    }"#;

    #[tokio::test]
    async fn lists_sessions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(format!("[{}]", SESSION_JSON)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = UploadClient::new(format!("{}/api", server.uri()));
        let sessions = client.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "s-1");
        assert_eq!(sessions[0].files[0].original_name, "a.txt");
    }

    #[tokio::test]
    async fn fetches_single_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/s-1/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SESSION_JSON))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/gone/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sessions/bad/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = UploadClient::new(format!("{}/api", server.uri()));
        let session = client.get_session("s-1").await.unwrap();
        assert_eq!(session.completed_files, 1);

        let err = client.get_session("gone").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 404");

        let err = client.get_session("bad").await.unwrap_err();
        assert!(!err.is_transport());
    }
}
