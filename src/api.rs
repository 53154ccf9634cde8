use anyhow::{Context, Result};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied to every backend call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A generated QR code as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QrCode {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub qr_image_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of a spreadsheet upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Batch {
    pub id: String,
    #[serde(default)]
    pub items: Vec<QrCode>,
    #[serde(default)]
    pub zip_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Spreadsheet payload for `POST /qrcode/batch`
#[derive(Debug, Clone)]
pub struct SpreadsheetUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Non-success answer from the backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message} (HTTP {})", .status.as_u16())]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Status { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Status { message, .. } => message,
        }
    }
}

#[derive(Clone)]
pub struct QrClient {
    base_url: String,
    client: Client,
}

impl QrClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /qrcode` with `{url}`
    pub async fn generate_single(&self, url: &str) -> Result<QrCode> {
        let response = self
            .client
            .post(self.endpoint("/qrcode"))
            .json(&GenerateRequest { url })
            .send()
            .await
            .context("Failed to send generate request")?;

        let response = check_status(response).await?;
        response
            .json::<QrCode>()
            .await
            .context("Failed to parse QR code response")
    }

    /// `POST /qrcode/batch` with the spreadsheet as multipart field `file`
    pub async fn generate_batch(&self, upload: SpreadsheetUpload) -> Result<Batch> {
        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/qrcode/batch"))
            .multipart(form)
            .send()
            .await
            .context("Failed to upload spreadsheet")?;

        let response = check_status(response).await?;
        response
            .json::<Batch>()
            .await
            .context("Failed to parse batch response")
    }

    /// `GET /qrcode/{id}/download`, returns the PNG payload
    pub async fn download_single(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!("/qrcode/{}/download", urlencoding::encode(id)));
        self.get_bytes(&url)
            .await
            .with_context(|| format!("Failed to download QR code {}", id))
    }

    /// `GET /qrcode/batch/{id}/download`, returns the ZIP payload
    pub async fn download_batch(&self, batch_id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!(
            "/qrcode/batch/{}/download",
            urlencoding::encode(batch_id)
        ));
        self.get_bytes(&url)
            .await
            .with_context(|| format!("Failed to download batch {}", batch_id))
    }

    /// Fetch the image behind an absolute `qr_image_url`
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        self.get_bytes(image_url)
            .await
            .with_context(|| format!("Failed to fetch image {}", image_url))
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.context("Failed to read response body")?;
        Ok(bytes.to_vec())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    Err(ApiError::Status { status, message }.into())
}

/// Pull a readable message out of an error body.
///
/// The backend answers `{"error": "..."}`; short plain-text bodies are used
/// as-is, HTML error pages are ignored.
pub fn error_message_from_body(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return Some(parsed.error);
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') || trimmed.starts_with('{') || trimmed.len() > 200 {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qrcode_ignores_unknown_fields() {
        let json = r#"{
            "id": "qrcode_abc123",
            "url": "https://example.com",
            "qr_image_url": "http://localhost:8000/media/qrcodes/qrcode_abc123.png",
            "download_url": "http://localhost:8000/api/qrcode/qrcode_abc123/download/",
            "created_at": "2025-01-01T00:00:00Z",
            "extra": 42
        }"#;
        let code: QrCode = serde_json::from_str(json).unwrap();
        assert_eq!(code.id, "qrcode_abc123");
        assert_eq!(code.url, "https://example.com");
        assert!(code.qr_image_url.unwrap().ends_with(".png"));
    }

    #[test]
    fn test_qrcode_without_image_url() {
        let code: QrCode = serde_json::from_str(r#"{"id":"a","url":"b","qr_image_url":null}"#).unwrap();
        assert!(code.qr_image_url.is_none());
        assert!(code.download_url.is_none());
    }

    #[test]
    fn test_batch_keeps_item_order() {
        let json = r#"{"id":"batch_1234","items":[
            {"id":"q1","url":"https://a.example"},
            {"id":"q2","url":"https://b.example"},
            {"id":"q3","url":"https://c.example"}
        ]}"#;
        let batch: Batch = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = batch.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message_from_body(r#"{"error": "URL is required"}"#),
            Some("URL is required".to_string())
        );
    }

    #[test]
    fn test_error_message_from_plain_text() {
        assert_eq!(
            error_message_from_body("Batch not found\n"),
            Some("Batch not found".to_string())
        );
    }

    #[test]
    fn test_error_message_ignores_html_and_empty() {
        assert_eq!(error_message_from_body("<html><body>404</body></html>"), None);
        assert_eq!(error_message_from_body("   "), None);
        assert_eq!(error_message_from_body(r#"{"detail": "nope"}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = QrClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.endpoint("/qrcode"), "http://localhost:8000/api/qrcode");
    }

    #[test]
    fn test_api_error_display_includes_status() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Only .xlsx files are supported".to_string(),
        };
        assert_eq!(err.to_string(), "Only .xlsx files are supported (HTTP 400)");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Only .xlsx files are supported");
    }
}
