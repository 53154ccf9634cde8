use anyhow::Error;

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    BadRequest,   // HTTP 400
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Io,           // local file read/write
    Other,
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    // Backend answered with a status
    if let Some(api_err) = error.chain().find_map(|e| e.downcast_ref::<ApiError>()) {
        return match api_err.status().as_u16() {
            400 => ErrorType::BadRequest,
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        };
    }

    let reqwest_err = error.chain().find_map(|e| e.downcast_ref::<reqwest::Error>());
    if reqwest_err.is_some_and(|e| e.is_timeout()) {
        return ErrorType::Timeout;
    }

    // Local disk errors carry no transport error in the chain
    if reqwest_err.is_none() && error.chain().any(|e| e.downcast_ref::<std::io::Error>().is_some()) {
        return ErrorType::Io;
    }

    // Fall back to the rendered chain for transport errors
    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Short message for the inline banners and toasts
///
/// Backend messages win (they are written for users), then a fixed phrase for
/// timeouts and refused connections, then the deepest cause in the chain.
pub fn format_error_message(error: &Error) -> String {
    if let Some(api_err) = error.chain().find_map(|e| e.downcast_ref::<ApiError>()) {
        return api_err.message().to_string();
    }

    match classify_error(error) {
        ErrorType::Timeout => return "Request timed out".to_string(),
        ErrorType::ConnectionRefused => return "Cannot reach the QR service (connection refused)".to_string(),
        _ => {}
    }

    // Walk the chain to the root cause
    error
        .chain()
        .last()
        .map(|e| e.to_string())
        .unwrap_or_else(|| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn api_error(status: StatusCode, message: &str) -> Error {
        Error::new(ApiError::Status {
            status,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("connection refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("operation timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_dns_error() {
        let err = anyhow::anyhow!("dns lookup failed");
        assert_eq!(classify_error(&err), ErrorType::NetworkError);
    }

    #[test]
    fn test_classify_status_codes() {
        assert_eq!(classify_error(&api_error(StatusCode::BAD_REQUEST, "x")), ErrorType::BadRequest);
        assert_eq!(classify_error(&api_error(StatusCode::NOT_FOUND, "x")), ErrorType::NotFound);
        assert_eq!(
            classify_error(&api_error(StatusCode::BAD_GATEWAY, "x")),
            ErrorType::ServerError
        );
    }

    #[test]
    fn test_classify_status_through_context() {
        let err = api_error(StatusCode::NOT_FOUND, "Batch not found").context("Failed to download batch");
        assert_eq!(classify_error(&err), ErrorType::NotFound);
    }

    #[test]
    fn test_classify_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::new(io).context("Failed to save qr-code-1.png");
        assert_eq!(classify_error(&err), ErrorType::Io);
    }

    #[test]
    fn test_classify_other_error() {
        let err = anyhow::anyhow!("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_format_prefers_backend_message() {
        let err = api_error(StatusCode::BAD_REQUEST, "No valid URLs found in Excel file")
            .context("Failed to upload spreadsheet");
        assert_eq!(format_error_message(&err), "No valid URLs found in Excel file");
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to send generate request");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_format_timeout_phrase() {
        let err = anyhow::anyhow!("request timed out").context("Failed to download QR code q1");
        assert_eq!(format_error_message(&err), "Request timed out");
    }
}
