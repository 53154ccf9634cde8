//! Base URL resolution
//!
//! The API base may be relative (`/api`, the default). A terminal client has
//! no page origin to resolve it against, so relative bases and relative
//! image URLs are joined onto the configured server URL.

/// Default API base when nothing overrides it
pub const DEFAULT_API_BASE: &str = "/api";

/// Environment variable that overrides the configured base URL
pub const API_BASE_ENV: &str = "QRTUI_API_BASE_URL";

/// Default server the relative base is resolved against
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Pick the API base: CLI flag, then environment, then config, then `/api`.
/// Blank values are skipped.
pub fn select_api_base(
    cli: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
) -> String {
    [cli, env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}

/// Make `url` absolute against `server_url` when it is relative
///
/// # Examples
/// ```
/// use qrtui::logic::urls::resolve_against;
///
/// assert_eq!(resolve_against("http://localhost:8000/", "/api"), "http://localhost:8000/api");
/// assert_eq!(resolve_against("http://localhost:8000", "https://qr.example/api"), "https://qr.example/api");
/// ```
pub fn resolve_against(server_url: &str, url: &str) -> String {
    if is_absolute(url) {
        return url.to_string();
    }

    let server = server_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", server, url)
    } else {
        format!("{}/{}", server, url)
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_defaults_to_relative_api() {
        assert_eq!(select_api_base(None, None, None), "/api");
    }

    #[test]
    fn test_select_precedence() {
        assert_eq!(
            select_api_base(Some("http://cli/api"), Some("http://env/api"), Some("http://cfg/api")),
            "http://cli/api"
        );
        assert_eq!(
            select_api_base(None, Some("http://env/api"), Some("http://cfg/api")),
            "http://env/api"
        );
        assert_eq!(select_api_base(None, None, Some("http://cfg/api")), "http://cfg/api");
    }

    #[test]
    fn test_select_skips_blank_values() {
        assert_eq!(select_api_base(Some("  "), Some(""), Some("http://cfg/api")), "http://cfg/api");
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve_against("http://localhost:8000", "/api"), "http://localhost:8000/api");
        assert_eq!(
            resolve_against("http://localhost:8000/", "media/q.png"),
            "http://localhost:8000/media/q.png"
        );
    }

    #[test]
    fn test_resolve_keeps_absolute() {
        assert_eq!(
            resolve_against("http://localhost:8000", "HTTPS://cdn.example/q.png"),
            "HTTPS://cdn.example/q.png"
        );
    }
}
