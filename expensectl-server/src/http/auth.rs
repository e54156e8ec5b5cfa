//! HTTP basic auth middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::error::ApiError;
use super::server::AppState;

/// Username/password pair every request must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

/// Parse an `Authorization` header value of the form `Basic <base64(user:pass)>`.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme, bad base64, non-UTF-8 payloads or a payload without `:`.
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_owned(), password.to_owned()))
}

/// Reject requests without valid basic-auth credentials before they reach a handler.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic)
        .is_some_and(|(username, password)| state.credentials.matches(&username, &password));

    if !authorized {
        tracing::warn!(uri = %request.uri(), "Rejected request without valid credentials");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_header() {
        // admin:password
        assert_eq!(
            parse_basic("Basic YWRtaW46cGFzc3dvcmQ="),
            Some(("admin".into(), "password".into()))
        );
        assert_eq!(
            parse_basic("basic YWRtaW46cGFzc3dvcmQ="),
            Some(("admin".into(), "password".into()))
        );
    }

    #[test]
    fn password_may_contain_colons() {
        let encoded = STANDARD.encode("admin:pa:ss");
        assert_eq!(
            parse_basic(&format!("Basic {}", encoded)),
            Some(("admin".into(), "pa:ss".into()))
        );
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic("Bearer YWRtaW46cGFzc3dvcmQ="), None);
        assert_eq!(parse_basic("Basic not-base64!!"), None);
        assert_eq!(parse_basic(&format!("Basic {}", STANDARD.encode("nocolon"))), None);
        assert_eq!(parse_basic("Basic"), None);
    }

    #[test]
    fn default_credentials() {
        let creds = Credentials::default();
        assert!(creds.matches("admin", "password"));
        assert!(!creds.matches("admin", "wrong"));
    }
}
