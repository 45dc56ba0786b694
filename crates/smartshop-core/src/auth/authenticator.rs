use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use tracing::{debug, warn};

use super::CredentialReader;

/// Attaches the stored access token to outgoing requests.
///
/// A missing or empty token is not an error: the request simply goes out
/// unauthenticated.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    credentials: CredentialReader,
}

impl RequestAuthenticator {
    pub fn new(credentials: CredentialReader) -> Self {
        Self { credentials }
    }

    pub fn authenticate(&self, request: &mut Request) {
        let token = match self.credentials.token() {
            Some(token) if !token.is_empty() => token,
            _ => {
                debug!(url = %request.url(), "No stored token, sending unauthenticated");
                return;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => {
                warn!(error = %e, "Stored token is not a valid header value, sending unauthenticated");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::{Method, Url};

    use super::*;
    use crate::auth::{Credential, CredentialStore, MemoryCredentialStore};

    fn request() -> Request {
        let url = Url::parse("http://localhost/api/users/me").expect("valid url");
        Request::new(Method::GET, url)
    }

    fn authenticator_with(token: Option<&str>) -> RequestAuthenticator {
        let store = Arc::new(MemoryCredentialStore::new());
        if let Some(token) = token {
            store
                .save(Credential::new(token, None))
                .expect("memory save");
        }
        RequestAuthenticator::new(CredentialReader::new(store))
    }

    #[test]
    fn test_attaches_bearer_token() {
        let mut req = request();
        authenticator_with(Some("abc.def.ghi")).authenticate(&mut req);
        let header = req.headers().get(AUTHORIZATION).expect("authorization header");
        assert_eq!(header.to_str().expect("ascii header"), "Bearer abc.def.ghi");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_no_token_leaves_request_untouched() {
        let mut req = request();
        authenticator_with(None).authenticate(&mut req);
        assert!(req.headers().is_empty());
    }

    #[test]
    fn test_empty_token_leaves_request_untouched() {
        let mut req = request();
        authenticator_with(Some("")).authenticate(&mut req);
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_invalid_header_token_is_skipped() {
        let mut req = request();
        authenticator_with(Some("bad\ntoken")).authenticate(&mut req);
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_replaces_existing_authorization() {
        let mut req = request();
        req.headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        authenticator_with(Some("fresh")).authenticate(&mut req);
        assert_eq!(req.headers().get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(
            req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer fresh")
        );
    }
}
