use serde::{Deserialize, Serialize};

use super::{ApiEnvelope, UserData};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    /// `true` for male, `false` for female, as the backend expects.
    pub gender: bool,
}

/// Tokens issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

pub type LoginResponse = ApiEnvelope<TokenData>;
pub type RegisterResponse = ApiEnvelope<UserData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_names() {
        let req = RegisterRequest {
            email: "ann@example.com".to_string(),
            password: "hunter2".to_string(),
            username: "ann".to_string(),
            gender: false,
        };
        let json = serde_json::to_value(&req).expect("Failed to serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "email": "ann@example.com",
                "password": "hunter2",
                "username": "ann",
                "gender": false
            })
        );
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"isSuccess": true, "value": {"code": "200", "message": "OK", "data": {"accessToken": "abc.def", "refreshToken": null}}, "error": null}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login JSON");
        assert!(resp.is_success);
        let data = resp.data().expect("token data present");
        assert_eq!(data.access_token.as_deref(), Some("abc.def"));
        assert_eq!(data.refresh_token, None);
    }

    #[test]
    fn test_parse_login_response_null_token() {
        let json = r#"{"isSuccess": true, "value": {"data": {"accessToken": null}}}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login JSON");
        assert_eq!(resp.data().and_then(|d| d.access_token.as_deref()), None);
    }
}
