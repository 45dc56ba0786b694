use serde::{Deserialize, Serialize};

use super::ApiEnvelope;
use crate::utils::{format_date, format_optional};

/// User profile as returned by register and `GET /api/users/me`.
///
/// Every field may be missing on the wire; absent strings read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl UserData {
    pub fn role_display(&self) -> String {
        format_optional(&self.role, "-")
    }

    /// Account creation date for display, e.g. "Mar 04, 2025".
    pub fn member_since(&self) -> String {
        self.created_at
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string())
    }
}

pub type UserResponse = ApiEnvelope<UserData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_response() {
        let json = r#"{"isSuccess": true, "value": {"code": "200", "message": "OK", "data": {"id": "8f7c", "username": "ann", "email": "ann@example.com", "phoneNumber": "5551234567", "address": "1 Main St", "role": "Admin", "createdAt": "2025-03-04T10:15:00Z"}}, "error": null}"#;
        let resp: UserResponse = serde_json::from_str(json).expect("Failed to parse user JSON");
        let user = resp.data().expect("user present");
        assert_eq!(user.username, "ann");
        assert_eq!(user.phone_number.as_deref(), Some("5551234567"));
        assert_eq!(user.role_display(), "Admin");
        assert_eq!(user.member_since(), "Mar 04, 2025");
    }

    #[test]
    fn test_optional_profile_fields() {
        let json = r#"{"id": "1", "username": "bo", "email": "bo@example.com", "phoneNumber": null}"#;
        let user: UserData = serde_json::from_str(json).expect("Failed to parse user JSON");
        assert_eq!(user.phone_number, None);
        assert_eq!(user.role_display(), "-");
        assert_eq!(user.member_since(), "-");
    }

    #[test]
    fn test_partial_profile_decodes() {
        let json = r#"{"isSuccess": true, "value": {"data": {"username": "ann", "email": "a@b.c"}}}"#;
        let resp: UserResponse = serde_json::from_str(json).expect("Failed to parse user JSON");
        let user = resp.data().expect("user present");
        assert_eq!(user.id, "");
        assert_eq!(user.username, "ann");
        assert_eq!(user.email, "a@b.c");
    }
}
