use serde::{Deserialize, Serialize};

/// Wire-level response wrapper. Logical success is reported separately from
/// the HTTP status.
///
/// `is_success == true` is expected to come with a `value`, but the server
/// does not guarantee it; callers decide how strict to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "isSuccess", default)]
    pub is_success: bool,
    pub value: Option<ApiPayload<T>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload carried in `ApiEnvelope::value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPayload<T> {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn data(&self) -> Option<&T> {
        self.value.as_ref().and_then(|v| v.data.as_ref())
    }

    /// Message to show when the envelope is treated as a failure: the
    /// envelope error, then the payload message, then `fallback`.
    pub fn failure_message(&self, fallback: &str) -> String {
        self.error
            .clone()
            .or_else(|| self.value.as_ref().and_then(|v| v.message.clone()))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Envelope-shaped error body returned alongside non-2xx statuses.
/// Only the message fields are read; `data` is ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub value: Option<ErrorBodyValue>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBodyValue {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        let non_blank = |m: &String| !m.trim().is_empty();
        let message = self.message;
        self.error
            .filter(non_blank)
            .or_else(|| self.value.and_then(|v| v.message).filter(non_blank))
            .or_else(|| message.filter(non_blank))
    }
}
