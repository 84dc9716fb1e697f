use serde_json::Value;

/// Shown when neither the backend nor the client produced a message.
pub const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Network(String),
    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),
    #[error("cannot encode request: {0}")]
    Encode(String),
    #[error("cannot decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error message supplied by the backend in the response body, if any.
    pub fn backend_message(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(body) {
            Ok(Value::String(message)) => Some(message).filter(|m| !m.trim().is_empty()),
            Ok(Value::Object(object)) => ["message", "error"]
                .iter()
                .filter_map(|key| object.get(*key).and_then(Value::as_str))
                .find(|message| !message.trim().is_empty())
                .map(ToString::to_string)
                .or_else(|| Some(body.to_string())),
            _ => Some(body.to_string()),
        }
    }

    /// Text of the user-visible notification: the backend's message, then the
    /// client-side message, then [`FALLBACK_MESSAGE`].
    pub fn notification_message(&self) -> String {
        if let Some(message) = self.backend_message() {
            return message;
        }
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, body: &str) -> ApiError {
        ApiError::Status {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn plain_text_body_is_the_message() {
        let err = status(400, "Repository is not ready for analysis");
        assert_eq!(
            "Repository is not ready for analysis",
            err.notification_message()
        );
    }

    #[test]
    fn json_string_body_is_unwrapped() {
        let err = status(400, "\"Repository not found\"");
        assert_eq!("Repository not found", err.notification_message());
    }

    #[test]
    fn json_object_body_prefers_message_then_error() {
        let err = status(
            500,
            r#"{"timestamp":"2024-01-01T10:00:00","status":500,"error":"Internal Server Error","message":"boom"}"#,
        );
        assert_eq!("boom", err.notification_message());

        let err = status(
            500,
            r#"{"status":500,"error":"Internal Server Error","message":""}"#,
        );
        assert_eq!("Internal Server Error", err.notification_message());
    }

    #[test]
    fn json_object_without_known_fields_is_shown_raw() {
        let err = status(409, r#"{"code":17}"#);
        assert_eq!(r#"{"code":17}"#, err.notification_message());
    }

    #[test]
    fn empty_body_falls_back_to_client_message() {
        let err = status(404, "  ");
        assert_eq!(None, err.backend_message());
        assert_eq!(
            "Request failed with status code 404",
            err.notification_message()
        );
        assert_eq!(
            "timeout of 30000ms exceeded",
            ApiError::Timeout(30_000).notification_message()
        );
    }

    #[test]
    fn empty_client_message_falls_back_to_fixed_text() {
        let err = ApiError::Network(String::new());
        assert_eq!(FALLBACK_MESSAGE, err.notification_message());
    }
}
