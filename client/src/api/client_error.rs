use serde_json::Value;
use thiserror::Error;

/// Every failure the client can see, normalized to carry a displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// A success response whose body was not the expected JSON.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ClientError {
    /// Uses the body's `error` (or `message`) field when there is one.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|json| {
                ["error", "message"]
                    .iter()
                    .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        ClientError::Http { status, message }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = ClientError::from_response(400, br#"{"error":"Title is required"}"#);
        assert_eq!(err.message(), "Title is required");
        assert_eq!(err.status(), Some(400));

        let err = ClientError::from_response(409, br#"{"message":"Conflict"}"#);
        assert_eq!(err.message(), "Conflict");
    }

    #[test]
    fn unparseable_body_falls_back_to_generic_message() {
        let err = ClientError::from_response(502, b"<html>Bad gateway</html>");
        assert_eq!(err.message(), "Request failed with status 502");

        let err = ClientError::from_response(500, br#"{"error": 12}"#);
        assert_eq!(err.message(), "Request failed with status 500");
    }

    #[test]
    fn not_found_is_recognized() {
        assert!(ClientError::from_response(404, br#"{"error":"Task not found"}"#).is_not_found());
        assert!(!ClientError::Network("refused".into()).is_not_found());
    }
}
