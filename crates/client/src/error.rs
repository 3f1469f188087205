use biobank_core::error::CoreError;

/// Substring the server uses when an `expectedVersion` is stale.
pub const VERSION_CONFLICT_MESSAGE: &str = "expected version doesn't match current version";

/// Errors from the REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A domain precondition or response validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A reply body was not valid JSON.
    #[error("Malformed response body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered with a non-2xx status. `message` is the server's
    /// own error text, passed through unchanged.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        message: String,
    },
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// `true` when another client modified the entity first.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::Api { message, .. } if message.contains(VERSION_CONFLICT_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_detected_by_message() {
        let err = ClientError::Api {
            status: 400,
            message: format!("InvalidVersion: {VERSION_CONFLICT_MESSAGE}: 3"),
        };
        assert!(err.is_version_conflict());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_by_status() {
        let err = ClientError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_version_conflict());
    }

    #[test]
    fn api_error_displays_raw_message() {
        let err = ClientError::Api {
            status: 400,
            message: "name already used".to_string(),
        };
        assert_eq!(err.to_string(), "name already used");
    }
}
