//! Error types shared by gateways and controllers.

use thiserror::Error;

/// Failure reported by a data gateway.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// The backend answered with an error; `message` is shown as-is.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// User-facing error taxonomy surfaced by the controllers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Gateway(String),
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidCredentials => ClientError::Authentication(err.to_string()),
            other => ClientError::Gateway(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_verbatim() {
        let err = GatewayError::Backend {
            status: 409,
            message: "duplicate key value violates unique constraint".to_string(),
        };
        assert_eq!(
            ClientError::from(err).to_string(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn test_bad_credentials_map_to_authentication() {
        let err = ClientError::from(GatewayError::InvalidCredentials);
        assert!(matches!(err, ClientError::Authentication(_)));
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
