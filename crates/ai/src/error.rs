use thiserror::Error;

pub type ServiceResult<T> = Result<T, ExternalServiceError>;

/// Failure of an AI collaborator. Always safe to retry at the user's
/// discretion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExternalServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid service credential: {0}")]
    InvalidCredential(String),

    #[error("the AI service took too long to respond")]
    Timeout,

    #[error("AI service error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("could not reach the AI service: {0}")]
    Network(String),

    #[error("unexpected response from the AI service: {0}")]
    InvalidResponse(String),
}

impl ExternalServiceError {
    /// Classify an error response by its HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => Self::BadRequest(message),
            401 | 403 => Self::InvalidCredential(message),
            408 | 504 => Self::Timeout,
            _ => Self::Upstream { status, message },
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::InvalidCredential(_) => "invalid_credential",
            Self::Timeout => "timeout",
            Self::Upstream { .. } => "upstream",
            Self::Network(_) => "network",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<reqwest::Error> for ExternalServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        if err.is_decode() {
            return Self::InvalidResponse(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), err.to_string());
        }
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_categories() {
        assert_eq!(
            ExternalServiceError::from_status(400, "faltando userInput"),
            ExternalServiceError::BadRequest("faltando userInput".into())
        );
        assert!(matches!(
            ExternalServiceError::from_status(401, "x"),
            ExternalServiceError::InvalidCredential(_)
        ));
        assert_eq!(ExternalServiceError::from_status(504, "x"), ExternalServiceError::Timeout);
        assert_eq!(
            ExternalServiceError::from_status(500, "boom").code(),
            "upstream"
        );
    }
}
