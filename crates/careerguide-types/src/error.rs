use thiserror::Error;

/// Errors from repository operations (used by trait definitions in careerguide-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the session and message services.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The session does not exist or belongs to someone else.
    #[error("session not found")]
    SessionNotFound,

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ChatError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ChatError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Errors from verifying or issuing caller credentials.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("signing secret not configured (set {0})")]
    MissingSecret(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_validation_display() {
        let err = ChatError::validation("content", "must not be empty");
        assert_eq!(err.to_string(), "invalid content: must not be empty");
    }

    #[test]
    fn test_chat_error_wraps_repository_error() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Repository(RepositoryError::Connection)));
        assert_eq!(err.to_string(), "database connection error");
    }

    #[test]
    fn test_identity_error_display() {
        let err = IdentityError::MissingSecret("CAREERGUIDE_AUTH_SECRET".to_string());
        assert!(err.to_string().contains("CAREERGUIDE_AUTH_SECRET"));
    }
}
