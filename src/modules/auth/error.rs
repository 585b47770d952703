use crate::modules::storage::StorageError;

/// Errors surfaced by authentication, tracking, and profile operations.
/// All of them are user-facing notices; none are fatal and none retry.
#[derive(Debug)]
pub enum AuthError {
    /// Missing or malformed input; the flow does not advance.
    Validation(String),
    /// An account already exists under the given email.
    Conflict(String),
    /// No account (or tracked record) for the given key.
    NotFound(String),
    /// Stored password or stored role does not match the input.
    InvalidCredentials(String),
    /// An operation that requires a signed-in session was called without one.
    NotAuthenticated,
    /// The persistence store failed underneath the operation.
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(error: StorageError) -> Self {
        AuthError::Storage(error)
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Validation(msg) => write!(f, "{}", msg),
            AuthError::Conflict(msg) => write!(f, "{}", msg),
            AuthError::NotFound(msg) => write!(f, "{}", msg),
            AuthError::InvalidCredentials(msg) => write!(f, "{}", msg),
            AuthError::NotAuthenticated => write!(f, "Please sign in first"),
            AuthError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}
