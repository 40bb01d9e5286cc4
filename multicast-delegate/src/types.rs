//! Error and result types shared by the delegate library

/// Result type for delegate operations
pub type Result<T> = std::result::Result<T, DelegateError>;

/// Errors that can occur while building delegates
///
/// Only construction can fail. Adding, removing and invoking never return an
/// error: removing an unknown handler is a no-op and invoking an empty delegate
/// yields the caller's default value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegateError {
    /// A bound method was given no live receiver, or a handler was given the
    /// empty method identity
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DelegateError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        DelegateError::InvalidArgument(message.into())
    }
}
