//! Handler error type
//!
//! Failures either carry an explicit HTTP status (reported to the client as-is)
//! or are unclassified and become a 500 carrying the error text.

use hyper::StatusCode;

/// Boxed error produced by a request body stream
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Request path resolved outside the base directory
    #[error("Forbidden")]
    Forbidden,

    /// Malformed percent-encoding in the request target
    #[error("URI malformed: {0}")]
    Decode(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Reading the request body failed
    #[error("request body error: {0}")]
    Body(BoxError),
}

impl HandlerError {
    /// Explicit status carried by the failure, if any.
    ///
    /// `None` means the dispatcher answers with 500.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Forbidden => Some(StatusCode::FORBIDDEN),
            Self::Decode(_) | Self::Io(_) | Self::Body(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_carries_status() {
        let err = HandlerError::Forbidden;
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn test_io_is_unclassified() {
        let err = HandlerError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "permission denied");
    }
}
