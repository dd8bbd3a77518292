//! Backend-neutral storage error.

use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by score stores regardless of the backend behind them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not serve the request.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Summary of the failed operation.
        message: String,
        /// Backend failure, when there is one.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Construct an unavailable error that has no underlying cause.
    pub fn unavailable_without_source(message: impl Into<String>) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Message surfaced to clients, followed by every backend cause in the chain.
    pub fn client_message(&self) -> String {
        let StorageError::Unavailable { message, source } = self;
        let mut text = message.clone();
        let mut cause: Option<&(dyn Error + 'static)> = source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static));
        while let Some(err) = cause {
            text.push_str(": ");
            text.push_str(&err.to_string());
            cause = err.source();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt, io};

    use super::*;

    #[derive(Debug)]
    struct RequestFailed(io::Error);

    impl fmt::Display for RequestFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failed to send store request")
        }
    }

    impl Error for RequestFailed {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn client_message_includes_every_cause() {
        let err = StorageError::unavailable(
            "score store request failed".into(),
            RequestFailed(io::Error::new(io::ErrorKind::TimedOut, "operation timed out")),
        );

        assert_eq!(
            err.client_message(),
            "score store request failed: failed to send store request: operation timed out"
        );
    }

    #[test]
    fn client_message_without_cause() {
        let err = StorageError::unavailable_without_source("store offline");
        assert_eq!(err.client_message(), "store offline");
    }
}
