//! Error types for Turnkey storage.

/// Errors that can occur while operating a grant store.
///
/// All variants are marked with `#[non_exhaustive]` to allow adding new
/// error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Identity or key-codec error from turnkey-core.
    #[error("core error: {0}")]
    Core(#[from] turnkey_core::Error),

    /// The storage engine could not be reached or failed mid-operation.
    ///
    /// Adapters never retry; engine failures are surfaced verbatim and
    /// retry policy stays with the caller.
    #[error("backend '{backend}' unavailable: {message}")]
    Unavailable {
        /// Name of the failing backend.
        backend: String,
        /// What failed.
        message: String,
        /// Engine-level cause, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A backend kind outside the supported set, or one that this build
    /// was compiled without.
    #[error("unsupported backend kind '{kind}': {reason}")]
    UnsupportedBackend {
        /// The requested backend kind.
        kind: String,
        /// Why it cannot be used.
        reason: String,
    },

    /// Store configuration is missing something the selected backend
    /// requires.
    #[error("configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },
}

/// Convenience `Result` type alias for Turnkey storage operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error may clear up on its own.
    ///
    /// Engine unavailability is transient; identity, configuration, and
    /// unsupported-kind errors are permanent until the caller changes
    /// something.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Unavailable { .. } => true,
            Error::Core(_) => false,
            Error::UnsupportedBackend { .. } => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a new unavailable error with a message.
    pub fn unavailable<B, M>(backend: B, message: M) -> Self
    where
        B: Into<String>,
        M: Into<String>,
    {
        Error::Unavailable {
            backend: backend.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new unavailable error with a message and engine cause.
    pub fn unavailable_with_source<B, M, E>(backend: B, message: M, source: E) -> Self
    where
        B: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Unavailable {
            backend: backend.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new unsupported-backend error.
    pub fn unsupported<K, M>(kind: K, reason: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::UnsupportedBackend {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
