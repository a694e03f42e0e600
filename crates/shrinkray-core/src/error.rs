use thiserror::Error;

/// Validation failures for short keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key is too long: got {len} characters, max is {max}")]
    TooLong { len: usize, max: usize },
    #[error("key '{0}' is invalid, must be 3-10 characters of [-0-9a-zA-Z]")]
    Malformed(String),
}

/// Errors returned by [`HashStore`](crate::HashStore) implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store operation failed: {0}")]
    Operation(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Wraps the error with a description of the operation that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping every context layer.
    pub fn root(&self) -> &StoreError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Adds lazily-built context to store results.
pub trait StoreResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn with_context<F, S>(self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}
