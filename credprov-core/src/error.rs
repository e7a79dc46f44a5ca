//! Error types for the credential provider.

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by the provider registry and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum ProviderError {
    /// An argument (tile index, scenario tag, configuration) was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider declines to take part in the requested operation.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Memory for the credential set could not be reserved.
    #[error("out of memory")]
    OutOfMemory,

    /// A credential could not be initialized for one candidate user.
    #[error("credential initialization failed: {0}")]
    InitializationFailed(String),

    /// The tile at `index` is counted but its credential failed to build.
    #[error("tile {index} has no usable credential")]
    BrokenTile {
        /// Index of the hole in the enumerated set.
        index: u32,
    },

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl ProviderError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub(crate) fn not_supported(reason: impl Into<String>) -> Self {
        Self::NotSupported(reason.into())
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for ProviderError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}
