/// Convenience result type used across distortfx.
pub type DistortResult<T> = Result<T, DistortError>;

/// Status codes reported back to an OpenFX host.
///
/// Discriminants match the `kOfxStat*` constants of the OpenFX C API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OfxStatus {
    /// `kOfxStatOK`.
    Ok = 0,
    /// `kOfxStatFailed`.
    Failed = 1,
    /// `kOfxStatErrFatal`.
    ErrFatal = 2,
    /// `kOfxStatErrUnknown`.
    ErrUnknown = 3,
    /// `kOfxStatErrMissingHostFeature`.
    ErrMissingHostFeature = 4,
    /// `kOfxStatErrUnsupported`.
    ErrUnsupported = 5,
    /// `kOfxStatErrFormat`.
    ErrFormat = 7,
    /// `kOfxStatErrMemory`.
    ErrMemory = 8,
    /// `kOfxStatErrBadHandle`.
    ErrBadHandle = 9,
    /// `kOfxStatErrValue`.
    ErrValue = 11,
}

impl OfxStatus {
    /// Numeric code as seen by the host.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Top-level error taxonomy used by plugin and engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum DistortError {
    /// A clip or image the host should have provided is missing or unreadable.
    #[error("host failure: {0}")]
    Failed(String),

    /// Pixel depth or component layout the plugin cannot process.
    #[error("format error: {0}")]
    Format(String),

    /// A host-supplied value (e.g. the render window) is out of range.
    #[error("value error: {0}")]
    Value(String),

    /// The host returned images whose scale or field disagree with the request.
    #[error("host compatibility error: {0}")]
    HostCompat(String),

    /// Invalid plugin-side data (parameter lookups, presets, descriptors).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while running image engine operations.
    #[error("engine error: {0}")]
    Engine(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DistortError {
    /// Build a [`DistortError::Failed`] value.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Build a [`DistortError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`DistortError::Value`] value.
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Build a [`DistortError::HostCompat`] value.
    pub fn host_compat(msg: impl Into<String>) -> Self {
        Self::HostCompat(msg.into())
    }

    /// Build a [`DistortError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DistortError::Engine`] value.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Status a host should see for this error.
    ///
    /// Host-compatibility errors surface as a plain failure; the descriptive part travels through
    /// the persistent message channel.
    pub fn status(&self) -> OfxStatus {
        match self {
            Self::Failed(_) | Self::HostCompat(_) => OfxStatus::Failed,
            Self::Format(_) => OfxStatus::ErrFormat,
            Self::Value(_) => OfxStatus::ErrValue,
            Self::Validation(_) => OfxStatus::ErrBadHandle,
            Self::Engine(_) | Self::Other(_) => OfxStatus::ErrUnknown,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
