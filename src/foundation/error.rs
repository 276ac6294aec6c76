/// Convenience result type used across Snapstrip.
pub type SnapstripResult<T> = Result<T, SnapstripError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Guard conditions (pool at capacity, selection full, action in the wrong
/// sequencer phase) are deliberately *not* represented here: they are frequent
/// and expected, and resolve locally as no-ops. Only resource-acquisition and
/// output-production failures surface as errors.
#[derive(thiserror::Error, Debug)]
pub enum SnapstripError {
    /// Invalid user-provided configuration or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Video source acquisition failed or the camera is in a failed state.
    ///
    /// Fatal for the capture phase of the booth session; surfaced to the user
    /// with no automatic retry.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// Composite rendering invoked with no mounted layout box or no usable
    /// drawing surface. Safe to retry once the precondition is fixed.
    #[error("render unavailable: {0}")]
    RenderUnavailable(String),

    /// Rasterization succeeded but encoding the pixels to bytes failed.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnapstripError {
    /// Build a [`SnapstripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SnapstripError::CameraUnavailable`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::CameraUnavailable(msg.into())
    }

    /// Build a [`SnapstripError::RenderUnavailable`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderUnavailable(msg.into())
    }

    /// Build a [`SnapstripError::EncodeFailure`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::EncodeFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
