/// Convenience result type used across the crate.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Error taxonomy for scene construction and rendering.
///
/// Every variant is a programmer or configuration error; none are retried.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// A tween was built from zero keyframes.
    #[error("tween requires at least one keyframe")]
    EmptyKeyframeSet,

    /// A color specification could not be parsed.
    #[error("color parse error: {0}")]
    ColorParse(String),

    /// A dynamically typed value was of the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// `restore` without a matching `save`, or `save`s left open.
    #[error("unbalanced graphics stack: {0}")]
    UnbalancedGraphicsStack(String),

    /// Unknown interpolation method name.
    #[error("unsupported interpolation method '{0}'")]
    UnsupportedInterpolationMethod(String),

    /// Invalid user-provided construction input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while replaying a drawing onto a raster surface.
    #[error("render error: {0}")]
    Render(String),

    /// Any error raised while producing one frame.
    #[error("frame {frame} failed: {source}")]
    Frame {
        frame: u64,
        #[source]
        source: Box<FlipbookError>,
    },

    /// Attribution of an error to the layer or effect that raised it.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<FlipbookError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    pub fn color_parse(msg: impl Into<String>) -> Self {
        Self::ColorParse(msg.into())
    }

    pub fn unbalanced(msg: impl Into<String>) -> Self {
        Self::UnbalancedGraphicsStack(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn in_frame(self, frame: u64) -> Self {
        Self::Frame {
            frame,
            source: Box::new(self),
        }
    }

    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, looking through `Frame` and `Context` wrappers.
    pub fn root(&self) -> &FlipbookError {
        match self {
            Self::Frame { source, .. } | Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
