/// Convenience result type used across vecanim.
pub type VecanimResult<T> = Result<T, VecanimError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VecanimError {
    /// Invalid user-provided scene, config, or timeline data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Path construction called before a start point exists.
    #[error("point error: {0}")]
    Point(String),

    /// Animation preconditions that do not hold (unknown item, unregistered target).
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while sampling timeline state at a given time.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VecanimError {
    /// Build a [`VecanimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VecanimError::Point`] value.
    pub fn point(msg: impl Into<String>) -> Self {
        Self::Point(msg.into())
    }

    /// Build a [`VecanimError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`VecanimError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`VecanimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VecanimError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
