//! Precondition failures raised by the viewer core.
//!
//! Callers are expected to validate inputs upstream (range-limited sliders,
//! fixed construction parameters). Anything that still arrives out of range is
//! reported here instead of being clamped.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewerError {
    #[error("angular segment count must be at least 3, got {0}")]
    TooFewSegments(u32),

    #[error("height segment count must be at least 1, got {0}")]
    TooFewHeightSegments(u32),

    #[error("can height must be positive and finite, got {0}")]
    InvalidHeight(f32),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{segments} x {height_segments} band segments exceed the u32 index range")]
    TooManyVertices { segments: u32, height_segments: u32 },

    #[error("{name} must be positive and finite, got {value}")]
    InvalidDistance { name: &'static str, value: f32 },

    #[error("ambient intensity must be finite and non-negative, got {0}")]
    InvalidAmbient(f32),

    #[error("morph arrays differ in length: rest has {rest} vertices, crushed has {crushed}")]
    MorphLengthMismatch { rest: usize, crushed: usize },

    #[error("blend factor must lie in [0, 1], got {0}")]
    BlendFactorOutOfRange(f32),

    #[error("parameter `{name}` = {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("no mesh registered with id {0}")]
    UnknownMesh(usize),

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
