//! Error types for water-core.

use thiserror::Error;

/// Result type for water-core operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected configuration or surface dimensions.
///
/// The simulation itself is total; the only thing that can fail is
/// building a grid from constants that would produce a malformed
/// topology or an unstable integrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cell size must be a finite, strictly positive number.
    #[error("cell size must be finite and > 0, got {0}")]
    CellSize(f32),

    /// Surface width or height is NaN or infinite.
    #[error("surface dimensions must be finite, got {width} x {height}")]
    SurfaceSize { width: f32, height: f32 },

    /// The surface holds more cells than a grid may have.
    #[error("surface {width} x {height} with cell size {cell_size} needs too many nodes")]
    SurfaceTooLarge {
        width: f32,
        height: f32,
        cell_size: f32,
    },

    /// Friction must lie strictly between 0 and 1.
    #[error("friction must be in (0, 1), got {0}")]
    Friction(f32),

    /// Speed limit must be a finite, strictly positive number.
    #[error("speed limit must be finite and > 0, got {0}")]
    SpeedLimit(f32),

    /// Restoring strength must be finite and non-negative.
    #[error("restoring strength must be finite and >= 0, got {0}")]
    RestoringStrength(f32),

    /// Force multiplier must be finite and non-negative.
    #[error("force multiplier must be finite and >= 0, got {0}")]
    ForceMultiplier(f32),

    /// Cut radius must be finite and non-negative.
    #[error("cut radius must be finite and >= 0, got {0}")]
    CutRadius(f32),
}
