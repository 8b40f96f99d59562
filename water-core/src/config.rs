use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Tuning constants for the water surface.
///
/// The defaults reproduce the reference feel of the surface: a soft
/// restoring pull, light friction and a short recovery window for cut
/// links.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Gain of the pull from a node towards its rest position.
    pub restoring_strength: f32,
    /// Gain from accumulated force to velocity change.
    pub force_multiplier: f32,
    /// Velocity kept after each step, strictly between 0 and 1.
    pub friction: f32,
    /// Maximum node speed, in surface units per step.
    pub speed_limit: f32,
    /// Grid spacing in surface units.
    pub cell_size: f32,
    /// A link whose midpoint is closer than this to the pointer is cut.
    pub cut_radius: f32,
    /// How long a cut link stays broken before it is reinserted.
    pub recovery_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restoring_strength: 0.02,
            force_multiplier: 0.25,
            friction: 0.99,
            speed_limit: 8.0,
            cell_size: 40.0,
            cut_radius: 8.0,
            recovery_delay: Duration::from_millis(150),
        }
    }
}

impl Config {
    /// Checks every constant, returning the first one that is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::Friction(self.friction));
        }
        if !(self.speed_limit.is_finite() && self.speed_limit > 0.0) {
            return Err(ConfigError::SpeedLimit(self.speed_limit));
        }
        if !(self.restoring_strength.is_finite() && self.restoring_strength >= 0.0) {
            return Err(ConfigError::RestoringStrength(self.restoring_strength));
        }
        if !(self.force_multiplier.is_finite() && self.force_multiplier >= 0.0) {
            return Err(ConfigError::ForceMultiplier(self.force_multiplier));
        }
        if !(self.cut_radius.is_finite() && self.cut_radius >= 0.0) {
            return Err(ConfigError::CutRadius(self.cut_radius));
        }
        Ok(())
    }
}
