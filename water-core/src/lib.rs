//! Core 2-D water surface simulation library.
//!
//! The surface is a lattice of point masses joined by elastic links.
//! Moving the pointer across it cuts the links it touches; cut links
//! heal on their own after a short delay.
//!
//! Main components:
//! - [`node`] — point masses and their integration step.
//! - [`link`] — elastic connectors between two nodes.
//! - [`grid`] — the lattice builder and the active link set.
//! - [`registry`] — cutting links and recovering them on a timer.
//! - [`simulation`] — the context object and the per-frame step.
//! - [`config`] — tuning constants.
//! - [`error`] — configuration errors.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod error;
pub mod grid;
pub mod link;
pub mod node;
pub mod registry;
pub mod simulation;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use simulation::Simulation;
