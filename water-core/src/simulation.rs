//! The simulation context and its per-frame step.
//!
//! A frame of the water surface runs in a fixed order:
//! 1. every active link applies its spring force, all against the same
//!    snapshot of positions;
//! 2. every node adds its restoring force and integrates;
//! 3. broken links whose delay has elapsed are reinserted.
//!
//! Pointer-driven cutting ([`Simulation::cut_at`]) happens between steps,
//! whenever the host receives a pointer event.

use std::time::Duration;

use crate::{
    config::Config,
    error::Result,
    grid::Grid,
    link::Link,
    node::Node,
    registry::CutRegistry,
    types::NodeId,
};
use glam::Vec2;
use tracing::{debug, warn};

/// Owns the grid, the cut registry and the tuning constants.
///
/// All mutation goes through `&mut self`, so one step always runs to
/// completion before a cut test or the next step can start.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    registry: CutRegistry,
    cfg: Config,
}

impl Simulation {
    /// Builds a simulation for a `width x height` surface.
    ///
    /// ### Errors
    /// Propagates the [`crate::error::ConfigError`] from [`Grid::build`].
    pub fn new(width: f32, height: f32, cfg: Config) -> Result<Self> {
        let grid = Grid::build(width, height, &cfg)?;
        Ok(Self {
            grid,
            registry: CutRegistry::new(),
            cfg,
        })
    }

    /// Runs one simulation step at host time `now`.
    pub fn step(&mut self, now: Duration) {
        let Grid { nodes, links, .. } = &mut self.grid;

        for link in links.iter() {
            link.apply_force(nodes);
        }

        for node in nodes.iter_mut() {
            node.apply_restoring_force(self.cfg.restoring_strength);
            node.integrate(&self.cfg);
        }

        self.registry
            .process_recoveries(links, now, self.cfg.recovery_delay);
    }

    /// Cuts the links near `pointer`, which is in surface coordinates.
    ///
    /// ### Returns
    /// The number of links cut.
    pub fn cut_at(&mut self, pointer: Vec2, now: Duration) -> usize {
        let Grid { nodes, links, .. } = &mut self.grid;
        self.registry
            .test_cuts(links, nodes, pointer, self.cfg.cut_radius, now)
    }

    /// Rebuilds the grid for a new surface size, keeping the configuration.
    ///
    /// Broken links belong to the discarded grid and are dropped with it.
    ///
    /// ### Errors
    /// Leaves the simulation untouched if the new size is rejected.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let grid = Grid::build(width, height, &self.cfg)?;
        debug!(width, height, "resized water surface");
        self.grid = grid;
        self.registry.forget();
        Ok(())
    }

    /// Puts every node back at rest and restores every cut link.
    pub fn reset(&mut self) {
        self.registry.forget();
        // Rebuilding at an already-accepted size with an already-validated
        // config can't fail; keep the old grid if it somehow does.
        match Grid::build(self.grid.width(), self.grid.height(), &self.cfg) {
            Ok(grid) => self.grid = grid,
            Err(e) => warn!(error = %e, "failed to rebuild grid on reset"),
        }
    }

    /// Reinserts every cut link now, without waiting for recovery.
    pub fn heal(&mut self) {
        self.registry.clear(&mut self.grid.links);
    }

    /// Validates and adopts new tuning constants.
    ///
    /// A changed cell size rebuilds the grid; everything else takes
    /// effect on the next step.
    ///
    /// ### Errors
    /// Returns the validation error and keeps the current config.
    pub fn set_config(&mut self, cfg: Config) -> Result<()> {
        if let Err(e) = cfg.validate() {
            warn!(error = %e, "rejected water surface config");
            return Err(e);
        }

        let rebuild = cfg.cell_size != self.cfg.cell_size;
        if rebuild {
            self.grid = Grid::build(self.grid.width(), self.grid.height(), &cfg)?;
            self.registry.forget();
        }
        self.cfg = cfg;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &CutRegistry {
        &self.registry
    }

    /// Nodes in row-major order, for drawing.
    pub fn nodes(&self) -> &[Node] {
        &self.grid.nodes
    }

    /// The links currently exerting force, for drawing.
    pub fn active_links(&self) -> &[Link] {
        &self.grid.links
    }

    /// Endpoint positions of every active link.
    pub fn link_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.grid
            .links
            .iter()
            .map(|l| l.endpoints(&self.grid.nodes))
    }

    pub fn broken_count(&self) -> usize {
        self.registry.broken_count()
    }

    /// Largest displacement of any node from its rest position.
    pub fn max_displacement(&self) -> f32 {
        self.grid
            .nodes
            .iter()
            .map(Node::displacement)
            .fold(0.0, f32::max)
    }

    /// Mutable access to a free node, for hosts that perturb the surface
    /// directly.
    ///
    /// Pinned nodes are never handed out, so they stay at rest.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.grid.nodes.get_mut(id).filter(|n| !n.is_pinned())
    }
}
