use crate::config::Config;
use glam::Vec2;

/// A point mass of the water surface.
///
/// Each node is elastically drawn towards the rest position it was
/// created at, and collects link forces in `force` until the next call
/// to [`Node::integrate`].
///
/// Pinned nodes never move: they ignore every applied force and keep
/// `pos == rest_pos` and `vel == Vec2::ZERO` for their whole lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Force accumulated since the last integration step.
    pub force: Vec2,
    rest_pos: Vec2,
    pinned: bool,
    displacement: f32,
}

impl Node {
    pub fn new(pos: Vec2, pinned: bool) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            rest_pos: pos,
            pinned,
            displacement: 0.0,
        }
    }

    #[inline]
    pub fn rest_pos(&self) -> Vec2 {
        self.rest_pos
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Distance from the rest position as of the last integration step.
    ///
    /// Purely visual; it never feeds back into the physics.
    #[inline]
    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Adds `force` unless the node is pinned.
    #[inline]
    pub fn add_force(&mut self, force: Vec2) {
        if !self.pinned {
            self.force += force;
        }
    }

    /// Accumulates the pull towards the rest position.
    ///
    /// Only adds to `force`; clearing it is left to [`Node::integrate`].
    pub fn apply_restoring_force(&mut self, strength: f32) {
        if self.pinned {
            return;
        }
        self.force += (self.rest_pos - self.pos) * strength;
    }

    /// Advances the node by one step using the accumulated force.
    ///
    /// The order is fixed:
    ///
    /// 1. `vel += force * force_multiplier`.
    /// 2. Clamp the speed to `speed_limit`, keeping the direction.
    /// 3. `pos += vel`.
    /// 4. Clear `force`.
    /// 5. `vel *= friction`, so damping only shows in the next step.
    /// 6. Recompute the displacement from the rest position.
    ///
    /// ### Parameters
    /// - `cfg` - Supplies `force_multiplier`, `speed_limit` and `friction`.
    pub fn integrate(&mut self, cfg: &Config) {
        if self.pinned {
            return;
        }

        self.vel += self.force * cfg.force_multiplier;
        self.vel = self.vel.clamp_length_max(cfg.speed_limit);

        self.pos += self.vel;
        self.force = Vec2::ZERO;
        self.vel *= cfg.friction;

        self.displacement = self.pos.distance(self.rest_pos);
    }
}
