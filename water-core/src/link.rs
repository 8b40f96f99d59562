use crate::{node::Node, types::NodeId};
use glam::Vec2;

/// An elastic connector between two nodes of a [`crate::grid::Grid`].
///
/// A link owns nothing but the two endpoint ids, so it can be removed
/// from and reinserted into the active set freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
}

impl Link {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        debug_assert_ne!(a, b, "a link needs two distinct endpoints");
        Self { a, b }
    }

    /// Applies a zero-rest-length, unit-stiffness spring force.
    ///
    /// With `delta = b.pos - a.pos`, endpoint `a` receives `+delta` and
    /// endpoint `b` receives `-delta`; pinned endpoints receive nothing.
    pub fn apply_force(&self, nodes: &mut [Node]) {
        let delta = nodes[self.b].pos - nodes[self.a].pos;
        nodes[self.a].add_force(delta);
        nodes[self.b].add_force(-delta);
    }

    #[inline]
    pub fn endpoints(&self, nodes: &[Node]) -> (Vec2, Vec2) {
        (nodes[self.a].pos, nodes[self.b].pos)
    }

    #[inline]
    pub fn midpoint(&self, nodes: &[Node]) -> Vec2 {
        let (p, q) = self.endpoints(nodes);
        (p + q) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn force_pulls_endpoints_together() {
        let mut nodes = vec![
            Node::new(Vec2::new(0.0, 0.0), false),
            Node::new(Vec2::new(3.0, 1.0), false),
        ];
        let link = Link::new(0, 1);

        link.apply_force(&mut nodes);

        assert_eq!(nodes[0].force, Vec2::new(3.0, 1.0));
        assert_eq!(nodes[1].force, Vec2::new(-3.0, -1.0));
    }

    #[test]
    fn pinned_endpoint_receives_no_force() {
        let mut nodes = vec![
            Node::new(Vec2::new(0.0, 0.0), true),
            Node::new(Vec2::new(2.0, 0.0), false),
        ];
        let link = Link::new(0, 1);

        link.apply_force(&mut nodes);

        assert_eq!(nodes[0].force, Vec2::ZERO);
        assert_eq!(nodes[1].force, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn force_is_equal_and_opposite_for_random_positions() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let p = Vec2::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
            let q = Vec2::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
            let mut nodes = vec![Node::new(p, false), Node::new(q, false)];

            Link::new(0, 1).apply_force(&mut nodes);

            assert_eq!(nodes[0].force + nodes[1].force, Vec2::ZERO);
            assert_eq!(nodes[0].force, q - p);
        }
    }

    #[test]
    fn midpoint_is_mean_of_endpoints() {
        let nodes = vec![
            Node::new(Vec2::new(0.0, 0.0), false),
            Node::new(Vec2::new(4.0, 2.0), false),
        ];
        assert_eq!(Link::new(0, 1).midpoint(&nodes), Vec2::new(2.0, 1.0));
    }
}
