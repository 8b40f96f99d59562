//! Cutting and timed recovery of links.
//!
//! A link is either *active* (present in `Grid::links`, exerting force
//! and drawn) or *broken* (parked here with the time it was cut). The
//! only transitions are:
//!
//! - active → broken, when the pointer comes close to its midpoint
//!   ([`CutRegistry::test_cuts`]);
//! - broken → active, once the recovery delay has elapsed
//!   ([`CutRegistry::process_recoveries`]).
//!
//! A broken link is absent from the active set, so it can't be cut twice,
//! and recovery is unconditional.

use std::time::Duration;

use crate::{link::Link, node::Node};
use glam::Vec2;
use tracing::trace;

/// A cut link waiting to be reinserted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrokenLink {
    pub link: Link,
    pub broken_at: Duration,
}

#[derive(Debug, Default)]
pub struct CutRegistry {
    broken: Vec<BrokenLink>,
}

impl CutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cuts every active link whose midpoint is within `radius` of `pointer`.
    ///
    /// Cut links are removed from `links`, keeping the order of the rest,
    /// and recorded with timestamp `now`.
    ///
    /// ### Returns
    /// The number of links cut by this call.
    pub fn test_cuts(
        &mut self,
        links: &mut Vec<Link>,
        nodes: &[Node],
        pointer: Vec2,
        radius: f32,
        now: Duration,
    ) -> usize {
        let before = self.broken.len();

        links.retain(|link| {
            let near = link.midpoint(nodes).distance(pointer) < radius;
            if near {
                trace!(a = link.a, b = link.b, "link cut");
                self.broken.push(BrokenLink {
                    link: *link,
                    broken_at: now,
                });
            }
            !near
        });

        self.broken.len() - before
    }

    /// Reinserts every broken link that has been broken for at least `delay`.
    ///
    /// The boundary is inclusive: a link cut at `t` is active again at
    /// exactly `t + delay`.
    ///
    /// Recovered links are appended to `links` in the order they were cut.
    ///
    /// ### Returns
    /// The number of links recovered by this call.
    pub fn process_recoveries(
        &mut self,
        links: &mut Vec<Link>,
        now: Duration,
        delay: Duration,
    ) -> usize {
        let before = links.len();

        self.broken.retain(|b| {
            let due = now.saturating_sub(b.broken_at) >= delay;
            if due {
                trace!(a = b.link.a, b = b.link.b, "link recovered");
                debug_assert!(!links.contains(&b.link), "recovered link already active");
                links.push(b.link);
            }
            !due
        });

        links.len() - before
    }

    /// Reinserts every broken link immediately.
    pub fn clear(&mut self, links: &mut Vec<Link>) {
        links.extend(self.broken.drain(..).map(|b| b.link));
    }

    /// Drops every broken link without reinserting it.
    ///
    /// Only for when the links' grid itself is being discarded.
    pub fn forget(&mut self) {
        self.broken.clear();
    }

    pub fn broken_count(&self) -> usize {
        self.broken.len()
    }

    pub fn broken(&self) -> impl Iterator<Item = &BrokenLink> + '_ {
        self.broken.iter()
    }

    pub fn is_broken(&self, link: &Link) -> bool {
        self.broken.iter().any(|b| b.link == *link)
    }
}
