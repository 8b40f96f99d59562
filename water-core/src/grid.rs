use crate::{
    config::Config,
    error::{ConfigError, Result},
    link::Link,
    node::Node,
    types::NodeId,
};
use glam::Vec2;
use tracing::debug;

/// Largest lattice [`Grid::build`] accepts, in nodes.
pub const MAX_NODES: usize = 1 << 24;

/// The lattice of nodes and the set of currently active links.
///
/// Nodes are stored row-major over a `(rows + 1) x (columns + 1)`
/// lattice, so the node at `(row, col)` lives at
/// `row * (columns + 1) + col`. Boundary nodes are pinned.
///
/// `links` only holds the *active* links; cut links are parked in a
/// [`crate::registry::CutRegistry`] until they recover.
#[derive(Clone, Debug)]
pub struct Grid {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    rows: usize,
    columns: usize,
    width: f32,
    height: f32,
}

impl Grid {
    /// Builds the lattice covering a `width x height` surface.
    ///
    /// The cell counts are `floor(width / cell_size)` and
    /// `floor(height / cell_size)`. Nodes are interpolated across the
    /// full surface, so when the division is not exact the cells are
    /// stretched slightly and the last row and column still sit on the
    /// boundary.
    ///
    /// Each node links to its right and bottom neighbours, skipping
    /// pairs where both ends are pinned since they can never move.
    /// A surface smaller than one cell in either direction gives an
    /// empty grid.
    ///
    /// ### Errors
    /// Returns a [`ConfigError`] when `cfg` fails [`Config::validate`],
    /// the dimensions are not finite, or the lattice would exceed
    /// [`MAX_NODES`].
    pub fn build(width: f32, height: f32, cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        if !(width.is_finite() && height.is_finite()) {
            return Err(ConfigError::SurfaceSize { width, height });
        }

        let columns = cell_count(width, cfg.cell_size);
        let rows = cell_count(height, cfg.cell_size);

        if rows == 0 || columns == 0 {
            debug!(width, height, "surface smaller than one cell, grid is empty");
            return Ok(Self {
                nodes: Vec::new(),
                links: Vec::new(),
                rows: 0,
                columns: 0,
                width,
                height,
            });
        }

        let node_count = (rows + 1)
            .checked_mul(columns + 1)
            .filter(|&n| n <= MAX_NODES)
            .ok_or(ConfigError::SurfaceTooLarge {
                width,
                height,
                cell_size: cfg.cell_size,
            })?;

        let mut nodes = Vec::with_capacity(node_count);
        for row in 0..=rows {
            for col in 0..=columns {
                let x = col as f32 / columns as f32 * width;
                let y = row as f32 / rows as f32 * height;
                let pinned = row == 0 || col == 0 || row == rows || col == columns;
                nodes.push(Node::new(Vec2::new(x, y), pinned));
            }
        }

        let stride = columns + 1;
        let mut links = Vec::with_capacity(2 * rows * columns);
        for row in 0..=rows {
            for col in 0..=columns {
                let id = row * stride + col;

                if col < columns {
                    push_link(&mut links, &nodes, id, id + 1);
                }
                if row < rows {
                    push_link(&mut links, &nodes, id, id + stride);
                }
            }
        }

        debug!(
            rows,
            columns,
            nodes = nodes.len(),
            links = links.len(),
            "built water grid"
        );

        Ok(Self {
            nodes,
            links,
            rows,
            columns,
            width,
            height,
        })
    }

    /// Number of cells down; the lattice has `rows + 1` node rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells across; the lattice has `columns + 1` node columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Id of the node at `(row, col)`, or `None` outside the lattice.
    pub fn index(&self, row: usize, col: usize) -> Option<NodeId> {
        if self.nodes.is_empty() || row > self.rows || col > self.columns {
            return None;
        }
        Some(row * (self.columns + 1) + col)
    }

    pub fn node_at(&self, row: usize, col: usize) -> Option<&Node> {
        self.index(row, col).map(|id| &self.nodes[id])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Whole cells along one axis, saturating at `usize::MAX - 1` so the
/// node count `cells + 1` never overflows.
fn cell_count(extent: f32, cell_size: f32) -> usize {
    let n = (extent / cell_size).floor();
    if n >= 1.0 {
        (n as usize).min(usize::MAX - 1)
    } else {
        0
    }
}

fn push_link(links: &mut Vec<Link>, nodes: &[Node], a: NodeId, b: NodeId) {
    if nodes[a].is_pinned() && nodes[b].is_pinned() {
        return;
    }
    links.push(Link::new(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cfg() -> Config {
        Config::default()
    }

    /// Counts every right/bottom neighbour pair that is not pinned-pinned.
    fn expected_links(grid: &Grid) -> usize {
        let mut count = 0;
        for row in 0..=grid.rows() {
            for col in 0..=grid.columns() {
                let here = grid.node_at(row, col).unwrap();
                if let Some(right) = grid.node_at(row, col + 1)
                    && !(here.is_pinned() && right.is_pinned())
                {
                    count += 1;
                }
                if let Some(below) = grid.node_at(row + 1, col)
                    && !(here.is_pinned() && below.is_pinned())
                {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn two_by_two_grid_has_one_free_node_and_four_links() {
        let grid = Grid::build(80.0, 80.0, &cfg()).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.nodes.len(), 9);

        let free: Vec<NodeId> = (0..9).filter(|&i| !grid.nodes[i].is_pinned()).collect();
        assert_eq!(free, vec![4]);
        assert_eq!(grid.nodes[4].pos, Vec2::new(40.0, 40.0));

        // Only the centre's four spokes survive the pinned-pinned rule.
        let links: HashSet<Link> = grid.links.iter().copied().collect();
        let expected: HashSet<Link> = [
            Link::new(1, 4),
            Link::new(3, 4),
            Link::new(4, 5),
            Link::new(4, 7),
        ]
        .into_iter()
        .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn node_and_link_counts_match_topology() {
        for (w, h) in [(120.0, 80.0), (400.0, 200.0), (40.0, 200.0), (1000.0, 760.0)] {
            let grid = Grid::build(w, h, &cfg()).unwrap();
            let (r, c) = (grid.rows(), grid.columns());

            assert_eq!(grid.nodes.len(), (r + 1) * (c + 1));
            assert_eq!(grid.links.len(), expected_links(&grid));
            if r >= 2 && c >= 2 {
                // Adjacent pairs minus the 2C + 2R pinned-pinned boundary pairs.
                assert_eq!(grid.links.len(), 2 * r * c - r - c);
            }
        }
    }

    #[test]
    fn only_boundary_nodes_are_pinned() {
        let grid = Grid::build(200.0, 160.0, &cfg()).unwrap();
        for row in 0..=grid.rows() {
            for col in 0..=grid.columns() {
                let boundary =
                    row == 0 || col == 0 || row == grid.rows() || col == grid.columns();
                assert_eq!(grid.node_at(row, col).unwrap().is_pinned(), boundary);
            }
        }
    }

    #[test]
    fn no_link_joins_two_pinned_nodes() {
        let grid = Grid::build(360.0, 280.0, &cfg()).unwrap();
        for l in &grid.links {
            assert_ne!(l.a, l.b);
            assert!(!(grid.nodes[l.a].is_pinned() && grid.nodes[l.b].is_pinned()));
        }
    }

    #[test]
    fn fractional_counts_stretch_across_full_surface() {
        // 130 / 40 = 3.25 cells across, 90 / 40 = 2.25 cells down.
        let grid = Grid::build(130.0, 90.0, &cfg()).unwrap();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 2);

        let corner = grid.node_at(2, 3).unwrap();
        assert_eq!(corner.pos, Vec2::new(130.0, 90.0));
        assert!(corner.is_pinned());
    }

    #[test]
    fn build_is_deterministic() {
        let a = Grid::build(333.0, 222.0, &cfg()).unwrap();
        let b = Grid::build(333.0, 222.0, &cfg()).unwrap();
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.links, b.links);
    }

    #[test]
    fn surface_smaller_than_a_cell_is_empty() {
        for (w, h) in [(0.0, 100.0), (100.0, 0.0), (39.0, 400.0), (-80.0, 80.0)] {
            let grid = Grid::build(w, h, &cfg()).unwrap();
            assert!(grid.is_empty());
            assert!(grid.links.is_empty());
            assert_eq!(grid.index(0, 0), None);
        }
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut bad = cfg();
        bad.cell_size = 0.0;
        assert_eq!(
            Grid::build(100.0, 100.0, &bad).unwrap_err(),
            ConfigError::CellSize(0.0)
        );

        assert!(matches!(
            Grid::build(f32::INFINITY, 100.0, &cfg()),
            Err(ConfigError::SurfaceSize { .. })
        ));
    }

    #[test]
    fn huge_surface_is_rejected_without_allocating() {
        let err = Grid::build(1e20, 1e20, &cfg()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::SurfaceTooLarge {
                width: 1e20,
                height: 1e20,
                cell_size: 40.0,
            }
        );

        // Overflows neither axis alone, but the product is over the cap.
        let side = 40.0 * 5000.0;
        assert!(matches!(
            Grid::build(side, side, &cfg()),
            Err(ConfigError::SurfaceTooLarge { .. })
        ));
    }

    #[test]
    fn index_is_row_major() {
        let grid = Grid::build(160.0, 80.0, &cfg()).unwrap();
        assert_eq!(grid.index(1, 2), Some(7));
        assert_eq!(grid.index(2, 4), Some(14));
        assert_eq!(grid.index(3, 0), None);
        assert_eq!(grid.index(0, 5), None);
    }
}
