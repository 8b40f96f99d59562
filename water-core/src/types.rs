/// Identifier for a node in a [`crate::grid::Grid`].
///
/// This is an index into `Grid::nodes`, and is only meaningful within
/// the lifetime of a given `Grid` instance. Rebuilding the grid
/// invalidates every id handed out before.
pub type NodeId = usize;
