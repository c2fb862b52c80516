//! Grid dimensions and the rank/coordinate bijection.

use skywatch_core::{GridCoord, Vector};

use crate::error::GridError;
use crate::neighbors::NeighborSet;

/// Validated dimensions of the sensor grid.
///
/// Workers are ranked in row-major canonical order:
/// `(0,0), (0,1), ..., (rows-1, cols-1)`. Rank 0 sits in the top-left
/// corner, which also holds the largest y world position — the vertical
/// world axis runs opposite to the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    rows: u32,
    cols: u32,
}

impl GridDims {
    /// Maximum dimension size: coordinates must survive conversion to
    /// signed world units.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create grid dimensions, rejecting empty and oversized grids.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        if rows > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of grid cells, i.e. the worker-group size.
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Map a worker rank to its grid coordinate (row-major).
    ///
    /// # Panics
    ///
    /// Panics if `rank >= cell_count()`. An out-of-range rank is a
    /// programming-contract violation, not a runtime condition.
    pub fn coord_of(&self, rank: usize) -> GridCoord {
        assert!(
            rank < self.cell_count(),
            "rank {rank} out of range for {}x{} grid",
            self.rows,
            self.cols,
        );
        let cols = self.cols as usize;
        GridCoord::new((rank / cols) as u32, (rank % cols) as u32)
    }

    /// Map a grid coordinate back to its worker rank. Inverse of
    /// [`coord_of`](Self::coord_of).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn rank_of(&self, coord: GridCoord) -> usize {
        assert!(
            coord.row < self.rows && coord.col < self.cols,
            "coordinate {coord} out of range for {}x{} grid",
            self.rows,
            self.cols,
        );
        (coord.row as usize) * (self.cols as usize) + coord.col as usize
    }

    /// The up-to-4 valid neighbors of a cell, with strict boundary tests:
    /// row 0 has no up neighbor, row `rows-1` no down, col 0 no left,
    /// col `cols-1` no right.
    pub fn neighbors(&self, coord: GridCoord) -> NeighborSet {
        let up = (coord.row > 0).then(|| GridCoord::new(coord.row - 1, coord.col));
        let right = (coord.col + 1 < self.cols).then(|| GridCoord::new(coord.row, coord.col + 1));
        let down = (coord.row + 1 < self.rows).then(|| GridCoord::new(coord.row + 1, coord.col));
        let left = (coord.col > 0).then(|| GridCoord::new(coord.row, coord.col - 1));
        NeighborSet::new([up, right, down, left])
    }

    /// A cell's fixed world position given the inter-node separation:
    /// `x = col * sep`, `y = (rows - 1 - row) * sep` (row 0 is the top
    /// row of the survey area).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn world_position(&self, coord: GridCoord, node_sep: u32) -> Vector {
        assert!(
            coord.row < self.rows && coord.col < self.cols,
            "coordinate {coord} out of range for {}x{} grid",
            self.rows,
            self.cols,
        );
        let sep = i64::from(node_sep);
        let x = i64::from(coord.col) * sep;
        let y = i64::from(self.rows - 1 - coord.row) * sep;
        Vector::new(x as i32, y as i32)
    }

    /// Iterate all coordinates in row-major canonical (rank) order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.cell_count()).map(|rank| self.coord_of(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skywatch_core::Direction;

    fn c(row: u32, col: u32) -> GridCoord {
        GridCoord::new(row, col)
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_zero_rows_returns_error() {
        assert_eq!(GridDims::new(0, 5), Err(GridError::EmptyGrid));
    }

    #[test]
    fn new_zero_cols_returns_error() {
        assert_eq!(GridDims::new(5, 0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn new_rejects_dims_exceeding_max() {
        let big = GridDims::MAX_DIM + 1;
        assert!(matches!(
            GridDims::new(big, 5),
            Err(GridError::DimensionTooLarge { name: "rows", .. })
        ));
        assert!(matches!(
            GridDims::new(5, big),
            Err(GridError::DimensionTooLarge { name: "cols", .. })
        ));
    }

    // ── Rank/coordinate bijection ───────────────────────────────

    #[test]
    fn coord_of_is_row_major() {
        let dims = GridDims::new(4, 5).unwrap();
        assert_eq!(dims.coord_of(0), c(0, 0));
        assert_eq!(dims.coord_of(4), c(0, 4));
        assert_eq!(dims.coord_of(5), c(1, 0));
        assert_eq!(dims.coord_of(19), c(3, 4));
    }

    #[test]
    fn rank_of_inverts_coord_of() {
        let dims = GridDims::new(4, 5).unwrap();
        for rank in 0..dims.cell_count() {
            assert_eq!(dims.rank_of(dims.coord_of(rank)), rank);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn coord_of_out_of_range_rank_panics() {
        GridDims::new(2, 2).unwrap().coord_of(4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn rank_of_out_of_range_coord_panics() {
        GridDims::new(2, 2).unwrap().rank_of(c(2, 0));
    }

    // ── Neighbor tests ──────────────────────────────────────────

    #[test]
    fn neighbors_interior() {
        let dims = GridDims::new(4, 5).unwrap();
        let n = dims.neighbors(c(1, 2));
        assert_eq!(n.len(), 4);
        assert_eq!(n.get(Direction::Up), Some(c(0, 2)));
        assert_eq!(n.get(Direction::Right), Some(c(1, 3)));
        assert_eq!(n.get(Direction::Down), Some(c(2, 2)));
        assert_eq!(n.get(Direction::Left), Some(c(1, 1)));
    }

    #[test]
    fn neighbors_corner() {
        let dims = GridDims::new(4, 5).unwrap();
        let n = dims.neighbors(c(0, 0));
        assert_eq!(n.len(), 2);
        assert_eq!(n.get(Direction::Up), None);
        assert_eq!(n.get(Direction::Left), None);
        assert_eq!(n.get(Direction::Right), Some(c(0, 1)));
        assert_eq!(n.get(Direction::Down), Some(c(1, 0)));
    }

    #[test]
    fn neighbors_edge() {
        let dims = GridDims::new(4, 5).unwrap();
        let n = dims.neighbors(c(0, 2));
        assert_eq!(n.len(), 3);
        assert_eq!(n.get(Direction::Up), None);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let dims = GridDims::new(1, 1).unwrap();
        assert!(dims.neighbors(c(0, 0)).is_empty());
    }

    // ── World position tests ────────────────────────────────────

    #[test]
    fn world_position_inverts_row_axis() {
        // Reference configuration: 4x5 grid, 125-unit separation.
        let dims = GridDims::new(4, 5).unwrap();
        assert_eq!(dims.world_position(c(0, 0), 125), Vector::new(0, 375));
        assert_eq!(dims.world_position(c(3, 0), 125), Vector::new(0, 0));
        assert_eq!(dims.world_position(c(1, 2), 125), Vector::new(250, 250));
        assert_eq!(dims.world_position(c(3, 4), 125), Vector::new(500, 0));
    }

    #[test]
    fn world_positions_are_node_sep_apart() {
        let dims = GridDims::new(4, 5).unwrap();
        let a = dims.world_position(c(1, 2), 125);
        for n in dims.neighbors(c(1, 2)).present() {
            let b = dims.world_position(n.1, 125);
            assert_eq!(a.distance_to(b), 125.0);
        }
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn neighbor_count_is_four_minus_boundary_edges(
            rows in 1u32..12,
            cols in 1u32..12,
            row in 0u32..12,
            col in 0u32..12,
        ) {
            let row = row % rows;
            let col = col % cols;
            let dims = GridDims::new(rows, cols).unwrap();
            let boundary_edges = usize::from(row == 0)
                + usize::from(row == rows - 1)
                + usize::from(col == 0)
                + usize::from(col == cols - 1);
            prop_assert_eq!(dims.neighbors(GridCoord::new(row, col)).len(), 4 - boundary_edges);
        }

        #[test]
        fn neighbors_symmetric(
            rows in 1u32..12,
            cols in 1u32..12,
            row in 0u32..12,
            col in 0u32..12,
        ) {
            let row = row % rows;
            let col = col % cols;
            let dims = GridDims::new(rows, cols).unwrap();
            let coord = GridCoord::new(row, col);
            for (_, nb) in dims.neighbors(coord).present() {
                prop_assert!(
                    dims.neighbors(nb).contains(coord),
                    "neighbor symmetry violated: {} in N({}) but {} not in N({})",
                    nb, coord, coord, nb,
                );
            }
        }

        #[test]
        fn rank_coord_bijection(rows in 1u32..12, cols in 1u32..12) {
            let dims = GridDims::new(rows, cols).unwrap();
            let mut seen = vec![false; dims.cell_count()];
            for coord in dims.coords() {
                let rank = dims.rank_of(coord);
                prop_assert!(!seen[rank], "rank {} produced twice", rank);
                seen[rank] = true;
                prop_assert_eq!(dims.coord_of(rank), coord);
            }
            prop_assert!(seen.into_iter().all(|s| s));
        }
    }
}
