//! Per-direction neighbor slots of a single grid cell.

use skywatch_core::{Direction, GridCoord};
use smallvec::SmallVec;

/// The up-to-4 neighbors of one cell, one slot per compass direction in
/// [`Direction::ALL`] order. A slot beyond the grid boundary is absent,
/// not a sentinel value.
///
/// Computed once at startup by
/// [`GridDims::neighbors`](crate::GridDims::neighbors) and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborSet {
    slots: [Option<GridCoord>; 4],
}

impl NeighborSet {
    /// Build a neighbor set from per-direction slots.
    pub(crate) fn new(slots: [Option<GridCoord>; 4]) -> Self {
        Self { slots }
    }

    /// The neighbor in the given direction, if one exists.
    pub fn get(&self, direction: Direction) -> Option<GridCoord> {
        self.slots[direction.index()]
    }

    /// All four slots in direction order, absent entries included.
    pub fn slots(&self) -> &[Option<GridCoord>; 4] {
        &self.slots
    }

    /// The valid neighbors paired with their directions, in slot order.
    pub fn present(&self) -> SmallVec<[(Direction, GridCoord); 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.slots[dir.index()].map(|coord| (dir, coord)))
            .collect()
    }

    /// Number of valid neighbors: 2 at a corner, 3 on an edge, 4 in the
    /// interior.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the cell has no neighbors at all (only true on a 1x1 grid).
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Whether `coord` is one of this cell's neighbors.
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.slots.iter().any(|slot| *slot == Some(coord))
    }
}
