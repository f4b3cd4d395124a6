//! Dense occupancy grid tracking the solid entities on the depot floor.

use depot_core::{CellCoord, GridSize, OccupantKind, RoverId};

/// Solid occupant pinned to a single cell.
///
/// Beacons never block traversal and are tracked separately by the world,
/// so the grid only stores the occupants that exclude others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Blocker {
    Rover(RoverId),
    Pallet,
}

impl Blocker {
    pub(crate) fn kind(self) -> OccupantKind {
        match self {
            Blocker::Rover(_) => OccupantKind::Rover,
            Blocker::Pallet => OccupantKind::Pallet,
        }
    }
}

/// Row-major grid of solid occupants mirroring the configured dimensions.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    size: GridSize,
    cells: Vec<Option<Blocker>>,
}

impl OccupancyGrid {
    pub(crate) fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    /// Solid occupant stored at the provided cell, if any.
    pub(crate) fn blocker(&self, cell: CellCoord) -> Option<Blocker> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether an occupant of `kind` could legally enter the cell.
    ///
    /// Combines the bounds check with the occupancy-compatibility table.
    /// The `exempt` rover is treated as absent so a rover never blocks
    /// itself while its own routes are evaluated.
    pub(crate) fn admits(
        &self,
        cell: CellCoord,
        kind: OccupantKind,
        exempt: Option<RoverId>,
    ) -> bool {
        if !self.size.contains(cell) {
            return false;
        }
        match self.blocker(cell) {
            None => true,
            Some(Blocker::Rover(id)) if exempt == Some(id) => true,
            Some(blocker) => kind.can_share(blocker.kind()),
        }
    }

    pub(crate) fn occupy(&mut self, cell: CellCoord, blocker: Blocker) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(blocker);
            }
        }
    }

    pub(crate) fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    pub(crate) fn size(&self) -> GridSize {
        self.size
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.size.columns()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
