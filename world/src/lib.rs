#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative depot floor state for the Depot Rover engine.
//!
//! The world owns the occupancy grid, the rovers and their charge ledgers,
//! and executes [`Command`] values deterministically, broadcasting [`Event`]
//! values for callers to react to. The routing systems never touch this
//! crate's mutable state; they consume the read-only snapshots and legality
//! closures produced by the [`query`] module.

mod occupancy;

use depot_core::{
    CellCoord, Charge, Command, CostProfile, Direction, Event, GridSize, Mass, OccupantKind,
    PlacementRejection, RoverId, StepRejection,
};
use occupancy::{Blocker, OccupancyGrid};

const DEFAULT_GRID_SIZE: GridSize = GridSize::new(10, 10);

/// Represents the authoritative depot floor state.
#[derive(Debug)]
pub struct World {
    size: GridSize,
    occupancy: OccupancyGrid,
    rovers: Vec<Rover>,
    beacons: Vec<CellCoord>,
    next_rover: u32,
}

impl World {
    /// Creates a new depot floor ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            occupancy: OccupancyGrid::new(DEFAULT_GRID_SIZE),
            rovers: Vec::new(),
            beacons: Vec::new(),
            next_rover: 0,
        }
    }

    fn rover_index(&self, rover: RoverId) -> Option<usize> {
        self.rovers.iter().position(|entry| entry.id == rover)
    }

    fn rover_mut(&mut self, rover: RoverId) -> Option<&mut Rover> {
        self.rovers.iter_mut().find(|entry| entry.id == rover)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state
/// deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { columns, rows } => {
            world.size = GridSize::new(columns, rows);
            world.occupancy = OccupancyGrid::new(world.size);
            world.rovers.clear();
            world.beacons.clear();
            world.next_rover = 0;
            out_events.push(Event::GridConfigured { size: world.size });
        }
        Command::SpawnRover {
            cell,
            facing,
            capacity,
            charge,
            costs,
        } => {
            if !world.size.contains(cell) {
                out_events.push(Event::SpawnRejected {
                    cell,
                    reason: PlacementRejection::OutOfBounds,
                });
                return;
            }
            if !world.occupancy.admits(cell, OccupantKind::Rover, None) {
                out_events.push(Event::SpawnRejected {
                    cell,
                    reason: PlacementRejection::Occupied,
                });
                return;
            }

            let id = RoverId::new(world.next_rover);
            world.next_rover = world.next_rover.saturating_add(1);
            world.occupancy.occupy(cell, Blocker::Rover(id));
            world.rovers.push(Rover {
                id,
                cell,
                facing,
                charge: charge.min(capacity),
                capacity,
                carried: Mass::ZERO,
                costs,
                retired: false,
            });
            out_events.push(Event::RoverSpawned {
                rover: id,
                cell,
                facing,
            });
        }
        Command::PlacePallet { cell } => {
            if !world.size.contains(cell) {
                out_events.push(Event::PalletRejected {
                    cell,
                    reason: PlacementRejection::OutOfBounds,
                });
                return;
            }
            if !world.occupancy.admits(cell, OccupantKind::Pallet, None) {
                out_events.push(Event::PalletRejected {
                    cell,
                    reason: PlacementRejection::Occupied,
                });
                return;
            }

            world.occupancy.occupy(cell, Blocker::Pallet);
            out_events.push(Event::PalletPlaced { cell });
        }
        Command::DropBeacon { cell } => {
            if !world.size.contains(cell) {
                out_events.push(Event::BeaconRejected {
                    cell,
                    reason: PlacementRejection::OutOfBounds,
                });
                return;
            }
            if !world.beacons.contains(&cell) {
                world.beacons.push(cell);
            }
            out_events.push(Event::BeaconDropped { cell });
        }
        Command::LoadPayload { rover, mass } => {
            if let Some(entry) = world.rover_mut(rover) {
                if entry.retired {
                    return;
                }
                entry.carried = entry.carried.saturating_add(mass);
                out_events.push(Event::PayloadLoaded {
                    rover,
                    carried: entry.carried,
                });
            }
        }
        Command::UnloadPayload { rover, mass } => {
            if let Some(entry) = world.rover_mut(rover) {
                if entry.retired {
                    return;
                }
                entry.carried = entry.carried.saturating_sub(mass);
                out_events.push(Event::PayloadUnloaded {
                    rover,
                    carried: entry.carried,
                });
            }
        }
        Command::Recharge { rover, amount } => {
            if let Some(entry) = world.rover_mut(rover) {
                if entry.retired {
                    return;
                }
                entry.credit(amount);
                out_events.push(Event::Recharged {
                    rover,
                    stored: entry.charge,
                });
            }
        }
        Command::StepRover { rover, direction } => {
            let Some(index) = world.rover_index(rover) else {
                out_events.push(Event::StepRejected {
                    rover,
                    reason: StepRejection::UnknownRover,
                });
                return;
            };
            if world.rovers[index].retired {
                out_events.push(Event::StepRejected {
                    rover,
                    reason: StepRejection::RetiredRover,
                });
                return;
            }

            let from = world.rovers[index].cell;
            let destination = match direction.step_from(from) {
                Some(cell) if world.size.contains(cell) => cell,
                _ => {
                    out_events.push(Event::StepRejected {
                        rover,
                        reason: StepRejection::OutOfBounds,
                    });
                    return;
                }
            };
            if !world
                .occupancy
                .admits(destination, OccupantKind::Rover, Some(rover))
            {
                out_events.push(Event::StepRejected {
                    rover,
                    reason: StepRejection::Blocked,
                });
                return;
            }

            let price = world.rovers[index].costs.price_step(
                world.rovers[index].facing,
                direction,
                world.rovers[index].carried,
            );
            if !world.rovers[index].debit(price) {
                out_events.push(Event::StepRejected {
                    rover,
                    reason: StepRejection::InsufficientCharge,
                });
                return;
            }

            world.occupancy.vacate(from);
            world.occupancy.occupy(destination, Blocker::Rover(rover));
            world.rovers[index].cell = destination;
            world.rovers[index].facing = direction;
            out_events.push(Event::RoverStepped {
                rover,
                from,
                to: destination,
                facing: direction,
                spent: price,
            });
        }
        Command::RetireRover { rover } => {
            if let Some(entry) = world.rover_mut(rover) {
                if entry.retired {
                    return;
                }
                entry.retired = true;
                let cell = entry.cell;
                world.occupancy.vacate(cell);
                out_events.push(Event::RoverRetired { rover, cell });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{occupancy::OccupancyGrid, World};
    use depot_core::{CellCoord, GridSize, OccupantKind, RoverId, RoverSnapshot, RoverView};

    /// Dimensions of the configured cell grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.size
    }

    /// Captures a read-only view of the rovers on the floor.
    #[must_use]
    pub fn rover_view(world: &World) -> RoverView {
        RoverView::from_snapshots(
            world
                .rovers
                .iter()
                .map(|entry| entry.snapshot(world.size))
                .collect(),
        )
    }

    /// Snapshot of a single rover, if it exists.
    #[must_use]
    pub fn rover_snapshot(world: &World, rover: RoverId) -> Option<RoverSnapshot> {
        world
            .rovers
            .iter()
            .find(|entry| entry.id == rover)
            .map(|entry| entry.snapshot(world.size))
    }

    /// Cells currently marked by beacons.
    #[must_use]
    pub fn beacons(world: &World) -> &[CellCoord] {
        &world.beacons
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        OccupancyView {
            grid: &world.occupancy,
        }
    }

    /// Builds the legality closure consumed by the routing systems.
    ///
    /// The closure combines the bounds check with the occupancy
    /// compatibility table and treats the rover's own cell as free. It must
    /// only be used against an unchanging world; routes computed through it
    /// describe a point-in-time snapshot.
    pub fn legality_for(world: &World, rover: RoverId) -> impl Fn(CellCoord) -> bool + '_ {
        move |cell| world.occupancy.admits(cell, OccupantKind::Rover, Some(rover))
    }

    /// Read-only view into the dense occupancy grid.
    #[derive(Clone, Copy, Debug)]
    pub struct OccupancyView<'a> {
        grid: &'a OccupancyGrid,
    }

    impl<'a> OccupancyView<'a> {
        /// Category of the solid occupant at the provided cell, if any.
        #[must_use]
        pub fn occupant_kind(&self, cell: CellCoord) -> Option<OccupantKind> {
            self.grid.blocker(cell).map(|blocker| blocker.kind())
        }

        /// Rover occupying the provided cell, if any.
        #[must_use]
        pub fn rover_at(&self, cell: CellCoord) -> Option<RoverId> {
            match self.grid.blocker(cell) {
                Some(super::Blocker::Rover(id)) => Some(id),
                _ => None,
            }
        }

        /// Reports whether the cell lies in bounds and hosts no solid
        /// occupant.
        #[must_use]
        pub fn is_free(&self, cell: CellCoord) -> bool {
            self.grid.size().contains(cell) && self.grid.blocker(cell).is_none()
        }

        /// Provides the dimensions of the underlying occupancy grid.
        #[must_use]
        pub fn dimensions(&self) -> GridSize {
            self.grid.size()
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Rover {
    id: RoverId,
    cell: CellCoord,
    facing: Direction,
    charge: Charge,
    capacity: Charge,
    carried: Mass,
    costs: CostProfile,
    retired: bool,
}

impl Rover {
    fn snapshot(&self, grid: GridSize) -> depot_core::RoverSnapshot {
        depot_core::RoverSnapshot {
            id: self.id,
            grid,
            cell: self.cell,
            facing: self.facing,
            charge: self.charge,
            carried: self.carried,
            costs: self.costs,
            retired: self.retired,
        }
    }

    fn debit(&mut self, amount: Charge) -> bool {
        match self.charge.checked_sub(amount) {
            Some(rest) => {
                self.charge = rest;
                true
            }
            None => false,
        }
    }

    fn credit(&mut self, amount: Charge) {
        self.charge = self.charge.saturating_add(amount).min(self.capacity);
    }
}
