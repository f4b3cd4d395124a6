#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Depot Rover engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the routing systems: grid geometry, the charge
//! cost model, occupancy compatibility, read-only rover snapshots, and the
//! typed failure values the engine reports. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands
//! via its `apply` entry point and broadcasts [`Event`] values, while the
//! routing systems consume immutable snapshots plus a legality closure and
//! respond with priced routes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cardinal headings available to rovers, arranged in a fixed clockwise
/// cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Heading toward decreasing row indices.
    North,
    /// Heading toward increasing column indices.
    East,
    /// Heading toward increasing row indices.
    South,
    /// Heading toward decreasing column indices.
    West,
}

impl Direction {
    /// All headings in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    const fn clockwise_index(self) -> u32 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Number of 90-degree clockwise rotations required to face `to`.
    #[must_use]
    pub const fn turns_clockwise(self, to: Direction) -> u32 {
        (to.clockwise_index() + 4 - self.clockwise_index()) % 4
    }

    /// Minimum number of 90-degree rotations, in either rotational
    /// direction, required to face `to`.
    ///
    /// Three clockwise turns are never cheaper than one counter-clockwise
    /// turn, so the result is at most two.
    #[must_use]
    pub const fn efficient_turns(self, to: Direction) -> u32 {
        let clockwise = self.turns_clockwise(to);
        let counter = 4 - clockwise;
        if clockwise < counter {
            clockwise
        } else {
            counter
        }
    }

    /// Neighbouring coordinate one step along this heading.
    ///
    /// Returns `None` when the step would leave the coordinate space on a
    /// low edge; the high edges are bounded by [`GridSize::contains`].
    #[must_use]
    pub fn step_from(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Direction::North => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::East => cell
                .column()
                .checked_add(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Direction::South => cell
                .row()
                .checked_add(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::West => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
        }
    }

    /// Heading of a single-step move between two cells.
    ///
    /// Returns `None` when the cells are not exactly one grid step apart.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if to.row() > from.row() {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Dimensions of the cell grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns laid out in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows laid out in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Total number of cells addressable in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(0)
    }
}

/// Quantity of battery charge measured in engine units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Charge(u64);

impl Charge {
    /// A balance of zero charge units.
    pub const ZERO: Charge = Charge(0);

    /// Creates a new charge quantity with the provided unit count.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric unit count.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Sum of two quantities, saturating at the numeric ceiling.
    #[must_use]
    pub const fn saturating_add(self, other: Charge) -> Charge {
        Charge(self.0.saturating_add(other.0))
    }

    /// Difference of two quantities, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Charge) -> Charge {
        Charge(self.0.saturating_sub(other.0))
    }

    /// Difference of two quantities, or `None` when `other` exceeds the
    /// balance.
    #[must_use]
    pub fn checked_sub(self, other: Charge) -> Option<Charge> {
        self.0.checked_sub(other.0).map(Charge)
    }
}

/// Payload mass carried by a rover, measured in engine units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Mass(u32);

impl Mass {
    /// A payload of zero mass units.
    pub const ZERO: Mass = Mass(0);

    /// Creates a new mass quantity with the provided unit count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric unit count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Sum of two quantities, saturating at the numeric ceiling.
    #[must_use]
    pub const fn saturating_add(self, other: Mass) -> Mass {
        Mass(self.0.saturating_add(other.0))
    }

    /// Difference of two quantities, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Mass) -> Mass {
        Mass(self.0.saturating_sub(other.0))
    }
}

/// Caller-configured cost cores that price a rover's unit actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostProfile {
    turn_charge: Charge,
    step_charge: Charge,
    haul_rate: Charge,
    haul_unit: Mass,
}

impl CostProfile {
    /// Creates a new cost profile from its four configured cores.
    #[must_use]
    pub const fn new(
        turn_charge: Charge,
        step_charge: Charge,
        haul_rate: Charge,
        haul_unit: Mass,
    ) -> Self {
        Self {
            turn_charge,
            step_charge,
            haul_rate,
            haul_unit,
        }
    }

    /// Base price of a single 90-degree rotation.
    #[must_use]
    pub const fn turn_charge(&self) -> Charge {
        self.turn_charge
    }

    /// Base price of a single-cell translation.
    #[must_use]
    pub const fn step_charge(&self) -> Charge {
        self.step_charge
    }

    /// Surcharge added to a translation for each `haul_unit` of carried
    /// mass.
    #[must_use]
    pub const fn haul_rate(&self) -> Charge {
        self.haul_rate
    }

    /// Mass quantum against which the haul surcharge is measured.
    #[must_use]
    pub const fn haul_unit(&self) -> Mass {
        self.haul_unit
    }

    /// Prices a rotate-then-translate action.
    ///
    /// The rotation component is the efficient turn count between `facing`
    /// and `heading` multiplied by the turn core. The translation component
    /// is the step core plus a linear surcharge proportional to the carried
    /// mass; a zero `haul_unit` disables the surcharge. The result is never
    /// below the step core, which the routing search relies on as a lower
    /// bound per step.
    #[must_use]
    pub fn price_step(&self, facing: Direction, heading: Direction, carried: Mass) -> Charge {
        let rotation = self
            .turn_charge
            .get()
            .saturating_mul(u64::from(facing.efficient_turns(heading)));
        let haul = if self.haul_unit.get() == 0 {
            0
        } else {
            self.haul_rate
                .get()
                .saturating_mul(u64::from(carried.get()))
                / u64::from(self.haul_unit.get())
        };
        Charge::new(
            self.step_charge
                .get()
                .saturating_add(rotation)
                .saturating_add(haul),
        )
    }
}

/// Categories of entities that may appear on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    /// A mobile rover.
    Rover,
    /// A stored pallet blocking the cell it rests on.
    Pallet,
    /// A floor beacon that marks a cell without blocking it.
    Beacon,
}

impl OccupantKind {
    /// Reports whether two occupants may share a single cell.
    ///
    /// Beacons coexist with everything; rovers and pallets exclude every
    /// other solid occupant.
    #[must_use]
    pub const fn can_share(self, other: OccupantKind) -> bool {
        matches!(self, OccupantKind::Beacon) || matches!(other, OccupantKind::Beacon)
    }
}

/// Unique identifier assigned to a rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoverId(u32);

impl RoverId {
    /// Creates a new rover identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single rover's state consumed by the
/// routing systems.
///
/// The systems never mutate a rover; they price routes against this
/// point-in-time snapshot and leave all bookkeeping to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoverSnapshot {
    /// Unique identifier assigned to the rover.
    pub id: RoverId,
    /// Dimensions of the grid the rover inhabits.
    pub grid: GridSize,
    /// Grid cell currently occupied by the rover.
    pub cell: CellCoord,
    /// Heading the rover currently faces.
    pub facing: Direction,
    /// Charge balance available for spending.
    pub charge: Charge,
    /// Payload mass currently carried.
    pub carried: Mass,
    /// Cost cores configured for the rover.
    pub costs: CostProfile,
    /// Indicates whether the rover has been retired from the grid.
    pub retired: bool,
}

/// Read-only snapshot describing all rovers on the grid.
#[derive(Clone, Debug, Default)]
pub struct RoverView {
    snapshots: Vec<RoverSnapshot>,
}

impl RoverView {
    /// Creates a new rover view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RoverSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &RoverSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RoverSnapshot> {
        self.snapshots
    }
}

/// Ordered list of adjacent grid cells describing a legal path and its
/// total charge cost.
///
/// A route always starts at the rover's current cell; callers execute it
/// step by step against the live world, re-evaluating if occupancy may have
/// changed since the route was planned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    cells: Vec<CellCoord>,
    cost: Charge,
}

impl Route {
    /// Builds a route from an ordered cell sequence and its total cost.
    ///
    /// Returns `None` when the sequence is empty or any consecutive pair of
    /// cells is not exactly one grid step apart.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>, cost: Charge) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        let adjacent = cells
            .windows(2)
            .all(|pair| pair[0].manhattan_distance(pair[1]) == 1);
        if !adjacent {
            return None;
        }
        Some(Self { cells, cost })
    }

    /// Degenerate route that stays on the starting cell at zero cost.
    #[must_use]
    pub fn single(cell: CellCoord) -> Self {
        Self {
            cells: vec![cell],
            cost: Charge::ZERO,
        }
    }

    /// Cells visited by the route, starting cell included.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Total charge spent traversing the route.
    #[must_use]
    pub const fn cost(&self) -> Charge {
        self.cost
    }

    /// Final cell of the route.
    #[must_use]
    pub fn destination(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Number of translation steps along the route.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Failures surfaced by the single-agent router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RouteError {
    /// The rover has been retired from the grid and can no longer move.
    #[error("rover is retired and cannot be routed")]
    RetiredRover,
    /// The target cell is out of bounds or cannot legally host the rover,
    /// rejected before any search work begins.
    #[error("target cell is out of bounds or occupied by an incompatible entity")]
    InvalidTarget,
    /// No route was found before the search budget ran out. A genuinely
    /// unreachable goal and one merely too expensive to prove within the
    /// budget are observationally identical.
    #[error("no route found within the search budget")]
    Unreachable,
}

/// Failures surfaced by the rendezvous planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PairingError {
    /// A retired rover cannot participate in a rendezvous.
    #[error("a retired rover cannot participate in a rendezvous")]
    RetiredRover,
    /// A rover may not be paired with itself.
    #[error("a rover cannot rendezvous with itself")]
    SelfPairing,
    /// The two rovers inhabit differently sized grids.
    #[error("rovers inhabit differently sized grids")]
    GridMismatch,
    /// A rover's current cell fails its own legality check.
    #[error("a rover's current cell fails its own legality check")]
    MisplacedRover,
    /// A chosen destination could not be routed within the search budget.
    #[error("a chosen destination could not be routed within the search budget")]
    Unroutable,
}

/// Reasons the world may reject a requested rover step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum StepRejection {
    /// No rover with the provided identifier exists.
    #[error("no rover with the requested identifier exists")]
    UnknownRover,
    /// The rover has been retired and can no longer move.
    #[error("the rover is retired")]
    RetiredRover,
    /// The step would leave the configured grid.
    #[error("the step leaves the grid")]
    OutOfBounds,
    /// The destination cell hosts an incompatible occupant.
    #[error("the destination cell is occupied by an incompatible entity")]
    Blocked,
    /// The rover's charge balance cannot cover the priced step.
    #[error("the rover's charge balance cannot cover the step")]
    InsufficientCharge,
}

/// Reasons a spawn or placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementRejection {
    /// The requested cell lies outside the configured grid.
    #[error("the requested cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell hosts an incompatible occupant.
    #[error("the requested cell is occupied by an incompatible entity")]
    Occupied,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's cell grid using the provided dimensions,
    /// clearing all entities.
    ConfigureGrid {
        /// Number of cell columns laid out in the grid.
        columns: u32,
        /// Number of cell rows laid out in the grid.
        rows: u32,
    },
    /// Requests that a rover be spawned onto the grid.
    SpawnRover {
        /// Cell the rover should occupy after spawning.
        cell: CellCoord,
        /// Heading the rover faces after spawning.
        facing: Direction,
        /// Battery capacity that recharges clamp against.
        capacity: Charge,
        /// Initial charge balance, clamped at the capacity.
        charge: Charge,
        /// Cost cores configured for the rover.
        costs: CostProfile,
    },
    /// Places a pallet that blocks the cell it rests on.
    PlacePallet {
        /// Cell the pallet should occupy.
        cell: CellCoord,
    },
    /// Drops a beacon marker that never blocks traversal.
    DropBeacon {
        /// Cell the beacon should mark.
        cell: CellCoord,
    },
    /// Adds payload mass to a rover's load.
    LoadPayload {
        /// Identifier of the rover receiving the payload.
        rover: RoverId,
        /// Mass to add to the rover's load.
        mass: Mass,
    },
    /// Removes payload mass from a rover's load.
    UnloadPayload {
        /// Identifier of the rover shedding the payload.
        rover: RoverId,
        /// Mass to remove from the rover's load.
        mass: Mass,
    },
    /// Credits charge to a rover's battery, clamped at its capacity.
    Recharge {
        /// Identifier of the rover being recharged.
        rover: RoverId,
        /// Charge to credit to the battery.
        amount: Charge,
    },
    /// Requests that a rover rotate toward the provided heading and advance
    /// a single cell, debiting the priced cost from its battery.
    StepRover {
        /// Identifier of the rover attempting the step.
        rover: RoverId,
        /// Heading of travel for the attempted step.
        direction: Direction,
    },
    /// Removes a rover from the grid permanently.
    RetireRover {
        /// Identifier of the rover to retire.
        rover: RoverId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was reconfigured.
    GridConfigured {
        /// Dimensions the grid now spans.
        size: GridSize,
    },
    /// Confirms that a rover was spawned onto the grid.
    RoverSpawned {
        /// Identifier allocated to the rover by the world.
        rover: RoverId,
        /// Cell the rover occupies after spawning.
        cell: CellCoord,
        /// Heading the rover faces after spawning.
        facing: Direction,
    },
    /// Reports that a spawn request was rejected.
    SpawnRejected {
        /// Cell provided in the spawn request.
        cell: CellCoord,
        /// Specific reason the spawn failed.
        reason: PlacementRejection,
    },
    /// Confirms that a pallet was placed onto the grid.
    PalletPlaced {
        /// Cell the pallet occupies.
        cell: CellCoord,
    },
    /// Reports that a pallet placement request was rejected.
    PalletRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementRejection,
    },
    /// Confirms that a beacon was dropped onto the grid.
    BeaconDropped {
        /// Cell the beacon marks.
        cell: CellCoord,
    },
    /// Reports that a beacon drop request was rejected.
    BeaconRejected {
        /// Cell provided in the drop request.
        cell: CellCoord,
        /// Specific reason the drop failed.
        reason: PlacementRejection,
    },
    /// Confirms that payload mass was added to a rover's load.
    PayloadLoaded {
        /// Identifier of the rover that received the payload.
        rover: RoverId,
        /// Total mass carried after loading.
        carried: Mass,
    },
    /// Confirms that payload mass was removed from a rover's load.
    PayloadUnloaded {
        /// Identifier of the rover that shed the payload.
        rover: RoverId,
        /// Total mass carried after unloading.
        carried: Mass,
    },
    /// Confirms that a rover's battery was credited.
    Recharged {
        /// Identifier of the rover that was recharged.
        rover: RoverId,
        /// Balance stored after the credit was clamped at capacity.
        stored: Charge,
    },
    /// Confirms that a rover rotated and advanced a single cell.
    RoverStepped {
        /// Identifier of the rover that advanced.
        rover: RoverId,
        /// Cell the rover occupied before moving.
        from: CellCoord,
        /// Cell the rover occupies after completing the move.
        to: CellCoord,
        /// Heading the rover faces after the move.
        facing: Direction,
        /// Charge debited from the rover's battery for the step.
        spent: Charge,
    },
    /// Reports that a step request was rejected.
    StepRejected {
        /// Identifier of the rover that attempted the step.
        rover: RoverId,
        /// Specific reason the step failed.
        reason: StepRejection,
    },
    /// Confirms that a rover was retired from the grid.
    RoverRetired {
        /// Identifier of the rover that was retired.
        rover: RoverId,
        /// Cell the rover vacated.
        cell: CellCoord,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, Charge, CostProfile, Direction, GridSize, Mass, OccupantKind, PairingError,
        Route, RouteError, RoverId,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn efficient_turns_is_zero_on_the_diagonal() {
        for direction in Direction::ALL {
            assert_eq!(direction.efficient_turns(direction), 0);
        }
    }

    #[test]
    fn efficient_turns_never_exceeds_two() {
        for from in Direction::ALL {
            for to in Direction::ALL {
                let turns = from.efficient_turns(to);
                assert!(turns <= 2, "{from:?} -> {to:?} required {turns} turns");
                assert_eq!(turns, to.efficient_turns(from));
            }
        }
    }

    #[test]
    fn turns_clockwise_walks_the_cycle() {
        assert_eq!(Direction::North.turns_clockwise(Direction::East), 1);
        assert_eq!(Direction::North.turns_clockwise(Direction::South), 2);
        assert_eq!(Direction::North.turns_clockwise(Direction::West), 3);
        assert_eq!(Direction::West.turns_clockwise(Direction::North), 1);
        assert_eq!(Direction::North.efficient_turns(Direction::West), 1);
    }

    #[test]
    fn step_from_respects_low_edges() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(Direction::North.step_from(corner), None);
        assert_eq!(Direction::West.step_from(corner), None);
        assert_eq!(Direction::East.step_from(corner), Some(CellCoord::new(1, 0)));
        assert_eq!(
            Direction::South.step_from(corner),
            Some(CellCoord::new(0, 1))
        );
    }

    #[test]
    fn between_recovers_single_step_headings() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Some(Direction::East)
        );
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, CellCoord::new(5, 3)), None);
    }

    #[test]
    fn grid_size_bounds_are_exclusive() {
        let grid = GridSize::new(10, 10);
        assert!(grid.contains(CellCoord::new(0, 0)));
        assert!(grid.contains(CellCoord::new(9, 9)));
        assert!(!grid.contains(CellCoord::new(10, 9)));
        assert!(!grid.contains(CellCoord::new(9, 10)));
        assert_eq!(grid.cell_count(), 100);
    }

    fn profile() -> CostProfile {
        CostProfile::new(
            Charge::new(100),
            Charge::new(500),
            Charge::new(50),
            Mass::new(10),
        )
    }

    #[test]
    fn price_step_sums_rotation_and_translation() {
        let costs = profile();
        let straight = costs.price_step(Direction::North, Direction::North, Mass::ZERO);
        assert_eq!(straight, Charge::new(500));

        let quarter = costs.price_step(Direction::North, Direction::East, Mass::ZERO);
        assert_eq!(quarter, Charge::new(600));

        let half = costs.price_step(Direction::North, Direction::South, Mass::ZERO);
        assert_eq!(half, Charge::new(700));
    }

    #[test]
    fn price_step_scales_linearly_with_carried_mass() {
        let costs = profile();
        let loaded = costs.price_step(Direction::North, Direction::North, Mass::new(20));
        assert_eq!(loaded, Charge::new(600));

        let fractional = costs.price_step(Direction::North, Direction::North, Mass::new(5));
        assert_eq!(fractional, Charge::new(525));
    }

    #[test]
    fn price_step_is_monotonic_in_mass_and_turns() {
        let costs = profile();
        let mut previous = Charge::ZERO;
        for mass in [0_u32, 3, 10, 25, 100] {
            let price = costs.price_step(Direction::East, Direction::East, Mass::new(mass));
            assert!(price >= previous);
            assert!(price >= costs.step_charge());
            previous = price;
        }

        let none = costs.price_step(Direction::East, Direction::East, Mass::ZERO);
        let one = costs.price_step(Direction::East, Direction::South, Mass::ZERO);
        let two = costs.price_step(Direction::East, Direction::West, Mass::ZERO);
        assert!(none < one && one < two);
    }

    #[test]
    fn zero_haul_unit_disables_the_surcharge() {
        let costs = CostProfile::new(
            Charge::new(100),
            Charge::new(500),
            Charge::new(50),
            Mass::ZERO,
        );
        let price = costs.price_step(Direction::North, Direction::North, Mass::new(40));
        assert_eq!(price, Charge::new(500));
    }

    #[test]
    fn beacons_share_cells_and_solids_do_not() {
        assert!(OccupantKind::Beacon.can_share(OccupantKind::Rover));
        assert!(OccupantKind::Rover.can_share(OccupantKind::Beacon));
        assert!(OccupantKind::Beacon.can_share(OccupantKind::Beacon));
        assert!(!OccupantKind::Rover.can_share(OccupantKind::Rover));
        assert!(!OccupantKind::Rover.can_share(OccupantKind::Pallet));
        assert!(!OccupantKind::Pallet.can_share(OccupantKind::Pallet));
    }

    #[test]
    fn route_construction_validates_adjacency() {
        let cells = vec![
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
        ];
        let route = Route::from_cells(cells, Charge::new(1100)).expect("adjacent route");
        assert_eq!(route.step_count(), 2);
        assert_eq!(route.destination(), Some(CellCoord::new(2, 2)));

        assert!(Route::from_cells(Vec::new(), Charge::ZERO).is_none());
        let gapped = vec![CellCoord::new(0, 0), CellCoord::new(2, 0)];
        assert!(Route::from_cells(gapped, Charge::ZERO).is_none());
    }

    #[test]
    fn single_cell_route_has_zero_cost() {
        let route = Route::single(CellCoord::new(4, 4));
        assert_eq!(route.cells(), &[CellCoord::new(4, 4)]);
        assert_eq!(route.cost(), Charge::ZERO);
        assert_eq!(route.step_count(), 0);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn rover_id_round_trips_through_bincode() {
        assert_round_trip(&RoverId::new(42));
    }

    #[test]
    fn cost_profile_round_trips_through_bincode() {
        assert_round_trip(&profile());
    }

    #[test]
    fn occupant_kind_round_trips_through_bincode() {
        assert_round_trip(&OccupantKind::Pallet);
    }

    #[test]
    fn route_error_round_trips_through_bincode() {
        assert_round_trip(&RouteError::InvalidTarget);
        assert_round_trip(&PairingError::GridMismatch);
    }
}
