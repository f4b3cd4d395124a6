#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Minimal-cost route search for a single rover.
//!
//! The search runs over (cell, heading) states because the charge price of a
//! step depends on the rover's heading when the step begins. Legality is
//! delegated entirely to the injected closure, which combines the bounds
//! check with the occupancy-compatibility rules; the router has no
//! independent notion of what may share a cell.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use depot_core::{CellCoord, Charge, Direction, Route, RouteError, RoverSnapshot};

/// Default number of (cell, heading) states a search may expand before it
/// reports failure. Covers the full state space of a 32 by 32 grid, so a
/// goal not found within the budget is either unreachable or too expensive
/// to prove; the two outcomes are indistinguishable to callers.
pub const MAX_EXPANDED_STATES: usize = 4_096;

/// Minimal-cost route finder over (cell, heading) states.
///
/// The router performs no mutation and keeps no state between calls; it is
/// safe to query repeatedly against read-only snapshots of an unchanging
/// floor.
#[derive(Clone, Copy, Debug)]
pub struct Router {
    expansion_budget: usize,
}

impl Router {
    /// Creates a router with an explicit expansion budget.
    #[must_use]
    pub const fn with_budget(expansion_budget: usize) -> Self {
        Self { expansion_budget }
    }

    /// Minimal charge required to legally reach `target`.
    ///
    /// The rover must not be retired and the target must itself be in
    /// bounds and legality-compatible, both checked before any search work
    /// begins.
    pub fn minimal_cost<F>(
        &self,
        rover: &RoverSnapshot,
        target: CellCoord,
        can_occupy: F,
    ) -> Result<Charge, RouteError>
    where
        F: Fn(CellCoord) -> bool,
    {
        self.search(rover, target, &can_occupy).map(|hit| hit.cost)
    }

    /// Cheapest legal route from the rover's cell and heading to `target`,
    /// starting cell included.
    pub fn route<F>(
        &self,
        rover: &RoverSnapshot,
        target: CellCoord,
        can_occupy: F,
    ) -> Result<Route, RouteError>
    where
        F: Fn(CellCoord) -> bool,
    {
        self.search(rover, target, &can_occupy)
            .and_then(SearchHit::into_route)
    }

    /// Minimal charge to every cell the rover can afford to reach without
    /// spending more than `budget`.
    ///
    /// The flood expands states in cost order, so the first settlement of a
    /// cell records its cheapest affordable approach. A retired rover
    /// reaches nothing. When the expansion budget runs out the set is
    /// truncated to the cells settled so far.
    pub fn reachable_within<F>(
        &self,
        rover: &RoverSnapshot,
        budget: Charge,
        can_occupy: F,
    ) -> ReachSet
    where
        F: Fn(CellCoord) -> bool,
    {
        let mut reach = ReachSet {
            origin: rover.cell,
            cells: BTreeMap::new(),
        };
        if rover.retired {
            return reach;
        }

        let start = SearchState {
            cell: rover.cell,
            facing: rover.facing,
        };
        let mut best: HashMap<SearchState, Charge> = HashMap::new();
        let mut open: BinaryHeap<Reverse<FrontierNode>> = BinaryHeap::new();
        let _ = best.insert(start, Charge::ZERO);
        open.push(Reverse(FrontierNode {
            priority: Charge::ZERO,
            cost: Charge::ZERO,
            state: start,
        }));

        let mut expanded = 0_usize;
        while let Some(Reverse(node)) = open.pop() {
            if best
                .get(&node.state)
                .map_or(false, |&known| node.cost > known)
            {
                continue;
            }
            expanded += 1;
            if expanded > self.expansion_budget {
                break;
            }

            let _ = reach.cells.entry(node.state.cell).or_insert(node.cost);

            for heading in Direction::ALL {
                let Some(next_cell) = heading.step_from(node.state.cell) else {
                    continue;
                };
                if !can_occupy(next_cell) {
                    continue;
                }

                let price = rover.costs.price_step(node.state.facing, heading, rover.carried);
                let next_cost = node.cost.saturating_add(price);
                if next_cost > budget {
                    continue;
                }

                let next_state = SearchState {
                    cell: next_cell,
                    facing: heading,
                };
                if best
                    .get(&next_state)
                    .map_or(true, |&known| next_cost < known)
                {
                    let _ = best.insert(next_state, next_cost);
                    open.push(Reverse(FrontierNode {
                        priority: next_cost,
                        cost: next_cost,
                        state: next_state,
                    }));
                }
            }
        }

        reach
    }

    fn search<F>(
        &self,
        rover: &RoverSnapshot,
        target: CellCoord,
        can_occupy: &F,
    ) -> Result<SearchHit, RouteError>
    where
        F: Fn(CellCoord) -> bool,
    {
        if rover.retired {
            return Err(RouteError::RetiredRover);
        }
        if !rover.grid.contains(target) || !can_occupy(target) {
            return Err(RouteError::InvalidTarget);
        }

        let start = SearchState {
            cell: rover.cell,
            facing: rover.facing,
        };
        if rover.cell == target {
            return Ok(SearchHit {
                cost: Charge::ZERO,
                start,
                goal: start,
                parents: HashMap::new(),
            });
        }

        let step_floor = rover.costs.step_charge();
        let mut best: HashMap<SearchState, Charge> = HashMap::new();
        let mut parents: HashMap<SearchState, SearchState> = HashMap::new();
        let mut open: BinaryHeap<Reverse<FrontierNode>> = BinaryHeap::new();
        let _ = best.insert(start, Charge::ZERO);
        open.push(Reverse(FrontierNode {
            priority: lower_bound(rover.cell, target, step_floor),
            cost: Charge::ZERO,
            state: start,
        }));

        let mut expanded = 0_usize;
        while let Some(Reverse(node)) = open.pop() {
            if best
                .get(&node.state)
                .map_or(false, |&known| node.cost > known)
            {
                continue;
            }
            // Every step costs at least the step core, so the lower bound
            // is consistent and the first goal settlement is minimal.
            if node.state.cell == target {
                return Ok(SearchHit {
                    cost: node.cost,
                    start,
                    goal: node.state,
                    parents,
                });
            }

            expanded += 1;
            if expanded > self.expansion_budget {
                return Err(RouteError::Unreachable);
            }

            for heading in Direction::ALL {
                let Some(next_cell) = heading.step_from(node.state.cell) else {
                    continue;
                };
                if !can_occupy(next_cell) {
                    continue;
                }

                let price = rover.costs.price_step(node.state.facing, heading, rover.carried);
                let next_cost = node.cost.saturating_add(price);
                let next_state = SearchState {
                    cell: next_cell,
                    facing: heading,
                };
                if best
                    .get(&next_state)
                    .map_or(true, |&known| next_cost < known)
                {
                    let _ = best.insert(next_state, next_cost);
                    let _ = parents.insert(next_state, node.state);
                    open.push(Reverse(FrontierNode {
                        priority: next_cost
                            .saturating_add(lower_bound(next_cell, target, step_floor)),
                        cost: next_cost,
                        state: next_state,
                    }));
                }
            }
        }

        Err(RouteError::Unreachable)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_budget(MAX_EXPANDED_STATES)
    }
}

/// Minimal charges for every cell a rover can afford to reach.
#[derive(Clone, Debug)]
pub struct ReachSet {
    origin: CellCoord,
    cells: BTreeMap<CellCoord, Charge>,
}

impl ReachSet {
    /// Cell the flood started from.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Minimal charge required to reach the cell, when affordable.
    #[must_use]
    pub fn cost(&self, cell: CellCoord) -> Option<Charge> {
        self.cells.get(&cell).copied()
    }

    /// Reports whether the cell is affordable.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Iterator over affordable cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Charge)> + '_ {
        self.cells.iter().map(|(&cell, &cost)| (cell, cost))
    }

    /// Number of affordable cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is affordable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn lower_bound(from: CellCoord, target: CellCoord, step_charge: Charge) -> Charge {
    Charge::new(u64::from(from.manhattan_distance(target)).saturating_mul(step_charge.get()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SearchState {
    cell: CellCoord,
    facing: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierNode {
    priority: Charge,
    cost: Charge,
    state: SearchState,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = (
            self.priority,
            self.cost,
            self.state.cell,
            self.state.facing,
        );
        let rhs = (
            other.priority,
            other.cost,
            other.state.cell,
            other.state.facing,
        );
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct SearchHit {
    cost: Charge,
    start: SearchState,
    goal: SearchState,
    parents: HashMap<SearchState, SearchState>,
}

impl SearchHit {
    fn into_route(self) -> Result<Route, RouteError> {
        let mut cells = vec![self.goal.cell];
        let mut cursor = self.goal;
        while cursor != self.start {
            let Some(&previous) = self.parents.get(&cursor) else {
                return Err(RouteError::Unreachable);
            };
            cells.push(previous.cell);
            cursor = previous;
        }
        cells.reverse();
        Route::from_cells(cells, self.cost).ok_or(RouteError::Unreachable)
    }
}
