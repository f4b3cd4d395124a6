#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-rover rendezvous planning built on the single-agent router.
//!
//! Each rover's affordable destinations are gathered with one reachability
//! flood per rover, the closest affordable destination pair is selected, and
//! the final routes are priced through the router again so the returned pair
//! always satisfies the single-agent optimality contract.

use depot_core::{CellCoord, Charge, PairingError, Route, RoverSnapshot};
use depot_system_routing::{ReachSet, Router};

/// Plans destination pairs and routes that bring two rovers as close
/// together as their independent charge budgets allow.
#[derive(Clone, Copy, Debug, Default)]
pub struct RendezvousPlanner {
    router: Router,
}

impl RendezvousPlanner {
    /// Creates a planner that searches with the provided router.
    #[must_use]
    pub const fn with_router(router: Router) -> Self {
        Self { router }
    }

    /// Computes the pair of routes that bring the rovers as close together
    /// as their budgets allow.
    ///
    /// Destination pairs are ranked by Manhattan separation first and
    /// combined spent charge second; remaining ties resolve
    /// lexicographically on (destination A, destination B). Rovers are
    /// mutually exclusive occupants, so the two destinations are never the
    /// same cell and the separation bottoms out at one.
    ///
    /// Each returned route starts at its rover's current cell and never
    /// costs more than that rover's balance. Routes describe a
    /// point-in-time snapshot; callers executing them step by step should
    /// re-plan if occupancy may have changed underneath them.
    pub fn plan<F, G>(
        &self,
        a: &RoverSnapshot,
        b: &RoverSnapshot,
        can_occupy_a: F,
        can_occupy_b: G,
    ) -> Result<(Route, Route), PairingError>
    where
        F: Fn(CellCoord) -> bool,
        G: Fn(CellCoord) -> bool,
    {
        if a.retired || b.retired {
            return Err(PairingError::RetiredRover);
        }
        if a.id == b.id {
            return Err(PairingError::SelfPairing);
        }
        if a.grid != b.grid {
            return Err(PairingError::GridMismatch);
        }
        if !can_occupy_a(a.cell) || !can_occupy_b(b.cell) || a.cell == b.cell {
            return Err(PairingError::MisplacedRover);
        }

        let reach_a = self.router.reachable_within(a, a.charge, &can_occupy_a);
        let reach_b = self.router.reachable_within(b, b.charge, &can_occupy_b);
        let Some(choice) = closest_pair(&reach_a, &reach_b) else {
            return Err(PairingError::Unroutable);
        };

        let route_a = self
            .router
            .route(a, choice.destination_a, &can_occupy_a)
            .map_err(|_| PairingError::Unroutable)?;
        let route_b = self
            .router
            .route(b, choice.destination_b, &can_occupy_b)
            .map_err(|_| PairingError::Unroutable)?;
        Ok((route_a, route_b))
    }
}

#[derive(Clone, Copy, Debug)]
struct PairChoice {
    destination_a: CellCoord,
    destination_b: CellCoord,
    separation: u32,
    combined: Charge,
}

/// Scans two reach sets for the closest affordable destination pair.
///
/// Both sets iterate in coordinate order and a candidate only replaces the
/// incumbent on a strict improvement, which realises the lexicographic
/// tie-break. Returns `None` only when either set is empty.
fn closest_pair(reach_a: &ReachSet, reach_b: &ReachSet) -> Option<PairChoice> {
    let mut best: Option<PairChoice> = None;
    for (cell_a, cost_a) in reach_a.iter() {
        for (cell_b, cost_b) in reach_b.iter() {
            if cell_a == cell_b {
                continue;
            }
            let candidate = PairChoice {
                destination_a: cell_a,
                destination_b: cell_b,
                separation: cell_a.manhattan_distance(cell_b),
                combined: cost_a.saturating_add(cost_b),
            };
            let improved = best.map_or(true, |current| {
                (candidate.separation, candidate.combined)
                    < (current.separation, current.combined)
            });
            if improved {
                best = Some(candidate);
            }
        }
    }
    best
}
