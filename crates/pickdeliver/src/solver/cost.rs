use std::{cmp::Ordering, fmt, iter};

use schemars::JsonSchema;
use serde::Serialize;

use crate::solver::solution::route::VehicleRoute;

/// Aggregate cost of a fleet state, compared lexicographically in field order:
/// time-window violations, capacity violations, vehicles used, total wait
/// time and total duration. Routes without orders do not contribute.
#[derive(Debug, Copy, Clone, Default, Serialize, JsonSchema)]
pub struct SolutionCost {
    pub twv: usize,
    pub cv: usize,
    pub vehicles_used: usize,
    pub wait_time: f64,
    pub duration: f64,
}

impl SolutionCost {
    pub const ZERO: SolutionCost = SolutionCost {
        twv: 0,
        cv: 0,
        vehicles_used: 0,
        wait_time: 0.0,
        duration: 0.0,
    };

    pub fn of_route(route: &VehicleRoute) -> Self {
        if route.is_empty() {
            return SolutionCost::ZERO;
        }

        SolutionCost {
            twv: route.twv_count(),
            cv: route.cv_count(),
            vehicles_used: 1,
            wait_time: route.total_wait_time(),
            duration: route.duration(),
        }
    }

    pub fn from_routes<'a>(routes: impl Iterator<Item = &'a VehicleRoute>) -> Self {
        routes.map(SolutionCost::of_route).sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.twv == 0 && self.cv == 0
    }
}

impl Ord for SolutionCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.twv
            .cmp(&other.twv)
            .then_with(|| self.cv.cmp(&other.cv))
            .then_with(|| self.vehicles_used.cmp(&other.vehicles_used))
            .then_with(|| self.wait_time.total_cmp(&other.wait_time))
            .then_with(|| self.duration.total_cmp(&other.duration))
    }
}

impl PartialOrd for SolutionCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SolutionCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SolutionCost {}

impl iter::Sum for SolutionCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SolutionCost::ZERO, |acc, cost| SolutionCost {
            twv: acc.twv + cost.twv,
            cv: acc.cv + cost.cv,
            vehicles_used: acc.vehicles_used + cost.vehicles_used,
            wait_time: acc.wait_time + cost.wait_time,
            duration: acc.duration + cost.duration,
        })
    }
}

impl fmt::Display for SolutionCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(twv, cv, fleet, wait, duration) = ({}, {}, {}, {}, {})",
            self.twv, self.cv, self.vehicles_used, self.wait_time, self.duration
        )
    }
}
