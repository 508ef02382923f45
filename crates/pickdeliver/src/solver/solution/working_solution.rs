use std::{cmp::Ordering, sync::Arc};

use crate::{
    json::types::ResultRow,
    problem::{order::OrderIdx, pick_deliver_problem::PickDeliverProblem},
    solver::{
        cost::SolutionCost,
        insertion::OrderInsertion,
        solution::{fleet::Fleet, route::VehicleRoute, route_id::RouteIdx},
    },
};

/// A fleet state together with its cached cost and the orders that could not
/// be placed. Solutions are ordered by cost only.
#[derive(Clone)]
pub struct Solution {
    problem: Arc<PickDeliverProblem>,
    fleet: Fleet,
    unassigned: Vec<OrderIdx>,
    cost: SolutionCost,
}

impl Solution {
    pub fn new(problem: Arc<PickDeliverProblem>, fleet: Fleet) -> Self {
        let cost = SolutionCost::from_routes(fleet.routes().iter());

        Solution {
            problem,
            fleet,
            unassigned: Vec::new(),
            cost,
        }
    }

    pub fn problem(&self) -> &PickDeliverProblem {
        self.problem.as_ref()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn route(&self, route_id: RouteIdx) -> &VehicleRoute {
        &self.fleet[route_id]
    }

    pub fn cost(&self) -> SolutionCost {
        self.cost
    }

    pub fn is_feasible(&self) -> bool {
        self.cost.is_feasible()
    }

    /// Cost the solution would have if the given routes replaced the current
    /// ones. Routes are summed in fleet order, exactly as after `apply`.
    pub fn cost_with(&self, replacements: &[(RouteIdx, VehicleRoute)]) -> SolutionCost {
        self.fleet
            .routes_iter()
            .map(|(route_id, route)| {
                replacements
                    .iter()
                    .find(|(replaced_id, _)| *replaced_id == route_id)
                    .map_or(route, |(_, replacement)| replacement)
            })
            .map(SolutionCost::of_route)
            .sum()
    }

    pub fn apply(&mut self, replacements: Vec<(RouteIdx, VehicleRoute)>) {
        for (route_id, route) in replacements {
            self.fleet.replace_route(route_id, route);
        }
        self.update_cost();
    }

    pub fn insert(&mut self, insertion: &OrderInsertion) {
        self.fleet.insert(&self.problem, insertion);
        self.unassigned
            .retain(|&order_id| order_id != insertion.order_id);
        self.update_cost();
    }

    pub fn mark_unassigned(&mut self, order_id: OrderIdx) {
        if !self.unassigned.contains(&order_id) {
            self.unassigned.push(order_id);
        }
    }

    pub fn unassigned_orders(&self) -> &[OrderIdx] {
        &self.unassigned
    }

    fn update_cost(&mut self) {
        self.cost = SolutionCost::from_routes(self.fleet.routes().iter());
    }

    /// Same vehicles carrying the same node sequences.
    pub fn is_identical(&self, other: &Solution) -> bool {
        if self.fleet.len() != other.fleet.len() {
            return false;
        }

        self.fleet
            .routes()
            .iter()
            .zip(other.fleet.routes())
            .all(|(route, other_route)| {
                route.vehicle_type_id() == other_route.vehicle_type_id()
                    && route.nodes() == other_route.nodes()
            })
    }

    pub fn total_travel_time(&self) -> f64 {
        self.fleet
            .used_routes_iter()
            .map(|(_, route)| route.total_travel_time())
            .sum()
    }

    pub fn total_service_time(&self) -> f64 {
        self.fleet
            .used_routes_iter()
            .map(|(_, route)| route.total_service_time())
            .sum()
    }

    /// Output rows of every used vehicle, numbered from 1 in fleet order.
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.fleet
            .used_routes_iter()
            .enumerate()
            .flat_map(|(index, (_, route))| route.result_rows(&self.problem, index + 1))
            .collect()
    }

    pub fn describe(&self) -> String {
        let mut lines = self
            .fleet
            .used_routes_iter()
            .map(|(_, route)| route.describe(&self.problem))
            .collect::<Vec<_>>();
        lines.push(self.cost.to_string());
        lines.join("\n")
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for Solution {}

impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Solution {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost)
    }
}
