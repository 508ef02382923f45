use crate::{
    problem::{order::OrderIdx, pick_deliver_problem::PickDeliverProblem},
    solver::{
        cost::SolutionCost,
        solution::{route::VehicleRoute, route_id::RouteIdx},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderInsertion {
    pub route_id: RouteIdx,
    pub order_id: OrderIdx,

    /// Position of the pickup
    pub pickup_position: usize,

    /// Position of the delivery, once the pickup has been inserted
    pub delivery_position: usize,
}

impl OrderInsertion {
    /// Copy of `route` with the order inserted. The live route is untouched.
    pub fn simulate(&self, problem: &PickDeliverProblem, route: &VehicleRoute) -> VehicleRoute {
        let mut simulated = route.clone();
        simulated.insert(
            problem,
            self.order_id,
            self.pickup_position,
            self.delivery_position,
        );
        simulated
    }
}

/// Every (pickup, delivery) position pair for inserting one order into a
/// route of `route_len` nodes, in lexicographic order.
pub fn insertion_positions(route_len: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..route_len).flat_map(move |pickup_position| {
        (pickup_position + 1..=route_len)
            .map(move |delivery_position| (pickup_position, delivery_position))
    })
}

/// Position pair minimizing the cost of `route` alone once the order is in,
/// first one on ties.
pub fn cheapest_insertion(
    problem: &PickDeliverProblem,
    route: &VehicleRoute,
    order_id: OrderIdx,
) -> (usize, usize, VehicleRoute) {
    let mut best: Option<(SolutionCost, usize, usize, VehicleRoute)> = None;

    for (pickup_position, delivery_position) in insertion_positions(route.len()) {
        let mut simulated = route.clone();
        simulated.insert(problem, order_id, pickup_position, delivery_position);
        let cost = SolutionCost::of_route(&simulated);

        if best
            .as_ref()
            .is_none_or(|(best_cost, _, _, _)| cost < *best_cost)
        {
            best = Some((cost, pickup_position, delivery_position, simulated));
        }
    }

    match best {
        Some((_, pickup_position, delivery_position, route)) => {
            (pickup_position, delivery_position, route)
        }
        None => unreachable!("a route always has a position between its depots"),
    }
}
