use std::ops::ControlFlow;

use crate::{
    problem::order::OrderIdx,
    solver::{
        insertion::insertion_positions,
        ls::r#move::LocalSearchOperator,
        solution::{route::VehicleRoute, route_id::RouteIdx, working_solution::Solution},
    },
};

/// **Inter-Route Relocate**
///
/// Moves an order from `from_route_id` to a (pickup, delivery) position pair
/// of `to_route_id`. Emptying the source route frees a vehicle.
///
/// ```text
/// BEFORE:
///    R1: S -> [P1] -> P2 -> D2 -> [D1] -> E
///    R2: S -> P3 -> D3 -> E
///
/// AFTER:
///    R1: S -> P2 -> D2 -> E
///    R2: S -> P3 -> [P1] -> D3 -> [D1] -> E
/// ```
#[derive(Debug)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub order_id: OrderIdx,
    pub pickup_position: usize,
    pub delivery_position: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        if params.from_route_id == params.to_route_id {
            panic!("InterRelocateOperator cannot be used for intra-route relocation");
        }

        Self { params }
    }

    pub fn params(&self) -> &InterRelocateParams {
        &self.params
    }

    /// Every position pair of the target route for one order of the source.
    pub fn generate_moves<C>(
        solution: &Solution,
        (from_route_id, to_route_id): (RouteIdx, RouteIdx),
        order_id: OrderIdx,
        mut consumer: C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        if from_route_id == to_route_id {
            return ControlFlow::Continue(());
        }

        let target = solution.route(to_route_id);

        for (pickup_position, delivery_position) in insertion_positions(target.len()) {
            consumer(InterRelocateOperator::new(InterRelocateParams {
                from_route_id,
                to_route_id,
                order_id,
                pickup_position,
                delivery_position,
            }))?;
        }

        ControlFlow::Continue(())
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn simulate(&self, solution: &Solution) -> Vec<(RouteIdx, VehicleRoute)> {
        let problem = solution.problem();

        let mut source = solution.route(self.params.from_route_id).clone();
        source.remove(problem, self.params.order_id);

        let mut target = solution.route(self.params.to_route_id).clone();
        target.insert(
            problem,
            self.params.order_id,
            self.params.pickup_position,
            self.params.delivery_position,
        );

        vec![
            (self.params.from_route_id, source),
            (self.params.to_route_id, target),
        ]
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.from_route_id, self.params.to_route_id]
    }
}
