use std::ops::ControlFlow;

use crate::{
    problem::order::OrderIdx,
    solver::{
        insertion::cheapest_insertion,
        ls::r#move::LocalSearchOperator,
        solution::{route::VehicleRoute, route_id::RouteIdx, working_solution::Solution},
    },
};

/// **Inter-Route Exchange**
///
/// Swaps an order of the first route with an order of the second route. Each
/// order goes to its cheapest position in the other route.
///
/// ```text
/// BEFORE:
///    R1: S -> [P1] -> [D1] -> P2 -> D2 -> E
///    R2: S -> (P3) -> (D3) -> E
///
/// AFTER:
///    R1: S -> P2 -> (P3) -> D2 -> (D3) -> E
///    R2: S -> [P1] -> [D1] -> E
/// ```
#[derive(Debug)]
pub struct ExchangeOperator {
    params: ExchangeParams,
}

#[derive(Debug)]
pub struct ExchangeParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first_order_id: OrderIdx,
    pub second_order_id: OrderIdx,

    /// Where the second order goes in the first route, once the first order
    /// has left it
    pub first_route_positions: (usize, usize),

    /// Where the first order goes in the second route, once the second order
    /// has left it
    pub second_route_positions: (usize, usize),
}

impl ExchangeOperator {
    pub fn new(params: ExchangeParams) -> Self {
        if params.first_route_id == params.second_route_id {
            panic!("ExchangeOperator requires two different routes");
        }

        Self { params }
    }

    pub fn params(&self) -> &ExchangeParams {
        &self.params
    }

    pub fn generate_moves<C>(
        solution: &Solution,
        (first_route_id, second_route_id): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        if first_route_id == second_route_id {
            return ControlFlow::Continue(());
        }

        let problem = solution.problem();
        let first_route = solution.route(first_route_id);
        let second_route = solution.route(second_route_id);

        let second_orders = second_route
            .orders(problem)
            .map(|order_id| {
                let mut without = second_route.clone();
                without.remove(problem, order_id);
                (order_id, without)
            })
            .collect::<Vec<_>>();

        for first_order_id in first_route.orders(problem) {
            let mut first_without = first_route.clone();
            first_without.remove(problem, first_order_id);

            for (second_order_id, second_without) in &second_orders {
                let (first_pickup, first_delivery, _) =
                    cheapest_insertion(problem, &first_without, *second_order_id);
                let (second_pickup, second_delivery, _) =
                    cheapest_insertion(problem, second_without, first_order_id);

                consumer(ExchangeOperator::new(ExchangeParams {
                    first_route_id,
                    second_route_id,
                    first_order_id,
                    second_order_id: *second_order_id,
                    first_route_positions: (first_pickup, first_delivery),
                    second_route_positions: (second_pickup, second_delivery),
                }))?;
            }
        }

        ControlFlow::Continue(())
    }
}

impl LocalSearchOperator for ExchangeOperator {
    fn simulate(&self, solution: &Solution) -> Vec<(RouteIdx, VehicleRoute)> {
        let problem = solution.problem();
        let params = &self.params;

        let mut first = solution.route(params.first_route_id).clone();
        first.remove(problem, params.first_order_id);
        first.insert(
            problem,
            params.second_order_id,
            params.first_route_positions.0,
            params.first_route_positions.1,
        );

        let mut second = solution.route(params.second_route_id).clone();
        second.remove(problem, params.second_order_id);
        second.insert(
            problem,
            params.first_order_id,
            params.second_route_positions.0,
            params.second_route_positions.1,
        );

        vec![(params.first_route_id, first), (params.second_route_id, second)]
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.first_route_id, self.params.second_route_id]
    }
}
