use std::ops::ControlFlow;

use crate::{
    problem::order::OrderIdx,
    solver::{
        insertion::insertion_positions,
        ls::r#move::LocalSearchOperator,
        solution::{route::VehicleRoute, route_id::RouteIdx, working_solution::Solution},
    },
};

/// **Intra-Route Relocate**
///
/// Takes both nodes of an order out of its route and puts them back at
/// another (pickup, delivery) position pair of the same route.
///
/// ```text
/// BEFORE:
///    R: S -> [P1] -> P2 -> [D1] -> D2 -> E
///
/// AFTER:
///    R: S -> P2 -> D2 -> [P1] -> [D1] -> E
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateParams,
}

#[derive(Debug)]
pub struct RelocateParams {
    pub route_id: RouteIdx,
    pub order_id: OrderIdx,

    /// Positions in the route once the order has been removed
    pub pickup_position: usize,
    pub delivery_position: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RelocateParams {
        &self.params
    }

    /// Every relocation of every order of the route, skipping the pairs that
    /// give back the current sequence.
    pub fn generate_moves<C>(
        solution: &Solution,
        route_id: RouteIdx,
        mut consumer: C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        let problem = solution.problem();
        let route = solution.route(route_id);

        for order_id in route.orders(problem) {
            let Some(current_positions) = route.order_positions(order_id) else {
                continue;
            };

            for (pickup_position, delivery_position) in insertion_positions(route.len() - 2) {
                if (pickup_position, delivery_position) == current_positions {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateParams {
                    route_id,
                    order_id,
                    pickup_position,
                    delivery_position,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn simulate(&self, solution: &Solution) -> Vec<(RouteIdx, VehicleRoute)> {
        let problem = solution.problem();
        let mut route = solution.route(self.params.route_id).clone();

        route.remove(problem, self.params.order_id);
        route.insert(
            problem,
            self.params.order_id,
            self.params.pickup_position,
            self.params.delivery_position,
        );

        vec![(self.params.route_id, route)]
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}

#[cfg(test)]
mod tests {
    use std::{ops::ControlFlow, sync::Arc};

    use crate::{
        problem::order::OrderIdx,
        solver::{
            ls::{
                r#move::LocalSearchOperator,
                relocate::{RelocateOperator, RelocateParams},
            },
            solution::route_id::RouteIdx,
        },
        test_utils::{self, TestOrder, TestRoute, TestVehicle},
    };

    #[test]
    fn test_relocate() {
        let problem = Arc::new(test_utils::create_problem(
            vec![
                TestOrder::new(1.0, (1.0, 0.0), (2.0, 0.0)),
                TestOrder::new(1.0, (3.0, 0.0), (4.0, 0.0)),
            ],
            vec![TestVehicle::new(1, 10.0)],
        ));
        // [S, P0, D0, P1, D1, E]
        let mut solution = test_utils::create_test_solution(
            Arc::clone(&problem),
            vec![TestRoute {
                route_id: 0,
                order_ids: vec![0, 1],
            }],
        );

        let operator = RelocateOperator::new(RelocateParams {
            route_id: RouteIdx::new(0),
            order_id: OrderIdx::new(0),
            pickup_position: 3,
            delivery_position: 4,
        });

        let simulated = operator.simulate(&solution);
        let expected = solution.cost_with(&simulated);
        operator.apply(&mut solution);

        let route = solution.route(RouteIdx::new(0));
        assert_eq!(route.order_positions(OrderIdx::new(1)), Some((1, 2)));
        assert_eq!(route.order_positions(OrderIdx::new(0)), Some((3, 4)));
        assert_eq!(solution.cost(), expected);
        assert_eq!(operator.updated_routes(), vec![RouteIdx::new(0)]);
    }

    #[test]
    fn test_generate_moves_skips_current_positions() {
        let problem = Arc::new(test_utils::create_problem(
            vec![
                TestOrder::new(1.0, (1.0, 0.0), (2.0, 0.0)),
                TestOrder::new(1.0, (3.0, 0.0), (4.0, 0.0)),
            ],
            vec![TestVehicle::new(1, 10.0)],
        ));
        let solution = test_utils::create_test_solution(
            Arc::clone(&problem),
            vec![TestRoute {
                route_id: 0,
                order_ids: vec![0, 1],
            }],
        );

        let mut moves = Vec::new();
        let flow = RelocateOperator::generate_moves(&solution, RouteIdx::new(0), |op| {
            moves.push(op);
            ControlFlow::Continue(())
        });

        assert!(flow.is_continue());
        // Six position pairs per order once it is out of the route, one of
        // them being the current placement
        assert_eq!(moves.len(), 10);
        assert!(moves.iter().all(|op| {
            let params = op.params();
            solution
                .route(params.route_id)
                .order_positions(params.order_id)
                != Some((params.pickup_position, params.delivery_position))
        }));
    }

    #[test]
    fn test_generate_moves_stops_on_break() {
        let problem = Arc::new(test_utils::create_problem(
            vec![
                TestOrder::new(1.0, (1.0, 0.0), (2.0, 0.0)),
                TestOrder::new(1.0, (3.0, 0.0), (4.0, 0.0)),
            ],
            vec![TestVehicle::new(1, 10.0)],
        ));
        let solution = test_utils::create_test_solution(
            Arc::clone(&problem),
            vec![TestRoute {
                route_id: 0,
                order_ids: vec![0, 1],
            }],
        );

        let mut count = 0;
        let flow = RelocateOperator::generate_moves(&solution, RouteIdx::new(0), |_| {
            count += 1;
            ControlFlow::Break(())
        });

        assert!(flow.is_break());
        assert_eq!(count, 1);
    }
}
