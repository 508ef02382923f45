use std::sync::Arc;

use fxhash::FxHashSet;
use tracing::{debug, instrument};

use crate::{
    problem::{order::OrderIdx, pick_deliver_problem::PickDeliverProblem},
    solver::{
        cost::SolutionCost,
        diagnostics::Diagnostics,
        insertion::{OrderInsertion, insertion_positions},
        solution::{
            fleet::Fleet, route::VehicleRoute, route_id::RouteIdx, working_solution::Solution,
        },
    },
    utils::enumerate_idx::EnumerateIdx,
};

struct CandidateInsertion {
    route_id: RouteIdx,
    route: VehicleRoute,
    cost: SolutionCost,
}

/// Sequential insertion: orders are placed one at a time, in input order, at
/// the feasible position giving the lowest solution cost. A new vehicle is
/// only opened when no vehicle in use can take the order.
pub struct InitialSolution;

impl InitialSolution {
    #[instrument(skip_all, level = "debug")]
    pub fn build(
        problem: Arc<PickDeliverProblem>,
        fleet: Fleet,
        rejected: &FxHashSet<OrderIdx>,
        diagnostics: &mut Diagnostics,
    ) -> Solution {
        let mut solution = Solution::new(Arc::clone(&problem), fleet);

        for (order_id, order) in problem.orders().iter().enumerate_idx() {
            if rejected.contains(&order_id) {
                solution.mark_unassigned(order_id);
                continue;
            }

            if !solution.fleet().can_serve(&problem, order_id) {
                diagnostics.error(format!(
                    "Order {} can not be served by any vehicle",
                    order.external_id()
                ));
                solution.mark_unassigned(order_id);
                continue;
            }

            let used_routes = solution
                .fleet()
                .used_routes_iter()
                .map(|(route_id, _)| route_id)
                .collect::<Vec<_>>();

            let candidate = Self::best_insertion(&solution, order_id, &used_routes).or_else(|| {
                let unused_routes = solution.fleet().first_unused_per_type();
                Self::best_insertion(&solution, order_id, &unused_routes)
            });

            match candidate {
                Some(candidate) => {
                    debug!(
                        order = order.external_id(),
                        route = %candidate.route_id,
                        "Inserted order, {}", candidate.cost
                    );
                    solution.apply(vec![(candidate.route_id, candidate.route)]);
                }
                None => {
                    diagnostics.error(format!(
                        "Order {} could not be inserted in any vehicle",
                        order.external_id()
                    ));
                    solution.mark_unassigned(order_id);
                }
            }
        }

        diagnostics.log(format!("Initial solution {}", solution.cost()));

        solution
    }

    /// Best feasible insertion of the order over the given routes, ranked by
    /// solution cost then by the duration of the receiving route.
    fn best_insertion(
        solution: &Solution,
        order_id: OrderIdx,
        route_ids: &[RouteIdx],
    ) -> Option<CandidateInsertion> {
        let problem = solution.problem();
        let mut best: Option<CandidateInsertion> = None;

        for &route_id in route_ids {
            let route = solution.route(route_id);

            for (pickup_position, delivery_position) in insertion_positions(route.len()) {
                let simulated = OrderInsertion {
                    route_id,
                    order_id,
                    pickup_position,
                    delivery_position,
                }
                .simulate(problem, route);

                if !simulated.is_feasible() {
                    continue;
                }

                let replacement = [(route_id, simulated)];
                let cost = solution.cost_with(&replacement);
                let [(_, simulated)] = replacement;

                let is_better = best.as_ref().is_none_or(|best| {
                    cost.cmp(&best.cost)
                        .then_with(|| simulated.duration().total_cmp(&best.route.duration()))
                        .is_lt()
                });

                if is_better {
                    best = Some(CandidateInsertion {
                        route_id,
                        route: simulated,
                        cost,
                    });
                }
            }
        }

        best
    }
}
