use std::ops::ControlFlow;

use jiff::Timestamp;
use tracing::{debug, info, instrument};

use crate::{
    problem::order::OrderIdx,
    solver::{
        cost::SolutionCost,
        ls::{
            exchange::ExchangeOperator,
            inter_relocate::InterRelocateOperator,
            r#move::{EvaluatedMove, LocalSearchMove},
            relocate::RelocateOperator,
        },
        solution::{route_id::RouteIdx, working_solution::Solution},
        statistics::{AcceptedMoveRow, SearchStatistics},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Running,
    Converged,
}

/// First-improvement local search. Each cycle scans inter-route relocations,
/// then intra-route relocations, then exchanges, and applies the first move
/// that strictly lowers the solution cost.
pub struct Optimizer {
    max_cycles: usize,
    state: OptimizerState,
    statistics: Option<SearchStatistics>,
}

impl Optimizer {
    pub fn new(max_cycles: usize) -> Self {
        Optimizer {
            max_cycles,
            state: OptimizerState::Converged,
            statistics: None,
        }
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    /// Statistics of the last `optimize` run.
    pub fn statistics(&self) -> Option<&SearchStatistics> {
        self.statistics.as_ref()
    }

    pub fn into_statistics(self) -> Option<SearchStatistics> {
        self.statistics
    }

    #[instrument(skip_all, level = "debug")]
    pub fn optimize(&mut self, solution: Solution) -> Solution {
        let mut current = solution;
        let mut statistics = SearchStatistics::start(current.cost());
        let mut cycles = 0;

        self.state = OptimizerState::Running;

        while self.state == OptimizerState::Running {
            if cycles >= self.max_cycles {
                debug!("Cycle budget of {} exhausted", self.max_cycles);
                self.state = OptimizerState::Converged;
                break;
            }

            cycles += 1;

            match find_improving_move(&current) {
                Some(evaluated) => {
                    let cost_before = current.cost();

                    debug!(
                        cycle = cycles,
                        operator = evaluated.r#move.operator_name(),
                        "Accepted move, {}",
                        evaluated.cost
                    );

                    current.apply(evaluated.routes);
                    debug_assert_eq!(current.cost(), evaluated.cost);

                    statistics.add_accepted_move(AcceptedMoveRow {
                        timestamp: Timestamp::now(),
                        cycle: cycles,
                        operator: evaluated.r#move.operator_name(),
                        cost_before,
                        cost_after: current.cost(),
                    });
                }
                None => {
                    self.state = OptimizerState::Converged;
                }
            }
        }

        statistics.finish(cycles, current.cost());

        info!(
            cycles,
            accepted = statistics.accepted_moves().len(),
            "Local search converged, {}",
            current.cost()
        );

        self.statistics = Some(statistics);

        current
    }
}

fn used_route_ids(solution: &Solution) -> Vec<RouteIdx> {
    solution
        .fleet()
        .used_routes_iter()
        .map(|(route_id, _)| route_id)
        .collect()
}

pub fn find_improving_move(solution: &Solution) -> Option<EvaluatedMove> {
    find_inter_relocate(solution)
        .or_else(|| find_relocate(solution))
        .or_else(|| find_exchange(solution))
}

/// Evaluates the move and keeps it when it lowers the cost below `current`.
fn consider(
    solution: &Solution,
    current: SolutionCost,
    r#move: LocalSearchMove,
    found: &mut Option<EvaluatedMove>,
) -> ControlFlow<()> {
    let evaluated = r#move.evaluate(solution);

    if evaluated.is_improving(current) {
        *found = Some(evaluated);
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    }
}

/// Each order of each used route is tried in every other used route. Unused
/// vehicles, one per type, are only tried for an order no used route can take
/// feasibly.
fn find_inter_relocate(solution: &Solution) -> Option<EvaluatedMove> {
    let problem = solution.problem();
    let current = solution.cost();
    let used = used_route_ids(solution);
    let unused = solution.fleet().first_unused_per_type();
    let mut found = None;

    for &from_route_id in &used {
        let orders = solution
            .route(from_route_id)
            .orders(problem)
            .collect::<Vec<OrderIdx>>();

        for order_id in orders {
            let mut accepted_by_used = false;

            for &to_route_id in &used {
                let flow = InterRelocateOperator::generate_moves(
                    solution,
                    (from_route_id, to_route_id),
                    order_id,
                    |op| {
                        let evaluated = LocalSearchMove::InterRelocate(op).evaluate(solution);
                        accepted_by_used |= evaluated
                            .route(to_route_id)
                            .is_some_and(|route| route.is_feasible());

                        if evaluated.is_improving(current) {
                            found = Some(evaluated);
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(())
                        }
                    },
                );

                if flow.is_break() {
                    return found;
                }
            }

            if accepted_by_used {
                continue;
            }

            for &to_route_id in &unused {
                let flow = InterRelocateOperator::generate_moves(
                    solution,
                    (from_route_id, to_route_id),
                    order_id,
                    |op| {
                        let r#move = LocalSearchMove::InterRelocate(op);
                        consider(solution, current, r#move, &mut found)
                    },
                );

                if flow.is_break() {
                    return found;
                }
            }
        }
    }

    None
}

fn find_relocate(solution: &Solution) -> Option<EvaluatedMove> {
    let current = solution.cost();
    let mut found = None;

    for route_id in used_route_ids(solution) {
        let flow = RelocateOperator::generate_moves(solution, route_id, |op| {
            consider(solution, current, LocalSearchMove::Relocate(op), &mut found)
        });

        if flow.is_break() {
            return found;
        }
    }

    None
}

fn find_exchange(solution: &Solution) -> Option<EvaluatedMove> {
    let current = solution.cost();
    let used = used_route_ids(solution);
    let mut found = None;

    for (index, &first_route_id) in used.iter().enumerate() {
        for &second_route_id in &used[index + 1..] {
            let route_pair = (first_route_id, second_route_id);
            let flow = ExchangeOperator::generate_moves(solution, route_pair, |op| {
                consider(solution, current, LocalSearchMove::Exchange(op), &mut found)
            });

            if flow.is_break() {
                return found;
            }
        }
    }

    None
}
