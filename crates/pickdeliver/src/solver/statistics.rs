use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::solver::cost::SolutionCost;

#[derive(Debug, Clone, Serialize)]
pub struct AcceptedMoveRow {
    pub timestamp: Timestamp,
    pub cycle: usize,
    pub operator: &'static str,
    pub cost_before: SolutionCost,
    pub cost_after: SolutionCost,
}

/// What the optimizer did during one run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    started_at: Timestamp,
    elapsed: SignedDuration,
    cycles: usize,
    initial_cost: SolutionCost,
    final_cost: SolutionCost,
    accepted_moves: Vec<AcceptedMoveRow>,
}

impl SearchStatistics {
    pub fn start(initial_cost: SolutionCost) -> Self {
        SearchStatistics {
            started_at: Timestamp::now(),
            elapsed: SignedDuration::ZERO,
            cycles: 0,
            initial_cost,
            final_cost: initial_cost,
            accepted_moves: Vec::new(),
        }
    }

    pub fn add_accepted_move(&mut self, row: AcceptedMoveRow) {
        self.final_cost = row.cost_after;
        self.accepted_moves.push(row);
    }

    pub fn finish(&mut self, cycles: usize, final_cost: SolutionCost) {
        self.cycles = cycles;
        self.final_cost = final_cost;
        self.elapsed = Timestamp::now().duration_since(self.started_at);
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn elapsed(&self) -> SignedDuration {
        self.elapsed
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn initial_cost(&self) -> SolutionCost {
        self.initial_cost
    }

    pub fn final_cost(&self) -> SolutionCost {
        self.final_cost
    }

    pub fn accepted_moves(&self) -> &[AcceptedMoveRow] {
        &self.accepted_moves
    }
}
