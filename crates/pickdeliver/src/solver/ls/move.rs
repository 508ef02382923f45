use crate::solver::{
    cost::SolutionCost,
    ls::{
        exchange::ExchangeOperator, inter_relocate::InterRelocateOperator,
        relocate::RelocateOperator,
    },
    solution::{route::VehicleRoute, route_id::RouteIdx, working_solution::Solution},
};

pub trait LocalSearchOperator {
    /// Copies of every route the move changes, with the move performed on
    /// them. The solution itself is left untouched.
    fn simulate(&self, solution: &Solution) -> Vec<(RouteIdx, VehicleRoute)>;

    fn updated_routes(&self) -> Vec<RouteIdx>;

    fn apply(&self, solution: &mut Solution) {
        let routes = self.simulate(solution);
        solution.apply(routes);
    }
}

#[derive(Debug)]
pub enum LocalSearchMove {
    /// Moves an order to other positions of its own route.
    Relocate(RelocateOperator),

    /// Moves an order from one route to another.
    InterRelocate(InterRelocateOperator),

    /// Swaps two orders between two routes, each at its cheapest position.
    Exchange(ExchangeOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "Relocate",
            LocalSearchMove::InterRelocate(_) => "Inter-Relocate",
            LocalSearchMove::Exchange(_) => "Exchange",
        }
    }

    fn operator(&self) -> &dyn LocalSearchOperator {
        match self {
            LocalSearchMove::Relocate(op) => op,
            LocalSearchMove::InterRelocate(op) => op,
            LocalSearchMove::Exchange(op) => op,
        }
    }

    pub fn simulate(&self, solution: &Solution) -> Vec<(RouteIdx, VehicleRoute)> {
        self.operator().simulate(solution)
    }

    pub fn updated_routes(&self) -> Vec<RouteIdx> {
        self.operator().updated_routes()
    }

    pub fn apply(&self, solution: &mut Solution) {
        self.operator().apply(solution)
    }

    pub fn evaluate(self, solution: &Solution) -> EvaluatedMove {
        let routes = self.simulate(solution);
        let cost = solution.cost_with(&routes);

        EvaluatedMove {
            r#move: self,
            routes,
            cost,
        }
    }
}

/// A move together with its simulated routes and the solution cost they
/// would produce.
#[derive(Debug)]
pub struct EvaluatedMove {
    pub r#move: LocalSearchMove,
    pub routes: Vec<(RouteIdx, VehicleRoute)>,
    pub cost: SolutionCost,
}

impl EvaluatedMove {
    pub fn is_improving(&self, current: SolutionCost) -> bool {
        self.cost < current
    }

    pub fn route(&self, route_id: RouteIdx) -> Option<&VehicleRoute> {
        self.routes
            .iter()
            .find(|(updated_id, _)| *updated_id == route_id)
            .map(|(_, route)| route)
    }
}
