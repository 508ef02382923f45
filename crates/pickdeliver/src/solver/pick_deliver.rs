use std::sync::Arc;

use fxhash::FxHashSet;
use tracing::{info, instrument};

use crate::{
    json::types::{JsonPickDeliverProblem, OrderRow, ResultRow, VehicleRow},
    problem::{
        location::Location,
        node::{Node, NodeIdx},
        order::{Order, OrderIdx},
        pick_deliver_problem::{PickDeliverProblem, PickDeliverProblemBuilder, Stop},
    },
    solver::{
        construction::initial_solution::InitialSolution,
        diagnostics::Diagnostics,
        error::PickDeliverError,
        ls::optimizer::Optimizer,
        solution::{fleet::Fleet, working_solution::Solution},
        solver_params::SolverParams,
        statistics::SearchStatistics,
    },
};

/// Outcome of one request.
pub struct PickDeliverResult {
    pub solution: Solution,
    pub rows: Vec<ResultRow>,

    /// External ids of the orders left out of every route
    pub unassigned_orders: Vec<i64>,

    pub statistics: SearchStatistics,
    pub diagnostics: Diagnostics,
}

/// One validated request: the problem instance, its fleet and the orders
/// rejected while reading the rows.
pub struct PickDeliver {
    problem: Arc<PickDeliverProblem>,
    fleet: Fleet,
    rejected_orders: FxHashSet<OrderIdx>,

    /// External ids of orders that never made it into the problem
    dropped_orders: Vec<i64>,

    params: SolverParams,
    diagnostics: Diagnostics,
}

fn is_valid_location(location: &[f64; 2]) -> bool {
    location.iter().all(|coordinate| coordinate.is_finite())
}

fn is_valid_service_time(service_time: f64) -> bool {
    service_time.is_finite() && service_time >= 0.0
}

impl PickDeliver {
    #[instrument(skip_all, level = "debug")]
    pub fn new(
        orders: &[OrderRow],
        vehicles: &[VehicleRow],
        params: SolverParams,
    ) -> Result<Self, PickDeliverError> {
        let mut diagnostics = Diagnostics::default();
        let mut builder = PickDeliverProblemBuilder::default();
        let mut rejected_orders = FxHashSet::default();
        let mut dropped_orders = Vec::new();
        let mut seen_ids = FxHashSet::default();

        for vehicle in vehicles {
            if !(vehicle.speed.is_finite() && vehicle.speed > 0.0) {
                diagnostics.error(format!(
                    "Illegal speed {} found in vehicle {}",
                    vehicle.speed, vehicle.id
                ));
                continue;
            }

            if !(vehicle.capacity.is_finite() && vehicle.capacity >= 0.0) {
                diagnostics.error(format!(
                    "Illegal capacity {} found in vehicle {}",
                    vehicle.capacity, vehicle.id
                ));
                continue;
            }

            let end_location = vehicle.end_location.unwrap_or(vehicle.start_location);
            if !is_valid_location(&vehicle.start_location) || !is_valid_location(&end_location) {
                diagnostics.error(format!("Illegal location found in vehicle {}", vehicle.id));
                continue;
            }

            if !is_valid_service_time(vehicle.start_service_time)
                || !is_valid_service_time(vehicle.end_service_time)
            {
                diagnostics.error(format!("Illegal service time found in vehicle {}", vehicle.id));
                continue;
            }

            builder.add_vehicle_type(
                vehicle.id,
                vehicle.count,
                vehicle.capacity,
                vehicle.speed,
                &Stop::new(
                    Location::from(vehicle.start_location),
                    vehicle.start_window,
                    vehicle.start_service_time,
                ),
                &Stop::new(
                    Location::from(end_location),
                    vehicle.end_window,
                    vehicle.end_service_time,
                ),
            );
        }

        for order in orders {
            if !is_valid_location(&order.pickup_location)
                || !is_valid_location(&order.delivery_location)
            {
                diagnostics.error(format!("Illegal location found in order {}", order.id));
                dropped_orders.push(order.id);
                continue;
            }

            let order_id = builder.add_order(
                order.id,
                order.demand,
                &Stop::new(
                    Location::from(order.pickup_location),
                    order.pickup_window,
                    order.pickup_service_time,
                ),
                &Stop::new(
                    Location::from(order.delivery_location),
                    order.delivery_window,
                    order.delivery_service_time,
                ),
            );

            if let Some(reason) = Self::order_rejection(order, &mut seen_ids) {
                diagnostics.error(format!("Order {} rejected: {reason}", order.id));
                rejected_orders.insert(order_id);
            }
        }

        let problem = Arc::new(builder.build());
        let fleet = Fleet::build(&problem, &mut diagnostics);

        if !fleet.is_fleet_ok(&problem, &mut diagnostics) {
            return Err(PickDeliverError::InvalidFleet {
                errors: diagnostics.errors().to_vec(),
            });
        }

        Ok(PickDeliver {
            problem,
            fleet,
            rejected_orders,
            dropped_orders,
            params,
            diagnostics,
        })
    }

    pub fn from_json(json: JsonPickDeliverProblem) -> Result<Self, PickDeliverError> {
        PickDeliver::new(&json.orders, &json.vehicles, json.params)
    }

    fn order_rejection(order: &OrderRow, seen_ids: &mut FxHashSet<i64>) -> Option<&'static str> {
        if !seen_ids.insert(order.id) {
            return Some("duplicate order id");
        }

        if !(order.demand.is_finite() && order.demand >= 0.0) {
            return Some("illegal demand");
        }

        if !order.pickup_window.is_valid() || !order.delivery_window.is_valid() {
            return Some("illegal time window");
        }

        if !is_valid_service_time(order.pickup_service_time)
            || !is_valid_service_time(order.delivery_service_time)
        {
            return Some("illegal service time");
        }

        None
    }

    pub fn problem(&self) -> &PickDeliverProblem {
        self.problem.as_ref()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn node(&self, node_id: NodeIdx) -> &Node {
        self.problem.node(node_id)
    }

    pub fn orders(&self) -> &[Order] {
        self.problem.orders()
    }

    pub fn order_of(&self, node_id: NodeIdx) -> Option<OrderIdx> {
        self.problem.order_of(node_id)
    }

    pub fn is_rejected(&self, order_id: OrderIdx) -> bool {
        self.rejected_orders.contains(&order_id)
    }

    #[instrument(skip_all, level = "debug")]
    pub fn solve(self) -> PickDeliverResult {
        let PickDeliver {
            problem,
            fleet,
            rejected_orders,
            dropped_orders,
            params,
            mut diagnostics,
        } = self;

        let initial = InitialSolution::build(
            Arc::clone(&problem),
            fleet,
            &rejected_orders,
            &mut diagnostics,
        );
        info!("Initial solution {}", initial.cost());

        let (solution, statistics) = if params.enable_local_search {
            let mut optimizer = Optimizer::new(params.max_cycles);
            let solution = optimizer.optimize(initial);
            let statistics = optimizer.into_statistics();
            (solution, statistics)
        } else {
            (initial, None)
        };

        let statistics = statistics.unwrap_or_else(|| {
            let mut statistics = SearchStatistics::start(solution.cost());
            statistics.finish(0, solution.cost());
            statistics
        });

        diagnostics.log(format!("Final solution {}", solution.cost()));
        diagnostics.log(format!(
            "Total travel time {}, total service time {}",
            solution.total_travel_time(),
            solution.total_service_time()
        ));

        let unassigned_orders = solution
            .unassigned_orders()
            .iter()
            .map(|&order_id| problem.order(order_id).external_id())
            .chain(dropped_orders)
            .collect();

        PickDeliverResult {
            rows: solution.result_rows(),
            solution,
            unassigned_orders,
            statistics,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        json::types::{JsonPickDeliverProblem, OrderRow, VehicleRow},
        problem::time_window::TimeWindow,
        solver::{
            error::PickDeliverError, pick_deliver::PickDeliver, solver_params::SolverParams,
        },
    };

    fn order(id: i64, demand: f64, pickup: [f64; 2], delivery: [f64; 2]) -> OrderRow {
        OrderRow {
            id,
            demand,
            pickup_location: pickup,
            delivery_location: delivery,
            pickup_window: TimeWindow::default(),
            delivery_window: TimeWindow::default(),
            pickup_service_time: 0.0,
            delivery_service_time: 0.0,
        }
    }

    fn vehicle(id: i64, count: i64, capacity: f64) -> VehicleRow {
        VehicleRow {
            id,
            count,
            capacity,
            speed: 1.0,
            start_location: [0.0, 0.0],
            end_location: None,
            start_window: TimeWindow::default(),
            end_window: TimeWindow::default(),
            start_service_time: 0.0,
            end_service_time: 0.0,
        }
    }

    #[test]
    fn test_solve_small_request() {
        let pick_deliver = PickDeliver::new(
            &[
                order(10, 2.0, [1.0, 0.0], [2.0, 0.0]),
                order(20, 2.0, [3.0, 0.0], [4.0, 0.0]),
            ],
            &[vehicle(1, 2, 10.0)],
            SolverParams::default(),
        )
        .unwrap();

        let result = pick_deliver.solve();

        assert!(result.solution.is_feasible());
        assert!(result.unassigned_orders.is_empty());
        assert_eq!(result.rows.len(), 6);
        assert!(result.rows.iter().all(|row| row.vehicle_seq == 1 && row.vehicle_id == 1));
        assert_eq!(
            result
                .rows
                .iter()
                .filter_map(|row| row.order_id)
                .collect::<Vec<_>>(),
            vec![10, 20, 20, 10]
        );
        assert_eq!(result.solution.cost().duration, 8.0);
    }

    #[test]
    fn test_invalid_orders_are_rejected_not_fatal() {
        let mut inverted = order(3, 1.0, [1.0, 0.0], [2.0, 0.0]);
        inverted.delivery_window = TimeWindow::new(10.0, 5.0);

        let pick_deliver = PickDeliver::new(
            &[
                order(1, 1.0, [1.0, 0.0], [2.0, 0.0]),
                order(1, 1.0, [1.0, 0.0], [2.0, 0.0]),
                order(2, -1.0, [1.0, 0.0], [2.0, 0.0]),
                inverted,
            ],
            &[vehicle(1, 1, 10.0)],
            SolverParams::default(),
        )
        .unwrap();

        assert_eq!(pick_deliver.diagnostics().errors().len(), 3);
        assert_eq!(pick_deliver.orders().len(), 4);

        let result = pick_deliver.solve();
        assert_eq!(result.unassigned_orders, vec![1, 2, 3]);
        assert_eq!(result.solution.cost().vehicles_used, 1);
    }

    #[test]
    fn test_non_finite_service_times_are_rejected() {
        let mut unbounded = order(2, 1.0, [3.0, 0.0], [4.0, 0.0]);
        unbounded.delivery_service_time = f64::INFINITY;

        let mut slow_depot = vehicle(1, 1, 10.0);
        slow_depot.start_service_time = f64::NAN;

        let pick_deliver = PickDeliver::new(
            &[
                OrderRow {
                    pickup_service_time: f64::NAN,
                    ..order(1, 1.0, [1.0, 0.0], [2.0, 0.0])
                },
                unbounded,
                order(3, 1.0, [1.0, 1.0], [2.0, 1.0]),
            ],
            &[slow_depot, vehicle(2, 1, 10.0)],
            SolverParams::default(),
        )
        .unwrap();

        let errors = pick_deliver.diagnostics().errors();
        assert!(errors.iter().any(|error| error == "Illegal service time found in vehicle 1"));
        assert!(errors.iter().any(|error| error.starts_with("Order 1 rejected")));
        assert!(errors.iter().any(|error| error.starts_with("Order 2 rejected")));
        assert_eq!(pick_deliver.fleet().len(), 1);

        let result = pick_deliver.solve();
        assert_eq!(result.unassigned_orders, vec![1, 2]);
        assert!(result.solution.is_feasible());
        assert!(
            result
                .rows
                .iter()
                .all(|row| row.vehicle_id == 2 && row.departure_time.is_finite())
        );
    }

    #[test]
    fn test_orders_with_illegal_locations_are_reported_unassigned() {
        let pick_deliver = PickDeliver::new(
            &[
                order(1, 1.0, [f64::NAN, 0.0], [2.0, 0.0]),
                order(2, 1.0, [1.0, 0.0], [2.0, 0.0]),
            ],
            &[vehicle(1, 1, 10.0)],
            SolverParams::default(),
        )
        .unwrap();

        assert_eq!(pick_deliver.orders().len(), 1);

        let result = pick_deliver.solve();
        assert_eq!(result.unassigned_orders, vec![1]);
        assert!(
            result
                .diagnostics
                .error_text()
                .contains("Illegal location found in order 1")
        );
    }

    #[test]
    fn test_negative_vehicle_count_is_recoverable() {
        let pick_deliver = PickDeliver::new(
            &[order(1, 1.0, [1.0, 0.0], [2.0, 0.0])],
            &[vehicle(1, -2, 10.0), vehicle(2, 1, 10.0)],
            SolverParams::default(),
        )
        .unwrap();

        assert_eq!(pick_deliver.fleet().len(), 1);
        assert!(pick_deliver.diagnostics().has_errors());
    }

    #[test]
    fn test_invalid_fleet_is_fatal() {
        let mut broken = vehicle(1, 1, 10.0);
        broken.start_window = TimeWindow::new(100.0, 200.0);
        broken.end_window = TimeWindow::new(0.0, 50.0);

        let result = PickDeliver::new(
            &[order(1, 1.0, [1.0, 0.0], [2.0, 0.0])],
            &[broken],
            SolverParams::default(),
        );

        match result {
            Err(PickDeliverError::InvalidFleet { errors }) => {
                assert!(errors.iter().any(|error| error.contains("not feasible")));
            }
            Ok(_) => panic!("expected an invalid fleet"),
        }
    }

    #[test]
    fn test_no_vehicles_is_fatal() {
        let result = PickDeliver::new(
            &[order(1, 1.0, [1.0, 0.0], [2.0, 0.0])],
            &[vehicle(1, 1, 10.0)].map(|mut row| {
                row.speed = 0.0;
                row
            }),
            SolverParams::default(),
        );

        assert!(matches!(result, Err(PickDeliverError::InvalidFleet { .. })));
    }

    #[test]
    fn test_local_search_can_be_disabled() {
        let json = r#"{
            "orders": [
                { "id": 1, "demand": 1, "pickup_location": [1, 0], "delivery_location": [2, 0] }
            ],
            "vehicles": [
                { "id": 5, "count": 1, "capacity": 4, "start_location": [0, 0] }
            ],
            "params": { "enable_local_search": false }
        }"#;

        let problem = JsonPickDeliverProblem::from_json(json).unwrap();
        let result = PickDeliver::from_json(problem).unwrap().solve();

        assert_eq!(result.statistics.cycles(), 0);
        assert!(result.statistics.accepted_moves().is_empty());
        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.rows[3].arrival_time, 4.0);
    }
}
