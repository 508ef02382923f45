use std::sync::Arc;

use crate::{
    problem::{
        location::Location,
        pick_deliver_problem::{PickDeliverProblem, PickDeliverProblemBuilder, Stop},
        time_window::TimeWindow,
    },
    solver::{
        diagnostics::Diagnostics,
        insertion::OrderInsertion,
        solution::{fleet::Fleet, route_id::RouteIdx, working_solution::Solution},
    },
};

/// Order with unbounded windows and no service time; its external id is its
/// index in the problem.
pub struct TestOrder {
    demand: f64,
    pickup: Stop,
    delivery: Stop,
}

impl TestOrder {
    pub fn new(demand: f64, pickup: (f64, f64), delivery: (f64, f64)) -> Self {
        TestOrder {
            demand,
            pickup: Stop::at(Location::from_cartesian(pickup.0, pickup.1)),
            delivery: Stop::at(Location::from_cartesian(delivery.0, delivery.1)),
        }
    }

    pub fn with_pickup_window(mut self, start: f64, end: f64) -> Self {
        self.pickup.time_window = TimeWindow::new(start, end);
        self
    }

    pub fn with_delivery_window(mut self, start: f64, end: f64) -> Self {
        self.delivery.time_window = TimeWindow::new(start, end);
        self
    }

    pub fn with_service_time(mut self, service_time: f64) -> Self {
        self.pickup.service_time = service_time;
        self.delivery.service_time = service_time;
        self
    }
}

/// Vehicle type with speed 1 and both depots at the origin.
pub struct TestVehicle {
    count: i64,
    capacity: f64,
    speed: f64,
    start: Stop,
    end: Stop,
}

impl TestVehicle {
    pub fn new(count: i64, capacity: f64) -> Self {
        TestVehicle {
            count,
            capacity,
            speed: 1.0,
            start: Stop::at(Location::from_cartesian(0.0, 0.0)),
            end: Stop::at(Location::from_cartesian(0.0, 0.0)),
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_start_window(mut self, time_window: TimeWindow) -> Self {
        self.start.time_window = time_window;
        self
    }

    pub fn with_end_window(mut self, time_window: TimeWindow) -> Self {
        self.end.time_window = time_window;
        self
    }
}

pub fn create_problem(orders: Vec<TestOrder>, vehicles: Vec<TestVehicle>) -> PickDeliverProblem {
    let mut builder = PickDeliverProblemBuilder::default();

    for (index, order) in orders.iter().enumerate() {
        builder.add_order(index as i64, order.demand, &order.pickup, &order.delivery);
    }

    for (index, vehicle) in vehicles.iter().enumerate() {
        builder.add_vehicle_type(
            index as i64,
            vehicle.count,
            vehicle.capacity,
            vehicle.speed,
            &vehicle.start,
            &vehicle.end,
        );
    }

    builder.build()
}

pub struct TestRoute {
    pub route_id: usize,
    pub order_ids: Vec<usize>,
}

/// Solution where each listed route serves its orders one after the other.
pub fn create_test_solution(problem: Arc<PickDeliverProblem>, routes: Vec<TestRoute>) -> Solution {
    let fleet = Fleet::build(&problem, &mut Diagnostics::default());
    let mut solution = Solution::new(problem, fleet);

    for route in routes {
        let route_id = RouteIdx::new(route.route_id);

        for order_id in route.order_ids {
            let len = solution.route(route_id).len();
            solution.insert(&OrderInsertion {
                route_id,
                order_id: order_id.into(),
                pickup_position: len - 1,
                delivery_position: len,
            });
        }
    }

    solution
}
