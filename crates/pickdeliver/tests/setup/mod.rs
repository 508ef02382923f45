#![allow(dead_code)]

use pickdeliver::{
    json::types::{OrderRow, VehicleRow},
    problem::time_window::TimeWindow,
};
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn order_row(id: i64, demand: f64, pickup: [f64; 2], delivery: [f64; 2]) -> OrderRow {
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

pub fn windowed_order_row(
    id: i64,
    demand: f64,
    (pickup, pickup_window): ([f64; 2], TimeWindow),
    (delivery, delivery_window): ([f64; 2], TimeWindow),
) -> OrderRow {
    OrderRow {
        pickup_window,
        delivery_window,
        ..order_row(id, demand, pickup, delivery)
    }
}

/// Vehicle type with both depots at the origin and speed 1.
pub fn vehicle_row(id: i64, count: i64, capacity: f64) -> VehicleRow {
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

/// Deterministic instance spread over a 10x10 square with loose windows.
pub fn generated_orders(count: usize) -> Vec<OrderRow> {
    (0..count)
        .map(|index| {
            let pickup = [((index * 7) % 10) as f64, ((index * 3) % 10) as f64];
            let delivery = [((index * 5 + 3) % 10) as f64, ((index * 11 + 1) % 10) as f64];
            let mut row = order_row(index as i64 + 1, 1.0 + (index % 4) as f64, pickup, delivery);
            row.pickup_window = TimeWindow::new(0.0, 300.0);
            row.delivery_window = TimeWindow::new(0.0, 600.0);
            row.pickup_service_time = 1.0;
            row.delivery_service_time = 1.0;
            row
        })
        .collect()
}
