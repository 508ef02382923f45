use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{node::NodeType, time_window::TimeWindow},
    solver::solver_params::SolverParams,
};

fn default_speed() -> f64 {
    1.0
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "PickDeliverProblem")]
pub struct JsonPickDeliverProblem {
    pub orders: Vec<OrderRow>,
    pub vehicles: Vec<VehicleRow>,

    #[serde(default)]
    pub params: SolverParams,
}

impl JsonPickDeliverProblem {
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).context("Failed to parse pickup and delivery problem")
    }
}

/// One pickup/delivery pair as supplied by the caller.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Order")]
pub struct OrderRow {
    pub id: i64,
    pub demand: f64,

    pub pickup_location: [f64; 2],
    pub delivery_location: [f64; 2],

    #[serde(default)]
    pub pickup_window: TimeWindow,
    #[serde(default)]
    pub delivery_window: TimeWindow,

    #[serde(default)]
    pub pickup_service_time: f64,
    #[serde(default)]
    pub delivery_service_time: f64,
}

/// A vehicle type, instantiated `count` times.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct VehicleRow {
    pub id: i64,
    pub count: i64,
    pub capacity: f64,

    #[serde(default = "default_speed")]
    pub speed: f64,

    pub start_location: [f64; 2],

    /// Defaults to the start location
    pub end_location: Option<[f64; 2]>,

    #[serde(default)]
    pub start_window: TimeWindow,
    #[serde(default)]
    pub end_window: TimeWindow,

    #[serde(default)]
    pub start_service_time: f64,
    #[serde(default)]
    pub end_service_time: f64,
}

/// One visited stop of one used vehicle.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Stop")]
pub struct ResultRow {
    /// 1-based number of the vehicle among the used ones
    pub vehicle_seq: usize,
    pub vehicle_id: i64,
    /// 1-based position in the route, depots included
    pub stop_seq: usize,
    pub node_id: usize,
    pub node_type: NodeType,
    pub order_id: Option<i64>,
    pub arrival_time: f64,
    pub wait_time: f64,
    pub departure_time: f64,
    pub load: f64,
}
