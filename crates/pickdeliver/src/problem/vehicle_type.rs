use serde::Serialize;

use crate::{index_newtype, problem::node::NodeIdx};

index_newtype!(VehicleTypeIdx, VehicleType);

#[derive(Serialize, Debug, Clone)]
pub struct VehicleType {
    external_id: i64,
    count: i64,
    capacity: f64,
    speed: f64,
    start: NodeIdx,
    end: NodeIdx,
}

impl VehicleType {
    pub(crate) fn new(
        external_id: i64,
        count: i64,
        capacity: f64,
        speed: f64,
        start: NodeIdx,
        end: NodeIdx,
    ) -> Self {
        VehicleType {
            external_id,
            count,
            capacity,
            speed,
            start,
            end,
        }
    }

    pub fn external_id(&self) -> i64 {
        self.external_id
    }

    /// Number of instances as supplied; may be negative on bad input.
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn start(&self) -> NodeIdx {
        self.start
    }

    pub fn end(&self) -> NodeIdx {
        self.end
    }
}
