use serde::Serialize;

use crate::{index_newtype, problem::node::NodeIdx};

index_newtype!(OrderIdx, Order);

/// A pickup/delivery pair that must be served by one vehicle, pickup first.
#[derive(Serialize, Debug, Clone)]
pub struct Order {
    external_id: i64,
    pickup: NodeIdx,
    delivery: NodeIdx,
    demand: f64,
}

impl Order {
    pub(crate) fn new(external_id: i64, pickup: NodeIdx, delivery: NodeIdx, demand: f64) -> Self {
        Order {
            external_id,
            pickup,
            delivery,
            demand,
        }
    }

    pub fn external_id(&self) -> i64 {
        self.external_id
    }

    pub fn pickup(&self) -> NodeIdx {
        self.pickup
    }

    pub fn delivery(&self) -> NodeIdx {
        self.delivery
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }
}
