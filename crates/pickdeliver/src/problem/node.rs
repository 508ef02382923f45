use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    index_newtype,
    problem::{location::Location, order::OrderIdx, time_window::TimeWindow},
};

index_newtype!(NodeIdx, Node);

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    End,
    Pickup,
    Delivery,
}

impl NodeType {
    pub fn is_depot(&self) -> bool {
        matches!(self, NodeType::Start | NodeType::End)
    }
}

/// A visitable point: a vehicle depot (start or end) or one side of an order.
#[derive(Serialize, Debug, Clone)]
pub struct Node {
    node_type: NodeType,
    location: Location,
    demand: f64,
    time_window: TimeWindow,
    service_time: f64,
    order: Option<OrderIdx>,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is_start(&self) -> bool {
        self.node_type == NodeType::Start
    }

    pub fn is_end(&self) -> bool {
        self.node_type == NodeType::End
    }

    pub fn is_pickup(&self) -> bool {
        self.node_type == NodeType::Pickup
    }

    pub fn is_delivery(&self) -> bool {
        self.node_type == NodeType::Delivery
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Signed load change: positive on pickups, negative on deliveries.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    pub fn order(&self) -> Option<OrderIdx> {
        self.order
    }
}

pub struct NodeBuilder {
    node_type: NodeType,
    location: Option<Location>,
    demand: f64,
    time_window: TimeWindow,
    service_time: f64,
    order: Option<OrderIdx>,
}

impl NodeBuilder {
    pub fn new(node_type: NodeType) -> Self {
        NodeBuilder {
            node_type,
            location: None,
            demand: 0.0,
            time_window: TimeWindow::default(),
            service_time: 0.0,
            order: None,
        }
    }

    pub fn set_location(&mut self, location: Location) -> &mut NodeBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_demand(&mut self, demand: f64) -> &mut NodeBuilder {
        self.demand = demand;
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut NodeBuilder {
        self.time_window = time_window;
        self
    }

    pub fn set_service_time(&mut self, service_time: f64) -> &mut NodeBuilder {
        self.service_time = service_time;
        self
    }

    pub fn set_order(&mut self, order: OrderIdx) -> &mut NodeBuilder {
        self.order = Some(order);
        self
    }

    pub fn build(self) -> Node {
        let demand = match self.node_type {
            NodeType::Start | NodeType::End => 0.0,
            NodeType::Pickup => self.demand.abs(),
            NodeType::Delivery => -self.demand.abs(),
        };

        Node {
            node_type: self.node_type,
            location: self.location.expect("Node location is required"),
            demand,
            time_window: self.time_window,
            service_time: self.service_time,
            order: self.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_sign_follows_node_type() {
        let mut builder = NodeBuilder::new(NodeType::Delivery);
        builder
            .set_location(Location::from_cartesian(1.0, 1.0))
            .set_demand(4.0);
        assert_eq!(builder.build().demand(), -4.0);

        let mut builder = NodeBuilder::new(NodeType::Pickup);
        builder
            .set_location(Location::from_cartesian(1.0, 1.0))
            .set_demand(4.0);
        assert_eq!(builder.build().demand(), 4.0);

        let mut builder = NodeBuilder::new(NodeType::Start);
        builder
            .set_location(Location::from_cartesian(0.0, 0.0))
            .set_demand(4.0);
        let depot = builder.build();
        assert_eq!(depot.demand(), 0.0);
        assert!(depot.is_start());
        assert!(depot.node_type().is_depot());
    }
}
