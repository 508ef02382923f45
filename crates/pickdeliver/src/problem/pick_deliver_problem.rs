use crate::{
    problem::{
        distance_matrix::DistanceMatrix,
        location::Location,
        node::{Node, NodeBuilder, NodeIdx, NodeType},
        order::{Order, OrderIdx},
        time_window::TimeWindow,
        vehicle_type::{VehicleType, VehicleTypeIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// One side of an order or a depot, as supplied at the boundary.
#[derive(Debug, Clone)]
pub struct Stop {
    pub location: Location,
    pub time_window: TimeWindow,
    pub service_time: f64,
}

impl Stop {
    pub fn new(location: Location, time_window: TimeWindow, service_time: f64) -> Self {
        Stop {
            location,
            time_window,
            service_time,
        }
    }

    pub fn at(location: Location) -> Self {
        Stop::new(location, TimeWindow::default(), 0.0)
    }
}

/// Immutable problem instance. Every node, order and vehicle type lives here
/// for the whole run; routes only refer to them by index.
pub struct PickDeliverProblem {
    nodes: Vec<Node>,
    orders: Vec<Order>,
    vehicle_types: Vec<VehicleType>,
    distances: DistanceMatrix,
}

impl PickDeliverProblem {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, node_id: NodeIdx) -> &Node {
        &self.nodes[node_id]
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderIdx) -> &Order {
        &self.orders[order_id]
    }

    /// The order a pickup or delivery node belongs to, `None` for depots.
    pub fn order_of(&self, node_id: NodeIdx) -> Option<OrderIdx> {
        self.node(node_id).order()
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    pub fn vehicle_type(&self, vehicle_type_id: VehicleTypeIdx) -> &VehicleType {
        &self.vehicle_types[vehicle_type_id]
    }

    pub fn travel_distance(&self, from: NodeIdx, to: NodeIdx) -> f64 {
        self.distances.travel_distance(from, to)
    }

    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx, speed: f64) -> f64 {
        self.distances.travel_distance(from, to) / speed
    }

    pub fn max_capacity(&self) -> f64 {
        self.vehicle_types
            .iter()
            .filter(|vehicle_type| vehicle_type.count() > 0)
            .map(|vehicle_type| vehicle_type.capacity())
            .fold(0.0, f64::max)
    }

    pub fn order_by_external_id(&self, external_id: i64) -> Option<OrderIdx> {
        self.orders
            .iter()
            .enumerate_idx()
            .find(|(_, order)| order.external_id() == external_id)
            .map(|(index, _)| index)
    }
}

#[derive(Default)]
pub struct PickDeliverProblemBuilder {
    nodes: Vec<Node>,
    orders: Vec<Order>,
    vehicle_types: Vec<VehicleType>,
}

impl PickDeliverProblemBuilder {
    fn push_node(&mut self, builder: NodeBuilder) -> NodeIdx {
        let node_id = NodeIdx::new(self.nodes.len());
        self.nodes.push(builder.build());
        node_id
    }

    fn stop_node(node_type: NodeType, stop: &Stop) -> NodeBuilder {
        let mut builder = NodeBuilder::new(node_type);
        builder
            .set_location(stop.location)
            .set_time_window(stop.time_window)
            .set_service_time(stop.service_time);
        builder
    }

    pub fn add_order(
        &mut self,
        external_id: i64,
        demand: f64,
        pickup: &Stop,
        delivery: &Stop,
    ) -> OrderIdx {
        let order_id = OrderIdx::new(self.orders.len());

        let mut pickup_builder = Self::stop_node(NodeType::Pickup, pickup);
        pickup_builder.set_demand(demand).set_order(order_id);
        let pickup_id = self.push_node(pickup_builder);

        let mut delivery_builder = Self::stop_node(NodeType::Delivery, delivery);
        delivery_builder.set_demand(demand).set_order(order_id);
        let delivery_id = self.push_node(delivery_builder);

        self.orders.push(Order::new(
            external_id,
            pickup_id,
            delivery_id,
            demand.abs(),
        ));

        order_id
    }

    pub fn add_vehicle_type(
        &mut self,
        external_id: i64,
        count: i64,
        capacity: f64,
        speed: f64,
        start: &Stop,
        end: &Stop,
    ) -> VehicleTypeIdx {
        let vehicle_type_id = VehicleTypeIdx::new(self.vehicle_types.len());

        let start_id = self.push_node(Self::stop_node(NodeType::Start, start));
        let end_id = self.push_node(Self::stop_node(NodeType::End, end));

        self.vehicle_types.push(VehicleType::new(
            external_id,
            count,
            capacity,
            speed,
            start_id,
            end_id,
        ));

        vehicle_type_id
    }

    pub fn build(self) -> PickDeliverProblem {
        let distances =
            DistanceMatrix::from_euclidean(self.nodes.iter().map(|node| node.location()));

        PickDeliverProblem {
            nodes: self.nodes,
            orders: self.orders,
            vehicle_types: self.vehicle_types,
            distances,
        }
    }
}
