use fxhash::FxHashMap;

use crate::{
    json::types::ResultRow,
    problem::{
        node::{NodeIdx, NodeType},
        order::OrderIdx,
        pick_deliver_problem::PickDeliverProblem,
        vehicle_type::VehicleTypeIdx,
    },
};

/// The stop sequence of one vehicle, always bracketed by its start and end
/// depots, together with the metrics derived from it.
///
/// Every structural change recomputes the whole route in a single forward
/// pass, so the derived vectors are always aligned with `nodes`.
#[derive(Clone, Debug)]
pub struct VehicleRoute {
    vehicle_type_id: VehicleTypeIdx,
    capacity: f64,
    speed: f64,

    /// Node sequence, start depot first and end depot last
    nodes: Vec<NodeIdx>,

    /// Pickup and delivery position of every order on the route
    orders: FxHashMap<OrderIdx, (usize, usize)>,

    arrival_times: Vec<f64>,
    departure_times: Vec<f64>,
    waiting_times: Vec<f64>,

    /// loads[i] is the load after serving the node at position i
    loads: Vec<f64>,

    twv_count: usize,
    cv_count: usize,
    total_wait_time: f64,
    total_travel_time: f64,
    total_service_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStop {
    pub position: usize,
    pub node_id: NodeIdx,
    pub arrival_time: f64,
    pub waiting_time: f64,
    pub departure_time: f64,
    pub load: f64,
}

impl VehicleRoute {
    pub fn empty(problem: &PickDeliverProblem, vehicle_type_id: VehicleTypeIdx) -> Self {
        let vehicle_type = problem.vehicle_type(vehicle_type_id);

        let mut route = VehicleRoute {
            vehicle_type_id,
            capacity: vehicle_type.capacity(),
            speed: vehicle_type.speed(),
            nodes: vec![vehicle_type.start(), vehicle_type.end()],
            orders: FxHashMap::default(),
            arrival_times: Vec::new(),
            departure_times: Vec::new(),
            waiting_times: Vec::new(),
            loads: Vec::new(),
            twv_count: 0,
            cv_count: 0,
            total_wait_time: 0.0,
            total_travel_time: 0.0,
            total_service_time: 0.0,
        };

        route.update_data(problem);

        route
    }

    pub fn vehicle_type_id(&self) -> VehicleTypeIdx {
        self.vehicle_type_id
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of positions, depots included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A route is empty when it only visits its depots.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn node_id(&self, position: usize) -> NodeIdx {
        self.nodes[position]
    }

    pub fn start_site(&self) -> NodeIdx {
        self.nodes[0]
    }

    pub fn end_site(&self) -> NodeIdx {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn contains_order(&self, order_id: OrderIdx) -> bool {
        self.orders.contains_key(&order_id)
    }

    pub fn order_positions(&self, order_id: OrderIdx) -> Option<(usize, usize)> {
        self.orders.get(&order_id).copied()
    }

    /// Orders on the route, in the order of their pickups.
    pub fn orders<'a>(
        &'a self,
        problem: &'a PickDeliverProblem,
    ) -> impl Iterator<Item = OrderIdx> + 'a {
        self.nodes.iter().filter_map(move |&node_id| {
            let node = problem.node(node_id);
            if node.is_pickup() { node.order() } else { None }
        })
    }

    pub fn arrival_time(&self, position: usize) -> f64 {
        self.arrival_times[position]
    }

    pub fn departure_time(&self, position: usize) -> f64 {
        self.departure_times[position]
    }

    pub fn waiting_time(&self, position: usize) -> f64 {
        self.waiting_times[position]
    }

    pub fn load_at(&self, position: usize) -> f64 {
        self.loads[position]
    }

    pub fn twv_count(&self) -> usize {
        self.twv_count
    }

    pub fn cv_count(&self) -> usize {
        self.cv_count
    }

    pub fn total_wait_time(&self) -> f64 {
        self.total_wait_time
    }

    pub fn total_travel_time(&self) -> f64 {
        self.total_travel_time
    }

    pub fn total_service_time(&self) -> f64 {
        self.total_service_time
    }

    /// Time between leaving the start depot and leaving the end depot.
    pub fn duration(&self) -> f64 {
        self.departure_times[self.len() - 1] - self.departure_times[0]
    }

    pub fn is_feasible(&self) -> bool {
        self.twv_count == 0 && self.cv_count == 0
    }

    pub fn stops(&self) -> impl Iterator<Item = RouteStop> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(position, &node_id)| RouteStop {
                position,
                node_id,
                arrival_time: self.arrival_times[position],
                waiting_time: self.waiting_times[position],
                departure_time: self.departure_times[position],
                load: self.loads[position],
            })
    }

    /// Inserts both nodes of `order_id`. The pickup goes to `pickup_position`
    /// and the delivery to `delivery_position`, counted after the pickup was
    /// inserted. Both must fall strictly between the depots.
    pub fn insert(
        &mut self,
        problem: &PickDeliverProblem,
        order_id: OrderIdx,
        pickup_position: usize,
        delivery_position: usize,
    ) {
        assert!(
            !self.contains_order(order_id),
            "order {order_id} is already on the route"
        );
        assert!(
            pickup_position >= 1 && pickup_position < self.nodes.len(),
            "pickup position {pickup_position} outside of route with {} nodes",
            self.nodes.len()
        );
        assert!(
            delivery_position > pickup_position && delivery_position <= self.nodes.len(),
            "delivery position {delivery_position} must follow pickup position {pickup_position}"
        );

        let order = problem.order(order_id);
        self.nodes.insert(pickup_position, order.pickup());
        self.nodes.insert(delivery_position, order.delivery());

        self.update_data(problem);
    }

    /// Appends the order right before the end depot.
    pub fn push_back(&mut self, problem: &PickDeliverProblem, order_id: OrderIdx) {
        let pickup_position = self.nodes.len() - 1;
        self.insert(problem, order_id, pickup_position, pickup_position + 1);
    }

    pub fn remove(&mut self, problem: &PickDeliverProblem, order_id: OrderIdx) -> bool {
        let Some((pickup_position, delivery_position)) = self.order_positions(order_id) else {
            return false;
        };

        self.nodes.remove(delivery_position);
        self.nodes.remove(pickup_position);

        self.update_data(problem);

        true
    }

    fn reset_data(&mut self) {
        let len = self.nodes.len();

        self.orders.clear();
        self.arrival_times.clear();
        self.arrival_times.resize(len, 0.0);
        self.departure_times.clear();
        self.departure_times.resize(len, 0.0);
        self.waiting_times.clear();
        self.waiting_times.resize(len, 0.0);
        self.loads.clear();
        self.loads.resize(len, 0.0);

        self.twv_count = 0;
        self.cv_count = 0;
        self.total_wait_time = 0.0;
        self.total_travel_time = 0.0;
        self.total_service_time = 0.0;
    }

    fn update_data(&mut self, problem: &PickDeliverProblem) {
        self.reset_data();

        let mut load = 0.0;

        for position in 0..self.nodes.len() {
            let node_id = self.nodes[position];
            let node = problem.node(node_id);
            let time_window = node.time_window();

            let (arrival_time, waiting_time) = if position == 0 {
                (time_window.start(), 0.0)
            } else {
                let travel_time =
                    problem.travel_time(self.nodes[position - 1], node_id, self.speed);
                self.total_travel_time += travel_time;

                let ready = self.departure_times[position - 1] + travel_time;
                (
                    time_window.arrival_time(ready),
                    time_window.waiting_time(ready),
                )
            };

            if !time_window.is_satisfied(arrival_time) {
                self.twv_count += 1;
            }

            self.arrival_times[position] = arrival_time;
            self.waiting_times[position] = waiting_time;
            self.departure_times[position] = arrival_time + node.service_time();
            self.total_wait_time += waiting_time;
            self.total_service_time += node.service_time();

            load += node.demand();
            if load > self.capacity {
                self.cv_count += 1;
            }
            self.loads[position] = load;

            if let Some(order_id) = node.order() {
                let positions = self.orders.entry(order_id).or_insert((position, position));
                if node.is_pickup() {
                    positions.0 = position;
                } else {
                    positions.1 = position;
                }
            }
        }
    }

    /// Output rows for this route, `vehicle_seq` being the 1-based number of
    /// the vehicle among the used ones.
    pub fn result_rows(&self, problem: &PickDeliverProblem, vehicle_seq: usize) -> Vec<ResultRow> {
        let vehicle_id = problem.vehicle_type(self.vehicle_type_id).external_id();

        self.stops()
            .map(|stop| {
                let node = problem.node(stop.node_id);
                ResultRow {
                    vehicle_seq,
                    vehicle_id,
                    stop_seq: stop.position + 1,
                    node_id: stop.node_id.get(),
                    node_type: node.node_type(),
                    order_id: node
                        .order()
                        .map(|order_id| problem.order(order_id).external_id()),
                    arrival_time: stop.arrival_time,
                    wait_time: stop.waiting_time,
                    departure_time: stop.departure_time,
                    load: stop.load,
                }
            })
            .collect()
    }

    /// Compact one-line description used in debug logs.
    pub fn describe(&self, problem: &PickDeliverProblem) -> String {
        let nodes = self
            .nodes
            .iter()
            .map(|&node_id| {
                let prefix = match problem.node(node_id).node_type() {
                    NodeType::Start => 'S',
                    NodeType::End => 'E',
                    NodeType::Pickup => 'P',
                    NodeType::Delivery => 'D',
                };
                format!("{prefix}{node_id}")
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "vehicle {}: [{}] twv={} cv={} wait={} duration={}",
            problem.vehicle_type(self.vehicle_type_id).external_id(),
            nodes,
            self.twv_count,
            self.cv_count,
            self.total_wait_time,
            self.duration()
        )
    }
}
