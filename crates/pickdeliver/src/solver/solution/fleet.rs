use std::ops::Index;

use fixedbitset::FixedBitSet;

use crate::{
    problem::{
        order::OrderIdx, pick_deliver_problem::PickDeliverProblem, vehicle_type::VehicleTypeIdx,
    },
    solver::{
        diagnostics::Diagnostics,
        insertion::OrderInsertion,
        solution::{route::VehicleRoute, route_id::RouteIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Every vehicle instance of the request, one route per unit of a vehicle
/// type count. A route is unused while it carries no order.
#[derive(Clone, Debug)]
pub struct Fleet {
    routes: Vec<VehicleRoute>,
    unused: FixedBitSet,
}

impl Fleet {
    pub fn build(problem: &PickDeliverProblem, diagnostics: &mut Diagnostics) -> Self {
        let mut routes = Vec::new();

        for (vehicle_type_id, vehicle_type) in problem.vehicle_types().iter().enumerate_idx() {
            if vehicle_type.count() < 0 {
                diagnostics.error(format!(
                    "Illegal number of vehicles found in vehicle {}: {}",
                    vehicle_type.external_id(),
                    vehicle_type.count()
                ));
                diagnostics.log(format!(
                    "Skipping vehicle {}",
                    vehicle_type.external_id()
                ));
                continue;
            }

            let template = VehicleRoute::empty(problem, vehicle_type_id);
            for _ in 0..vehicle_type.count() {
                routes.push(template.clone());
            }
        }

        let mut unused = FixedBitSet::with_capacity(routes.len());
        unused.insert_range(..);

        diagnostics.log(format!("Fleet built with {} vehicles", routes.len()));

        Fleet { routes, unused }
    }

    /// Structural check of the freshly built fleet: every route must be
    /// bracketed by its depots and an empty route must be feasible.
    pub fn is_fleet_ok(&self, problem: &PickDeliverProblem, diagnostics: &mut Diagnostics) -> bool {
        if self.routes.is_empty() {
            diagnostics.error("No vehicles found");
            return false;
        }

        let mut ok = true;

        for route in &self.routes {
            let vehicle_id = problem.vehicle_type(route.vehicle_type_id()).external_id();

            if !problem.node(route.start_site()).is_start()
                || !problem.node(route.end_site()).is_end()
            {
                diagnostics.error(format!(
                    "Illegal values found on the starting or ending site of vehicle {vehicle_id}"
                ));
                ok = false;
                continue;
            }

            if route.is_empty() && !route.is_feasible() {
                diagnostics.error(format!(
                    "Vehicle {vehicle_id} is not feasible: {}",
                    route.describe(problem)
                ));
                ok = false;
            }
        }

        ok
    }

    /// Whether at least one vehicle type of the fleet could serve the order
    /// on its own, pickup and delivery appended to an empty route.
    pub fn can_serve(&self, problem: &PickDeliverProblem, order_id: OrderIdx) -> bool {
        self.vehicle_types().into_iter().any(|vehicle_type_id| {
            let mut scratch = VehicleRoute::empty(problem, vehicle_type_id);
            scratch.push_back(problem, order_id);
            scratch.is_feasible()
        })
    }

    /// Distinct vehicle types present in the fleet, in route order.
    fn vehicle_types(&self) -> Vec<VehicleTypeIdx> {
        let mut vehicle_types: Vec<VehicleTypeIdx> = Vec::new();
        for route in &self.routes {
            if !vehicle_types.contains(&route.vehicle_type_id()) {
                vehicle_types.push(route.vehicle_type_id());
            }
        }
        vehicle_types
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, route_id: RouteIdx) -> Option<&VehicleRoute> {
        self.routes.get(route_id.get())
    }

    pub fn routes(&self) -> &[VehicleRoute] {
        &self.routes
    }

    pub fn routes_iter(&self) -> impl Iterator<Item = (RouteIdx, &VehicleRoute)> {
        self.routes.iter().enumerate_idx()
    }

    pub fn is_unused(&self, route_id: RouteIdx) -> bool {
        self.unused.contains(route_id.get())
    }

    pub fn used_routes_iter(&self) -> impl Iterator<Item = (RouteIdx, &VehicleRoute)> {
        self.routes_iter()
            .filter(|(route_id, _)| !self.is_unused(*route_id))
    }

    pub fn unused_iter(&self) -> impl Iterator<Item = RouteIdx> + '_ {
        self.unused.ones().map(RouteIdx::new)
    }

    /// The lowest unused route of every vehicle type that still has one.
    pub fn first_unused_per_type(&self) -> Vec<RouteIdx> {
        let mut seen: Vec<VehicleTypeIdx> = Vec::new();
        let mut first_unused = Vec::new();

        for route_id in self.unused_iter() {
            let vehicle_type_id = self.routes[route_id].vehicle_type_id();
            if !seen.contains(&vehicle_type_id) {
                seen.push(vehicle_type_id);
                first_unused.push(route_id);
            }
        }

        first_unused
    }

    pub fn used_count(&self) -> usize {
        self.routes.len() - self.unused.count_ones(..)
    }

    pub fn route_of_order(&self, order_id: OrderIdx) -> Option<RouteIdx> {
        self.routes_iter()
            .find(|(_, route)| route.contains_order(order_id))
            .map(|(route_id, _)| route_id)
    }

    pub fn insert(&mut self, problem: &PickDeliverProblem, insertion: &OrderInsertion) {
        let route = &mut self.routes[insertion.route_id];
        route.insert(
            problem,
            insertion.order_id,
            insertion.pickup_position,
            insertion.delivery_position,
        );
        self.sync_usage(insertion.route_id);
    }

    /// Removes the order from whichever route carries it.
    pub fn remove_order(
        &mut self,
        problem: &PickDeliverProblem,
        order_id: OrderIdx,
    ) -> Option<RouteIdx> {
        let route_id = self.route_of_order(order_id)?;
        self.routes[route_id].remove(problem, order_id);
        self.sync_usage(route_id);
        Some(route_id)
    }

    pub fn replace_route(&mut self, route_id: RouteIdx, route: VehicleRoute) {
        assert_eq!(
            self.routes[route_id].vehicle_type_id(),
            route.vehicle_type_id(),
            "route {route_id} cannot change vehicle type"
        );
        self.routes[route_id] = route;
        self.sync_usage(route_id);
    }

    fn sync_usage(&mut self, route_id: RouteIdx) {
        let is_empty = self.routes[route_id].is_empty();
        self.unused.set(route_id.get(), is_empty);
    }
}

impl Index<RouteIdx> for Fleet {
    type Output = VehicleRoute;

    fn index(&self, route_id: RouteIdx) -> &Self::Output {
        match self.routes.get(route_id.get()) {
            Some(route) => route,
            None => panic!(
                "route {route_id} out of range, fleet has {} vehicles",
                self.routes.len()
            ),
        }
    }
}
