pub mod fleet;
pub mod route;
pub mod route_id;
pub mod working_solution;
