pub mod distance_matrix;
pub mod location;
pub mod node;
pub mod order;
pub mod pick_deliver_problem;
pub mod time_window;
pub mod vehicle_type;
