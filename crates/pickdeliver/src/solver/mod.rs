pub mod construction;
pub mod cost;
pub mod diagnostics;
pub mod error;
pub mod insertion;
pub mod ls;
pub mod pick_deliver;
pub mod solution;
pub mod solver_params;
pub mod statistics;
