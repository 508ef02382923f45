pub mod initial_solution;
