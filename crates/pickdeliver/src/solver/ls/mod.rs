pub mod exchange;
pub mod inter_relocate;
pub mod r#move;
pub mod optimizer;
pub mod relocate;
