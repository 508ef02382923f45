use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickDeliverError {
    #[error("Fleet is not valid: {}", .errors.join("; "))]
    InvalidFleet { errors: Vec<String> },
}
