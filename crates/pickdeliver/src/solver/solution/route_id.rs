use crate::{index_newtype, solver::solution::route::VehicleRoute};

index_newtype!(RouteIdx, VehicleRoute);
