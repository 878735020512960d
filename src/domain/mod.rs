// Domain layer: the plan record and the ports the store depends on.

pub mod model;
pub mod ports;
