// Domain layer: record types, ports, and the pure aggregation over them.

pub mod model;
pub mod ports;

pub mod services;
