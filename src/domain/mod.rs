// Domain layer: fragment/page models and the ports the composer depends on.

pub mod model;
pub mod ports;
