// Domain layer: models and the host-platform ports. No logic beyond what the
// model itself owns.

pub mod model;
pub mod ports;
