// Domain layer: core models and ports (interfaces). No dependencies on the
// client, exporter, or UI layers.

pub mod model;
pub mod ports;
