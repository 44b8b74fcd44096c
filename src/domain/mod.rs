// Domain layer: trip models and ports. Derivations live in `core`.

pub mod model;
pub mod ports;
