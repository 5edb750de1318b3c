// Domain layer: the declaration graph and the ports to the outside world.

pub mod model;
pub mod ports;
