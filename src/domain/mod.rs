// Domain layer: the data the filler works with and the ports it talks through.

pub mod model;
pub mod ports;
