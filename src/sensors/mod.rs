//! Sensor subsystem — trimmed-mean sampling plus the two analog sensors.

pub mod foil;
pub mod sampler;
pub mod spoon;
