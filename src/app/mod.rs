//! Application core: port traits, outbound events and the per-tick
//! orchestration service.

pub mod events;
pub mod ports;
pub mod service;
