//! Control-loop filters: leak debouncing and temperature classification.

pub mod classify;
pub mod debounce;
