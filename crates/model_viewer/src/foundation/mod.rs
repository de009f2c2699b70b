//! Foundation layer: math types and timing utilities

pub mod math;
pub mod time;
