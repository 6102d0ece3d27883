//! Numeric helpers shared by the scoring code.

pub mod log;

pub use log::*;
