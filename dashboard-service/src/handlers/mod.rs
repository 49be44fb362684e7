//! HTTP handlers for the dashboard API.

pub mod charts;
pub mod health;

pub use charts::*;
pub use health::*;
