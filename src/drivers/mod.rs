//! Per-engine [`DriverSource`](crate::DriverSource) implementations.

pub mod chromium;
pub mod edge;
pub mod gecko;
