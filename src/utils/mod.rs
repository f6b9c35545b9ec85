//! Host-side utilities

pub mod logging;
