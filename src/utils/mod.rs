//! Utility functions and helpers
//!
//! Application paths and the logging setup.

pub mod app_paths;
pub mod dual_logging;
pub mod logging;
