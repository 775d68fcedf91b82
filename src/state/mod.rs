//! State management
//!
//! The store owns the table state; everything else reaches it through
//! dispatched actions.

pub mod events;
pub mod storage;
pub mod store;
