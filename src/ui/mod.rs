//! User interface layer
//!
//! The grid view state machine plus the terminal app that drives it.

pub mod actions;
pub mod column_manager;
pub mod grid_view;
pub mod key_mapper;
pub mod notifications;
pub mod table_app;
pub mod table_renderer;
pub mod theme;
