//! Self-contained overlay widgets

pub mod help_widget;
pub mod log_widget;
