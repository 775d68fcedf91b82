//! Configuration module
//!
//! Settings loaded from `config.toml`.

pub mod config;
