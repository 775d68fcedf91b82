//! Data layer
//!
//! Records and values, the table state and its sample data, and the CSV
//! bridge in and out of it.

pub mod csv_bridge;
pub mod datatable;
pub mod datavalue_compare;
pub mod seed;
pub mod table_state;
