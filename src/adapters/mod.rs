//! Concrete adapter implementations of the port traits.

pub mod csv_data_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod json_store_adapter;
