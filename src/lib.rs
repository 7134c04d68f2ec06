pub mod address;
pub mod config;
pub mod csv_import;
pub mod distribute;
pub mod error;
pub mod form;
pub mod operation_log;
pub mod submission;
pub mod types;
pub mod utils;
pub mod validation;
