//! Utility functions shared by the CLI.
//!
//! - [`app_data`] - Configuration file handling and index discovery

pub mod app_data;

pub use app_data::*;
