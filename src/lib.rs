//! Storefront analytics rollup engine
//!

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod types;
pub mod utils;
