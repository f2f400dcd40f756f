//! Schema module - Configuration types for feedback passes.

mod config;

pub use config::*;
