// src/config/mod.rs

//! Configuration loading and resolution.
//!
//! Parameters can come from CLI flags, from an optional TOML config file, or
//! both; flags win. [`resolve`] merges the two and checks that every
//! required parameter is present before any pipeline I/O happens.

pub mod loader;
pub mod model;

pub use loader::load_from_path;
pub use model::{resolve, PipelineConfig, RawConfigFile};
