// src/config/mod.rs

//! Engine configuration loading and validation.
//!
//! - [`model`] holds the raw (serde) and validated config types.
//! - [`loader`] reads `Runcap.toml` from disk.
//! - [`validate`] turns a `RawConfigFile` into a validated `EngineConfig`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{EngineConfig, RawConfigFile, RedactionSection};
