//! kubebake core library — domain types, host contracts, errors.
//!
//! Public API surface:
//! - [`types`] — [`EngineKind`], [`OverridePair`], [`VersionInfo`]
//! - [`error`] — [`BakeError`]
//! - [`host`] — input / subprocess contracts and their system impls
//! - [`scratch`] — scratch directory and baked-path allocation

pub mod error;
pub mod host;
pub mod scratch;
pub mod types;

pub use error::BakeError;
pub use host::{
    EnvInputs, InputSource, LayeredInputs, MapInputs, SystemRunner, ToolOutput, ToolRunner,
};
pub use scratch::{scratch_dir, BakedPathProvider};
pub use types::{EngineKind, OverridePair, VersionInfo};
