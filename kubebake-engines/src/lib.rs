//! # kubebake-engines
//!
//! Render backends that bake Kubernetes manifests by driving an external
//! renderer binary: `helm template`, `kompose convert`, or
//! `kubectl kustomize`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kubebake_core::{BakedPathProvider, EngineKind, MapInputs, SystemRunner};
//! use kubebake_engines::{select, BakeCtx, PathLocator};
//!
//! fn bake(kind: EngineKind, inputs: &MapInputs) {
//!     let ctx = BakeCtx {
//!         inputs,
//!         runner: &SystemRunner,
//!         locator: &PathLocator,
//!         scratch: std::env::temp_dir(),
//!         paths: BakedPathProvider,
//!     };
//!     if let Ok(path) = select(kind).bake(&ctx) {
//!         println!("{}", path.display());
//!     }
//! }
//! ```

pub mod engine;
pub mod helm;
pub mod kompose;
pub mod kustomize;
pub mod locate;
pub mod testing;

pub use engine::{select, BakeCtx, RenderEngine};
pub use helm::HelmEngine;
pub use kompose::KomposeEngine;
pub use kustomize::KustomizeEngine;
pub use locate::{PathLocator, ToolLocator};
