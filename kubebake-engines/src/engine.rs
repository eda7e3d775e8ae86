//! The [`RenderEngine`] capability and engine selection.
//!
//! # Engine mapping
//!
//! | `renderEngine` | Engine             | External tool |
//! |----------------|--------------------|---------------|
//! | `helm2`        | [`HelmEngine`]     | `helm`        |
//! | `kompose`      | [`KomposeEngine`]  | `kompose`     |
//! | `kustomize`    | [`KustomizeEngine`]| `kubectl`     |

use std::fs;
use std::path::{Path, PathBuf};

use kubebake_core::error::io_err;
use kubebake_core::{BakeError, BakedPathProvider, EngineKind, InputSource, ToolRunner};

use crate::helm::HelmEngine;
use crate::kompose::KomposeEngine;
use crate::kustomize::KustomizeEngine;
use crate::locate::ToolLocator;

// ---------------------------------------------------------------------------
// BakeCtx
// ---------------------------------------------------------------------------

/// Everything an engine needs from its environment, injected by composition.
///
/// One context is built per run and owned by the single `bake()` call; no
/// state is shared across invocations.
pub struct BakeCtx<'a> {
    pub inputs: &'a dyn InputSource,
    pub runner: &'a dyn ToolRunner,
    pub locator: &'a dyn ToolLocator,
    pub scratch: PathBuf,
    pub paths: BakedPathProvider,
}

impl BakeCtx<'_> {
    /// Allocate a fresh baked-manifest path in the scratch directory.
    pub fn next_baked_path(&self) -> PathBuf {
        self.paths.next(&self.scratch)
    }

    /// Fail with the offending path if a user-supplied input path does not
    /// exist on disk. Runs before the renderer is spawned.
    pub fn require_exists(&self, path: &Path) -> Result<(), BakeError> {
        if path.exists() {
            Ok(())
        } else {
            Err(BakeError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Write captured renderer stdout verbatim to `path`.
pub(crate) fn write_manifest(path: &Path, content: &str) -> Result<(), BakeError> {
    fs::write(path, content).map_err(|e| io_err(path, e))?;
    tracing::info!("baked manifest written: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// RenderEngine
// ---------------------------------------------------------------------------

/// A render backend: translates its own configuration inputs into one
/// external-tool invocation and produces one baked manifest file.
///
/// Each implementation reads only the inputs belonging to its engine kind.
pub trait RenderEngine {
    /// Render the manifest and return the absolute path of the output file.
    fn bake(&self, ctx: &BakeCtx<'_>) -> Result<PathBuf, BakeError>;
}

/// Pure mapping from engine kind to implementation.
///
/// Unknown names are already rejected by [`EngineKind`]'s `FromStr`, so
/// selection itself cannot fail.
pub fn select(kind: EngineKind) -> Box<dyn RenderEngine> {
    match kind {
        EngineKind::Helm2 => Box::new(HelmEngine),
        EngineKind::Kompose => Box::new(KomposeEngine),
        EngineKind::Kustomize => Box::new(KustomizeEngine),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use kubebake_core::MapInputs;
    use tempfile::TempDir;

    use super::*;
    use crate::testing::{FakeLocator, FakeRunner};

    #[test]
    fn select_covers_every_engine_kind() {
        for kind in EngineKind::all() {
            // Box construction alone proves the mapping is total.
            let _engine = select(*kind);
        }
    }

    #[test]
    fn require_exists_names_the_missing_path() {
        let scratch = TempDir::new().unwrap();
        let inputs = MapInputs::new();
        let runner = FakeRunner::default();
        let locator = FakeLocator::default();
        let ctx = BakeCtx {
            inputs: &inputs,
            runner: &runner,
            locator: &locator,
            scratch: scratch.path().to_path_buf(),
            paths: BakedPathProvider,
        };

        let missing = scratch.path().join("nope.yml");
        match ctx.require_exists(&missing) {
            Err(BakeError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        ctx.require_exists(scratch.path()).unwrap();
    }
}
