//! Kustomize render engine — `kubectl kustomize` behind a client version
//! gate.

use std::path::{Path, PathBuf};

use kubebake_core::host::input;
use kubebake_core::{BakeError, InputSource, ToolRunner, VersionInfo};

use crate::engine::{write_manifest, BakeCtx, RenderEngine};

/// Renders a kustomization directory via `kubectl kustomize`.
///
/// Inputs read: `kustomizationPath` (required).
///
/// kubectl gained the `kustomize` subcommand in client 1.14, so the engine
/// checks the self-reported client version before any file I/O.
pub struct KustomizeEngine;

/// Minimum kubectl client for `kubectl kustomize`.
const MIN_MAJOR: u32 = 1;
const MIN_MINOR: u32 = 14;

/// Legacy comparison kept for behavioural compatibility: both components
/// are checked independently, so a client reporting major 2, minor 0 is
/// rejected even though it is newer than 1.14. The test suite pins this.
fn supports_kustomize(v: VersionInfo) -> bool {
    v.major >= MIN_MAJOR && v.minor >= MIN_MINOR
}

/// Run the version gate against a resolved kubectl binary.
fn check_client_version(runner: &dyn ToolRunner, kubectl: &Path) -> Result<(), BakeError> {
    let args = vec![
        "version".to_string(),
        "--client=true".to_string(),
        "-o".to_string(),
        "json".to_string(),
    ];
    let output = runner.run(kubectl, &args)?;
    let version = VersionInfo::from_client_json(&output.stdout)?;
    tracing::debug!("kubectl client version {version}");

    if supports_kustomize(version) {
        Ok(())
    } else {
        Err(BakeError::UnsupportedClientVersion {
            version: version.to_string(),
        })
    }
}

impl RenderEngine for KustomizeEngine {
    fn bake(&self, ctx: &BakeCtx<'_>) -> Result<PathBuf, BakeError> {
        let kubectl = ctx.locator.locate("kubectl")?;
        check_client_version(ctx.runner, &kubectl)?;

        let kustomization = PathBuf::from(ctx.inputs.required(input::KUSTOMIZATION_PATH)?);
        ctx.require_exists(&kustomization)?;

        let args = vec!["kustomize".to_string(), kustomization.display().to_string()];
        let output = ctx.runner.run(&kubectl, &args)?;

        let baked = ctx.next_baked_path();
        write_manifest(&baked, &output.stdout)?;
        Ok(baked)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
