//! Kompose render engine — `kompose convert` from a Docker Compose file.

use std::path::{Path, PathBuf};

use kubebake_core::host::input;
use kubebake_core::{BakeError, InputSource};

use crate::engine::{BakeCtx, RenderEngine};

/// Converts a Docker Compose file via `kompose convert`.
///
/// Inputs read: `dockerComposeFile` (required).
///
/// Unlike the Helm and Kustomize engines, kompose writes the output file
/// itself (`-o <path>`); nothing is captured from stdout.
pub struct KomposeEngine;

impl RenderEngine for KomposeEngine {
    fn bake(&self, ctx: &BakeCtx<'_>) -> Result<PathBuf, BakeError> {
        let compose_file = PathBuf::from(ctx.inputs.required(input::DOCKER_COMPOSE_FILE)?);
        ctx.require_exists(&compose_file)?;

        let kompose = ctx.locator.locate("kompose")?;
        let baked = ctx.next_baked_path();

        ctx.runner.run(&kompose, &convert_args(&compose_file, &baked))?;
        tracing::info!("baked manifest written: {}", baked.display());
        Ok(baked)
    }
}

fn convert_args(compose_file: &Path, out: &Path) -> Vec<String> {
    vec![
        "convert".to_string(),
        "-f".to_string(),
        compose_file.display().to_string(),
        "-o".to_string(),
        out.display().to_string(),
    ]
}
