//! Helm render engine — `helm template` with file and `--set` overrides.

use std::path::PathBuf;

use kubebake_core::host::input;
use kubebake_core::{BakeError, InputSource, OverridePair};

use crate::engine::{write_manifest, BakeCtx, RenderEngine};

/// Renders a Helm chart via `helm template` and captures stdout.
///
/// Inputs read: `helmChart` (required), `releaseName`, `overrideFiles`,
/// `overrides`.
pub struct HelmEngine;

/// Build the `helm template` argument list in its fixed order:
/// `template <chart>`, then `--name <release>` if given, then one
/// `-f <file>` pair per override file in input order, then one
/// `--set name=value` pair per override in input order.
fn template_args(inputs: &dyn InputSource) -> Result<Vec<String>, BakeError> {
    let chart = inputs.required(input::HELM_CHART)?;

    let mut args = vec!["template".to_string(), chart];

    if let Some(release) = inputs.optional(input::RELEASE_NAME) {
        args.push("--name".to_string());
        args.push(release);
    }

    for file in lines(inputs.optional(input::OVERRIDE_FILES)) {
        args.push("-f".to_string());
        args.push(file);
    }

    for token in lines(inputs.optional(input::OVERRIDES)) {
        let pair = OverridePair::parse(&token)?;
        args.push("--set".to_string());
        args.push(pair.to_set_arg());
    }

    Ok(args)
}

/// Split a newline-delimited input into trimmed, non-blank entries,
/// preserving input order.
fn lines(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl RenderEngine for HelmEngine {
    fn bake(&self, ctx: &BakeCtx<'_>) -> Result<PathBuf, BakeError> {
        let helm = ctx.locator.locate("helm")?;
        let args = template_args(ctx.inputs)?;

        tracing::debug!("helm {}", args.join(" "));
        let output = ctx.runner.run(&helm, &args)?;

        let baked = ctx.next_baked_path();
        write_manifest(&baked, &output.stdout)?;
        Ok(baked)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
