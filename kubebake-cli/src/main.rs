//! kubebake — bake Kubernetes manifests from Helm, Compose, or Kustomize
//! sources as a pipeline step.
//!
//! # Usage
//!
//! ```text
//! kubebake --render-engine helm2 --helm-chart ./chart [--release-name prod]
//!          [--override-file values.yaml ...] [--override key:value ...]
//! kubebake --render-engine kompose --docker-compose-file docker-compose.yml
//! kubebake --render-engine kustomize --kustomization-path ./overlays/prod
//! ```
//!
//! Any flag left off the command line falls back to the pipeline agent's
//! `INPUT_<NAME>` environment variable, so the binary works both
//! interactively and as a hosted step. The scratch directory comes from
//! `KUBEBAKE_TEMP` or `AGENT_TEMPDIRECTORY`; on success the baked manifest
//! path is published as the `manifestsBundle` output.

mod output;

use anyhow::{Context, Result};
use clap::Parser;

use kubebake_core::host::{input, OUTPUT_MANIFESTS_BUNDLE};
use kubebake_core::{
    scratch_dir, BakedPathProvider, EngineKind, EnvInputs, InputSource, LayeredInputs,
    MapInputs, SystemRunner,
};
use kubebake_engines::{select, BakeCtx, PathLocator};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "kubebake",
    version,
    about = "Render Kubernetes manifests into a single flat manifest file",
    long_about = None,
)]
struct Cli {
    /// Render backend: helm2, kompose, or kustomize.
    #[arg(long)]
    render_engine: Option<String>,

    /// Path to the Helm chart (helm2 engine).
    #[arg(long)]
    helm_chart: Option<String>,

    /// Helm release name (helm2 engine).
    #[arg(long)]
    release_name: Option<String>,

    /// Helm values file; repeat for multiple files, applied in order.
    #[arg(long = "override-file")]
    override_files: Vec<String>,

    /// Helm `key:value` override; repeat for multiple, applied in order.
    #[arg(long = "override")]
    overrides: Vec<String>,

    /// Path to the Docker Compose file (kompose engine).
    #[arg(long)]
    docker_compose_file: Option<String>,

    /// Path to the kustomization directory (kustomize engine).
    #[arg(long)]
    kustomization_path: Option<String>,
}

impl Cli {
    /// Collapse flags into the named-input map the engines read. Multi-value
    /// flags become newline-delimited inputs, matching the agent convention.
    fn to_inputs(&self) -> MapInputs {
        let mut inputs = MapInputs::new();
        let scalars = [
            (input::RENDER_ENGINE, &self.render_engine),
            (input::HELM_CHART, &self.helm_chart),
            (input::RELEASE_NAME, &self.release_name),
            (input::DOCKER_COMPOSE_FILE, &self.docker_compose_file),
            (input::KUSTOMIZATION_PATH, &self.kustomization_path),
        ];
        for (name, value) in scalars {
            if let Some(value) = value {
                inputs = inputs.set(name, value.clone());
            }
        }
        if !self.override_files.is_empty() {
            inputs = inputs.set(input::OVERRIDE_FILES, self.override_files.join("\n"));
        }
        if !self.overrides.is_empty() {
            inputs = inputs.set(input::OVERRIDES, self.overrides.join("\n"));
        }
        inputs
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Select the engine, bake, publish the output path.
///
/// Any failure below bubbles up unchanged to be wrapped exactly once with
/// the "baking manifests failed" context; a failed bake publishes nothing.
fn run(cli: &Cli) -> Result<()> {
    let flags = cli.to_inputs();
    let env = EnvInputs;
    let inputs = LayeredInputs {
        primary: &flags,
        fallback: &env,
    };

    let kind: EngineKind = inputs.required(input::RENDER_ENGINE)?.parse()?;
    tracing::info!("baking with engine: {kind}");

    let ctx = BakeCtx {
        inputs: &inputs,
        runner: &SystemRunner,
        locator: &PathLocator,
        scratch: scratch_dir()?,
        paths: BakedPathProvider,
    };

    let baked = select(kind).bake(&ctx)?;
    output::set_output(OUTPUT_MANIFESTS_BUNDLE, &baked)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli).context("baking manifests failed")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
