//! Host-environment contracts consumed by the engines.
//!
//! The bake step runs inside a pipeline agent. Everything it needs from the
//! host — named configuration inputs, subprocess execution — goes through
//! the traits here, so engines never read the environment or spawn
//! processes directly and tests can substitute fakes.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use crate::error::{io_err, BakeError};

// ---------------------------------------------------------------------------
// Input names
// ---------------------------------------------------------------------------

/// Configuration input names, shared between CLI flags and `INPUT_*` env
/// variables.
pub mod input {
    pub const RENDER_ENGINE: &str = "renderEngine";
    pub const HELM_CHART: &str = "helmChart";
    pub const RELEASE_NAME: &str = "releaseName";
    pub const OVERRIDE_FILES: &str = "overrideFiles";
    pub const OVERRIDES: &str = "overrides";
    pub const DOCKER_COMPOSE_FILE: &str = "dockerComposeFile";
    pub const KUSTOMIZATION_PATH: &str = "kustomizationPath";
}

/// Name of the single output artifact: the baked manifest path.
pub const OUTPUT_MANIFESTS_BUNDLE: &str = "manifestsBundle";

// ---------------------------------------------------------------------------
// InputSource
// ---------------------------------------------------------------------------

/// Named configuration inputs from the host.
///
/// An empty string counts as absent — pipeline agents export unset inputs
/// as empty variables.
pub trait InputSource {
    fn get(&self, name: &str) -> Option<String>;

    /// A required input; absent or empty fails with [`BakeError::MissingInput`].
    fn required(&self, name: &str) -> Result<String, BakeError> {
        self.optional(name).ok_or_else(|| BakeError::MissingInput {
            name: name.to_string(),
        })
    }

    /// An optional input; `None` when absent or empty.
    fn optional(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

/// Inputs read from `INPUT_<UPPERCASED NAME>` environment variables, the
/// convention pipeline agents use to pass step inputs.
#[derive(Debug, Default)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(format!("INPUT_{}", name.to_ascii_uppercase())).ok()
    }
}

/// In-memory inputs — CLI flag values and test fixtures.
#[derive(Debug, Default)]
pub struct MapInputs(HashMap<String, String>);

impl MapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }
}

impl InputSource for MapInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Layered lookup: `primary` wins, `fallback` fills the gaps. Used by the
/// CLI so explicit flags override the agent-provided environment.
pub struct LayeredInputs<'a> {
    pub primary: &'a dyn InputSource,
    pub fallback: &'a dyn InputSource,
}

impl InputSource for LayeredInputs<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.primary
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.fallback.get(name))
    }
}

// ---------------------------------------------------------------------------
// ToolRunner
// ---------------------------------------------------------------------------

/// Captured output of a renderer invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Subprocess execution contract.
///
/// `run` resolves only on success; a non-zero exit maps to
/// [`BakeError::ToolFailed`] with the captured stderr, so engines need no
/// exit-code handling of their own.
pub trait ToolRunner {
    fn run(&self, exe: &Path, args: &[String]) -> Result<ToolOutput, BakeError>;
}

/// Real subprocess runner: `std::process::Command` with captured output.
/// Output is never echoed to the step's own stdout (silent mode).
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, exe: &Path, args: &[String]) -> Result<ToolOutput, BakeError> {
        let output = Command::new(exe)
            .args(args)
            .output()
            .map_err(|e| io_err(exe, e))?;

        let tool = exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| exe.display().to_string());
        tracing::debug!("{tool} {}", args.join(" "));

        if !output.status.success() {
            return Err(BakeError::ToolFailed {
                tool,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_inputs_required_and_optional() {
        let inputs = MapInputs::new()
            .set(input::HELM_CHART, "./chart")
            .set(input::RELEASE_NAME, "");

        assert_eq!(inputs.required(input::HELM_CHART).unwrap(), "./chart");
        assert_eq!(inputs.optional(input::RELEASE_NAME), None);

        match inputs.required(input::DOCKER_COMPOSE_FILE) {
            Err(BakeError::MissingInput { name }) => {
                assert_eq!(name, input::DOCKER_COMPOSE_FILE)
            }
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn layered_inputs_prefer_primary_but_fall_back() {
        let flags = MapInputs::new().set(input::HELM_CHART, "./from-flag");
        let env = MapInputs::new()
            .set(input::HELM_CHART, "./from-env")
            .set(input::RELEASE_NAME, "prod");
        let layered = LayeredInputs {
            primary: &flags,
            fallback: &env,
        };

        assert_eq!(layered.optional(input::HELM_CHART).unwrap(), "./from-flag");
        assert_eq!(layered.optional(input::RELEASE_NAME).unwrap(), "prod");
        assert_eq!(layered.optional(input::OVERRIDES), None);
    }

    #[test]
    fn layered_inputs_skip_empty_primary_values() {
        let flags = MapInputs::new().set(input::RELEASE_NAME, "  ");
        let env = MapInputs::new().set(input::RELEASE_NAME, "prod");
        let layered = LayeredInputs {
            primary: &flags,
            fallback: &env,
        };
        assert_eq!(layered.optional(input::RELEASE_NAME).unwrap(), "prod");
    }

    #[test]
    fn system_runner_reports_missing_binary_as_io() {
        let runner = SystemRunner;
        let result = runner.run(Path::new("/nonexistent/renderer-binary"), &[]);
        assert!(matches!(result, Err(BakeError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let runner = SystemRunner;
        let out = runner
            .run(Path::new("/bin/echo"), &["manifest".to_string()])
            .unwrap();
        assert_eq!(out.stdout.trim(), "manifest");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_maps_nonzero_exit_to_tool_failed() {
        let runner = SystemRunner;
        let args = vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()];
        match runner.run(Path::new("/bin/sh"), &args) {
            Err(BakeError::ToolFailed { tool, stderr, .. }) => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }
}
