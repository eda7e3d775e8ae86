//! Error types for kubebake-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while baking a manifest.
///
/// Nothing here is retried or recovered internally — every variant
/// propagates to the orchestrator, which wraps it once with contextual
/// text and reports it as the run's single terminal failure.
#[derive(Debug, Error)]
pub enum BakeError {
    /// The `renderEngine` input named an engine we do not have.
    #[error("unknown render engine '{name}'; expected: helm2, kompose, kustomize")]
    UnknownEngine { name: String },

    /// No scratch directory available in the execution environment.
    #[error("no scratch directory; set KUBEBAKE_TEMP or AGENT_TEMPDIRECTORY")]
    MissingScratchDir,

    /// A required configuration input was absent or empty.
    #[error("required input '{name}' was not supplied")]
    MissingInput { name: String },

    /// An override token was not of the form `key:value`.
    #[error("invalid override '{token}'; expected key:value")]
    InvalidOverride { token: String },

    /// A user-supplied input path does not exist on disk. Checked before
    /// the renderer is spawned, so the failure carries the offending path
    /// instead of an opaque tool error.
    #[error("input path not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A renderer binary was not found on the search path.
    #[error("could not locate '{tool}' on PATH")]
    ToolNotFound { tool: String },

    /// The resolved kubectl client is below the kustomize support floor.
    #[error("kubectl client version {version} does not support kustomize; need 1.14 or later")]
    UnsupportedClientVersion { version: String },

    /// kubectl's version document could not be parsed.
    #[error("could not parse kubectl client version from: {output}")]
    VersionParse { output: String },

    /// A renderer exited non-zero.
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`BakeError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BakeError {
    BakeError::Io {
        path: path.into(),
        source,
    }
}
