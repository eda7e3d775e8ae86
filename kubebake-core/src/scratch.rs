//! Scratch directory and baked-manifest path allocation.
//!
//! Each `bake()` writes exactly one output file into the agent's scratch
//! directory. Paths are allocated here so every engine names its output the
//! same way and two bakes in one process can never collide.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::error::BakeError;

/// Preferred env var for the scratch directory.
pub const SCRATCH_ENV: &str = "KUBEBAKE_TEMP";

/// Fallback exported by pipeline agents.
pub const AGENT_TEMP_ENV: &str = "AGENT_TEMPDIRECTORY";

/// Resolve the scratch directory from the execution environment.
///
/// `KUBEBAKE_TEMP` wins over `AGENT_TEMPDIRECTORY`; absence of both is a
/// fatal precondition, not recoverable.
pub fn scratch_dir() -> Result<PathBuf, BakeError> {
    [SCRATCH_ENV, AGENT_TEMP_ENV]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .ok_or(BakeError::MissingScratchDir)
}

// Distinguishes paths allocated within the same millisecond tick.
static SEQ: AtomicU64 = AtomicU64::new(0);

/// Allocates collision-resistant baked-manifest paths inside a scratch
/// directory.
///
/// Produces `<scratch>/baked-template-<unix-millis>-<seq>.yaml`. The
/// sequence component is a process-wide monotonic counter, so back-to-back
/// calls are distinct even inside one timestamp tick.
#[derive(Debug, Default)]
pub struct BakedPathProvider;

impl BakedPathProvider {
    pub fn next(&self, scratch: &Path) -> PathBuf {
        let millis = Utc::now().timestamp_millis();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        scratch.join(format!("baked-template-{millis}-{seq}.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn back_to_back_paths_are_distinct() {
        let provider = BakedPathProvider;
        let scratch = Path::new("/tmp/scratch");
        let first = provider.next(scratch);
        let second = provider.next(scratch);
        assert_ne!(first, second);
        assert!(first.starts_with(scratch));
        assert!(second.starts_with(scratch));
    }

    #[test]
    fn many_rapid_allocations_never_collide() {
        let provider = BakedPathProvider;
        let scratch = Path::new("/tmp/scratch");
        let paths: HashSet<_> = (0..1000).map(|_| provider.next(scratch)).collect();
        assert_eq!(paths.len(), 1000);
    }

    #[test]
    fn path_has_baked_template_prefix_and_yaml_extension() {
        let provider = BakedPathProvider;
        let path = provider.next(Path::new("/tmp/scratch"));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("baked-template-"));
        assert!(name.ends_with(".yaml"));
    }
}
