//! Renderer binary location.
//!
//! Acquisition/installation of `helm`, `kompose`, and `kubectl` is the
//! agent's job; the engines only need a resolved executable path, found by
//! walking `$PATH`.

use std::path::PathBuf;

use kubebake_core::BakeError;

/// Resolves a tool name to an executable path.
pub trait ToolLocator {
    fn locate(&self, tool: &str) -> Result<PathBuf, BakeError>;
}

/// `$PATH`-walking locator used in production.
#[derive(Debug, Default)]
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn locate(&self, tool: &str) -> Result<PathBuf, BakeError> {
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(tool);
            if candidate.is_file() {
                return Ok(candidate);
            }
            #[cfg(windows)]
            {
                let candidate = dir.join(format!("{tool}.exe"));
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
        Err(BakeError::ToolNotFound {
            tool: tool.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn locator_rejects_tool_missing_from_path() {
        let result = PathLocator.locate("kubebake-no-such-renderer");
        match result {
            Err(BakeError::ToolNotFound { tool }) => {
                assert_eq!(tool, "kubebake-no-such-renderer")
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn locator_finds_tool_in_path_dir() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("fake-helm");
        fs::write(&exe, "#!/bin/sh\n").unwrap();

        let saved = std::env::var_os("PATH");
        let joined = std::env::join_paths(
            std::iter::once(dir.path().to_path_buf())
                .chain(saved.iter().flat_map(std::env::split_paths)),
        )
        .unwrap();
        std::env::set_var("PATH", &joined);

        let found = PathLocator.locate("fake-helm");

        match saved {
            Some(p) => std::env::set_var("PATH", p),
            None => std::env::remove_var("PATH"),
        }

        assert_eq!(found.unwrap(), exe);
    }
}
