//! Test doubles for the host contracts.
//!
//! Engines talk to renderer binaries only through [`ToolRunner`] and
//! [`ToolLocator`]; these fakes let unit and integration tests script
//! renderer behaviour without spawning processes.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kubebake_core::{BakeError, ToolOutput, ToolRunner};

use crate::locate::ToolLocator;

/// One scripted renderer invocation outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Succeed with this stdout.
    Stdout(String),
    /// Exit non-zero with this stderr.
    Fail(String),
}

/// A [`ToolRunner`] that replays scripted outcomes and records every call.
///
/// Responses are consumed front-to-back; once the script is exhausted,
/// further calls succeed with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeRunner {
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        let runner = FakeRunner::default();
        runner.push(Scripted::Stdout(stdout.into()));
        runner
    }

    pub fn push(&self, response: Scripted) {
        self.script.lock().unwrap().push_back(response);
    }

    /// Every `(executable, args)` pair seen so far, in call order.
    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, exe: &Path, args: &[String]) -> Result<ToolOutput, BakeError> {
        self.calls
            .lock()
            .unwrap()
            .push((exe.to_path_buf(), args.to_vec()));

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Stdout(stdout)) => Ok(ToolOutput {
                stdout,
                stderr: String::new(),
            }),
            Some(Scripted::Fail(stderr)) => Err(BakeError::ToolFailed {
                tool: exe
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                status: "exit status: 1".to_string(),
                stderr,
            }),
            None => Ok(ToolOutput::default()),
        }
    }
}

/// A [`ToolLocator`] that maps every tool name to `/usr/bin/<tool>`
/// without touching the filesystem.
#[derive(Debug, Default)]
pub struct FakeLocator;

impl ToolLocator for FakeLocator {
    fn locate(&self, tool: &str) -> Result<PathBuf, BakeError> {
        Ok(PathBuf::from("/usr/bin").join(tool))
    }
}
