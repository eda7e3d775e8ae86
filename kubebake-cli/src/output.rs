//! Output-artifact reporting.
//!
//! The bake step has exactly one output: the baked manifest path, published
//! under the name `manifestsBundle`. When `KUBEBAKE_OUTPUT` names a file,
//! output lines are appended there (the convention downstream pipeline
//! steps read); otherwise the line goes to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Env var naming the file output lines are appended to.
pub const OUTPUT_FILE_ENV: &str = "KUBEBAKE_OUTPUT";

/// Publish a single `name=value` output line.
pub fn set_output(name: &str, value: &Path) -> Result<()> {
    let line = format!("{name}={}", value.display());

    match std::env::var(OUTPUT_FILE_ENV) {
        Ok(file) if !file.is_empty() => {
            let mut out = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file)
                .with_context(|| format!("opening output file {file}"))?;
            writeln!(out, "{line}").with_context(|| format!("writing output file {file}"))?;
        }
        _ => println!("{line}"),
    }
    Ok(())
}
