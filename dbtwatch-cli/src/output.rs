//! Step output publication
//!
//! Publishes named results to the invoking pipeline: `name=value` lines
//! appended to the file named by `GITHUB_OUTPUT`, falling back to the legacy
//! `::set-output` workflow command on stdout when the variable is unset.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};

/// Publish one named result to the pipeline
pub fn publish(name: &str, value: &str) -> Result<()> {
    match env::var("GITHUB_OUTPUT") {
        Ok(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open step output file {}", path))?;

            write_output(&mut file, name, value)
                .with_context(|| format!("Failed to write step output {}", name))
        }
        Err(_) => {
            println!("{}", set_output_command(name, value));
            Ok(())
        }
    }
}

/// Append one `name=value` line to a step output sink
fn write_output<W: Write>(out: &mut W, name: &str, value: &str) -> std::io::Result<()> {
    writeln!(out, "{}={}", name, value)
}

/// Legacy workflow command, understood by older pipeline runners
fn set_output_command(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, value)
}
