//! CLI subcommand implementations

pub mod convert;
pub mod dump;
pub mod track;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file argument, with `-` meaning stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}
