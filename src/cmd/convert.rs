use std::path::Path;

use anyhow::{Context, Result};

use annolay::{ingest_document, serialize_list, IngestOptions};

use super::read_input;

pub fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    origin: &str,
) -> Result<()> {
    let xml = read_input(input)?;

    let options = IngestOptions {
        trusted_prefix: origin.to_string(),
    };
    let annotations = ingest_document(&xml, &options).context("failed to parse annotation XML")?;

    let rendered = if json {
        serde_json::to_string_pretty(&annotations)?
    } else {
        serialize_list(&annotations)
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "💾 Saved {} annotations ({} bytes) to {}",
                annotations.len(),
                rendered.len(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
