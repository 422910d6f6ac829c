use std::path::Path;

use anyhow::{Context, Result};

use annolay::{
    deserialize_list, format_colon_duration, parse_colon_duration, VisibilityEngine,
};

use super::read_input;

pub fn cmd_track(input: &Path, positions: &[String]) -> Result<()> {
    let ar_text = read_input(input)?;
    let annotations = deserialize_list(ar_text.trim()).context("failed to decode AR text")?;
    let mut engine = VisibilityEngine::new(annotations);

    for position in positions {
        let seconds = parse_colon_duration(position)
            .with_context(|| format!("invalid playback position '{position}'"))?;

        let transitions = engine.update(seconds);
        println!("t={} ({seconds}s):", format_colon_duration(seconds));
        if transitions.is_empty() {
            println!("   no transitions");
        }
        for t in transitions {
            println!("   #{} {:?} -> {:?}", t.id, t.from, t.to);
        }
    }

    Ok(())
}
