use std::path::Path;

use anyhow::{Context, Result};

use annolay::{deserialize_list, format_colon_duration, Action, Annotation};

use super::read_input;

pub fn cmd_dump(input: &Path, json: bool) -> Result<()> {
    let ar_text = read_input(input)?;
    let annotations = deserialize_list(ar_text.trim()).context("failed to decode AR text")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&annotations)?);
        return Ok(());
    }

    for (id, annotation) in annotations.iter().enumerate() {
        println!("#{id} {}", describe(annotation));
    }
    println!("({} annotations)", annotations.len());

    Ok(())
}

fn describe(annotation: &Annotation) -> String {
    let range = annotation.time_range;
    let geometry = annotation.geometry;

    let mut line = format!(
        "[{} - {}] {} at {:.1}%,{:.1}% ({:.1}x{:.1})",
        format_colon_duration(range.start),
        format_colon_duration(range.end),
        annotation.kind,
        geometry.x,
        geometry.y,
        geometry.width,
        geometry.height,
    );

    if let Some(text) = &annotation.text {
        line.push_str(&format!(" \"{text}\""));
    }
    match &annotation.action {
        Some(Action::Time { seconds }) => {
            line.push_str(&format!(" -> seek {}", format_colon_duration(*seconds)));
        }
        Some(Action::Url { href }) => line.push_str(&format!(" -> {href}")),
        None => {}
    }

    line
}
