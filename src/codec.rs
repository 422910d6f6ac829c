//! AR text format codec
//!
//! An annotation serializes to comma-separated `shortKey=value` pairs; a
//! list joins records with `;` and always carries a trailing delimiter.
//! String-valued fields are percent-encoded so the two delimiters and `=`
//! can never appear raw inside a value. Numeric fields print with Rust's
//! default (shortest round-tripping) float formatting, which keeps
//! `serialize(deserialize(s))` exact for well-formed input.
//!
//! Both directions resolve keys through one static table, so the encoding
//! cannot drift out of sync with the decoding.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::error::{CodecError, FormatError, ValidationError};
use crate::model::{Action, Annotation, AnnotationType, Appearance, Geometry, TimeRange};

/// Canonical field name → AR short key. Single source of truth for both
/// codec directions; the reverse map is derived below, never hand-written.
pub const ATTRIBUTE_MAP: &[(&str, &str)] = &[
    ("type", "tp"),
    ("style", "s"),
    ("x", "x"),
    ("y", "y"),
    ("width", "w"),
    ("height", "h"),
    ("timeStart", "ts"),
    ("timeEnd", "te"),
    ("text", "t"),
    ("actionType", "at"),
    ("actionUrl", "au"),
    ("actionSeconds", "as"),
    ("bgOpacity", "bgo"),
    ("bgColor", "bgc"),
    ("fgColor", "fgc"),
    ("textSize", "txsz"),
];

/// Fields whose values are percent-encoded strings; everything else is a
/// decimal number.
const STRING_FIELDS: &[&str] = &["type", "style", "text", "actionType", "actionUrl"];

/// Fields every AR record must carry to build a typed [`Annotation`].
///
/// The minimal legacy profile required only geometry and timing; `type` is
/// additionally required here because the canonical record is typed.
pub const REQUIRED_FIELDS: &[&str] = &["type", "x", "y", "width", "height", "timeStart", "timeEnd"];

static SHORT_BY_FIELD: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ATTRIBUTE_MAP.iter().copied().collect());

static FIELD_BY_SHORT: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ATTRIBUTE_MAP.iter().map(|&(field, short)| (short, field)).collect());

/// Forward lookup: canonical field name → short key
#[must_use]
pub fn short_key(field: &str) -> Option<&'static str> {
    SHORT_BY_FIELD.get(field).copied()
}

/// Reverse lookup: short key → canonical field name
#[must_use]
pub fn field_name(short: &str) -> Option<&'static str> {
    FIELD_BY_SHORT.get(short).copied()
}

/// Serialize one annotation to an AR record (no trailing delimiter).
///
/// The required-field profile is satisfied structurally: geometry, timing
/// and type are non-optional on [`Annotation`].
#[must_use]
pub fn serialize_annotation(annotation: &Annotation) -> String {
    let mut pairs: Vec<String> = Vec::new();

    push_string(&mut pairs, "type", annotation.kind.as_str());
    if let Some(style) = &annotation.style {
        push_string(&mut pairs, "style", style);
    }

    push_number(&mut pairs, "x", annotation.geometry.x);
    push_number(&mut pairs, "y", annotation.geometry.y);
    push_number(&mut pairs, "width", annotation.geometry.width);
    push_number(&mut pairs, "height", annotation.geometry.height);
    push_number(&mut pairs, "timeStart", annotation.time_range.start);
    push_number(&mut pairs, "timeEnd", annotation.time_range.end);

    if let Some(text) = &annotation.text {
        push_string(&mut pairs, "text", text);
    }

    match &annotation.action {
        Some(Action::Time { seconds }) => {
            push_string(&mut pairs, "actionType", "time");
            push_number(&mut pairs, "actionSeconds", *seconds);
        }
        Some(Action::Url { href }) => {
            push_string(&mut pairs, "actionType", "url");
            push_string(&mut pairs, "actionUrl", href);
        }
        None => {}
    }

    if let Some(appearance) = &annotation.appearance {
        if let Some(v) = appearance.bg_opacity {
            push_number(&mut pairs, "bgOpacity", v);
        }
        if let Some(v) = appearance.bg_color {
            push_integer(&mut pairs, "bgColor", v);
        }
        if let Some(v) = appearance.fg_color {
            push_integer(&mut pairs, "fgColor", v);
        }
        if let Some(v) = appearance.text_size {
            push_number(&mut pairs, "textSize", v);
        }
    }

    pairs.join(",")
}

/// Deserialize one AR record.
///
/// Unknown short keys are a hard [`FormatError`]: silently dropping a pair
/// would break the round-trip guarantee. A record missing one of
/// [`REQUIRED_FIELDS`] is a [`ValidationError`].
pub fn deserialize_annotation(record: &str) -> Result<Annotation, CodecError> {
    let mut strings: HashMap<&'static str, String> = HashMap::new();
    let mut numbers: HashMap<&'static str, f64> = HashMap::new();

    for pair in record.split(',') {
        let (short, value) = pair
            .split_once('=')
            .ok_or_else(|| FormatError::MalformedPair(pair.to_string()))?;
        let field = field_name(short).ok_or_else(|| FormatError::UnknownKey(short.to_string()))?;

        if STRING_FIELDS.contains(&field) {
            let decoded = urlencoding::decode(value)
                .map_err(|_| FormatError::Encoding { field: field.to_string() })?;
            strings.insert(field, decoded.into_owned());
        } else {
            let parsed: f64 = value.parse().map_err(|_| FormatError::InvalidNumber {
                field: field.to_string(),
                value: value.to_string(),
            })?;
            if !parsed.is_finite() {
                return Err(FormatError::InvalidNumber {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
            numbers.insert(field, parsed);
        }
    }

    let kind = strings
        .remove("type")
        .map(AnnotationType::from)
        .ok_or(ValidationError::MissingField("type"))?;

    let geometry = Geometry::new(
        require(&numbers, "x")?,
        require(&numbers, "y")?,
        require(&numbers, "width")?,
        require(&numbers, "height")?,
    );
    let time_range = TimeRange::new(
        require(&numbers, "timeStart")?,
        require(&numbers, "timeEnd")?,
    );

    let action = match strings.remove("actionType").as_deref() {
        Some("time") => Some(Action::Time {
            seconds: numbers.get("actionSeconds").copied().unwrap_or(0.0),
        }),
        Some("url") => strings.remove("actionUrl").map(|href| Action::Url { href }),
        Some(other) => {
            debug!(action_type = other, "ignoring unrecognized action type");
            None
        }
        None => None,
    };

    let appearance = Appearance {
        bg_color: numbers.get("bgColor").copied().map(to_color),
        bg_opacity: numbers.get("bgOpacity").copied(),
        fg_color: numbers.get("fgColor").copied().map(to_color),
        text_size: numbers.get("textSize").copied(),
    };

    let mut annotation = Annotation::new(kind, geometry, time_range);
    annotation.style = strings.remove("style");
    annotation.text = strings.remove("text");
    annotation.action = action;
    annotation.appearance = (!appearance.is_empty()).then_some(appearance);

    Ok(annotation)
}

/// Serialize a list; every record ends with `;`, including the last.
#[must_use]
pub fn serialize_list(annotations: &[Annotation]) -> String {
    let mut out = String::new();
    for annotation in annotations {
        out.push_str(&serialize_annotation(annotation));
        out.push(';');
    }
    out
}

/// Deserialize a delimited list, tolerating the trailing empty segment the
/// encoding always produces.
pub fn deserialize_list(serialized: &str) -> Result<Vec<Annotation>, CodecError> {
    serialized
        .split(';')
        .filter(|segment| !segment.is_empty())
        .map(deserialize_annotation)
        .collect()
}

fn push_string(pairs: &mut Vec<String>, field: &str, value: &str) {
    if let Some(short) = short_key(field) {
        pairs.push(format!("{short}={}", urlencoding::encode(value)));
    }
}

fn push_number(pairs: &mut Vec<String>, field: &str, value: f64) {
    if let Some(short) = short_key(field) {
        pairs.push(format!("{short}={value}"));
    }
}

fn push_integer(pairs: &mut Vec<String>, field: &str, value: u32) {
    if let Some(short) = short_key(field) {
        pairs.push(format!("{short}={value}"));
    }
}

fn require(numbers: &HashMap<&'static str, f64>, field: &'static str) -> Result<f64, ValidationError> {
    numbers
        .get(field)
        .copied()
        .ok_or(ValidationError::MissingField(field))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_color(value: f64) -> u32 {
    // 24-bit color; float-to-int casts saturate
    (value as u32).min(0xFF_FFFF)
}
