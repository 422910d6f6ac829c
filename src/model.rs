//! Canonical annotation model
//!
//! The [`Annotation`] record is the hub of the crate: both ingest paths
//! (legacy XML and AR text) produce it, and the visibility engine and any
//! renderer consume it. Records are built once per load and never mutated
//! afterwards; display state lives in the engine, keyed by list position.

use serde::{Deserialize, Serialize};

/// Annotation type as authored in the legacy tooling.
///
/// Values outside the well-known set are passed through verbatim. A
/// `pause`-type source record is never materialized by ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationType {
    /// Plain text note over the video
    Text,
    /// Transparent highlight region
    Highlight,
    /// Channel branding overlay
    Branding,
    /// Playback pause marker (filtered during ingest)
    Pause,
    /// Any other authoring-tool value, kept verbatim
    Other(String),
}

impl AnnotationType {
    /// The wire representation of this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Highlight => "highlight",
            Self::Branding => "branding",
            Self::Pause => "pause",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for AnnotationType {
    fn from(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "highlight" => Self::Highlight,
            "branding" => Self::Branding,
            "pause" => Self::Pause,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AnnotationType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<AnnotationType> for String {
    fn from(t: AnnotationType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region of the video frame, each value a percentage (0-100 nominal,
/// not clamped)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Playback interval in seconds. `start <= end` is expected but not
/// enforced here; the visibility engine treats the interval as half-open
/// (`end` excluded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// What clicking an annotation does. At most one action per annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// Seek within the same video
    Time { seconds: f64 },
    /// Navigate to another video
    Url { href: String },
}

/// Optional presentation hints from the authoring tool.
///
/// Each field is individually optional; "no appearance data at all" is
/// represented by omitting the whole struct, not by an all-`None` value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Appearance {
    /// Background color as a 24-bit integer (0..=0xFFFFFF)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<u32>,
    /// Background opacity in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_opacity: Option<f64>,
    /// Foreground (text) color as a 24-bit integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<u32>,
    /// Text size as a percentage of container height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_size: Option<f64>,
}

impl Appearance {
    /// `true` if no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bg_color.is_none()
            && self.bg_opacity.is_none()
            && self.fg_color.is_none()
            && self.text_size.is_none()
    }
}

/// A single time-coded, clickable region over the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Authoring-tool annotation type
    pub kind: AnnotationType,
    /// Opaque style tag, passed through unvalidated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Placement within the video frame
    pub geometry: Geometry,
    /// When the annotation is on screen
    pub time_range: TimeRange,
    /// Display text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Click action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Presentation hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<Appearance>,
}

impl Annotation {
    /// Create an annotation with the required fields only
    #[must_use]
    pub fn new(kind: AnnotationType, geometry: Geometry, time_range: TimeRange) -> Self {
        Self {
            kind,
            style: None,
            geometry,
            time_range,
            text: None,
            action: None,
            appearance: None,
        }
    }

    /// Set the style tag
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the display text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the click action
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the appearance hints
    #[must_use]
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }
}
