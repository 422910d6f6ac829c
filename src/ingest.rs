//! Legacy annotation XML ingest
//!
//! One-way transform from the retired authoring format into canonical
//! [`Annotation`] records. Legacy archives routinely contain unusable
//! entries, so a single bad annotation never aborts the batch: it is
//! dropped (with a `debug` log naming the reason) and ingest continues.
//! The only hard failure is an unparsable document.
//!
//! Expected structure per annotation:
//!
//! ```xml
//! <annotation type="text" style="popup">
//!   <TEXT>Display text</TEXT>
//!   <movingRegion type="rect">
//!     <rectRegion x="10" y="20" w="30" h="15" t="0:05"/>
//!     <rectRegion x="10" y="20" w="30" h="15" t="0:10"/>
//!   </movingRegion>
//!   <action type="link"><url value="https://..."/></action>
//!   <appearance bgAlpha="0.25" bgColor="16777215" fgColor="0" textSize="3.6"/>
//! </annotation>
//! ```

use roxmltree::{Document, Node};
use tracing::debug;
use url::Url;

use crate::error::IngestError;
use crate::model::{Action, Annotation, AnnotationType, Appearance, Geometry, TimeRange};
use crate::time::{parse_colon_duration, parse_letter_duration};

/// Default allow-listed base for action links: the video platform itself.
pub const DEFAULT_TRUSTED_PREFIX: &str = "https://www.youtube.com/";

/// Ingest configuration.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Only action hrefs starting with this prefix are honored; anything
    /// else is treated as "no action" (the annotation itself is kept).
    pub trusted_prefix: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            trusted_prefix: DEFAULT_TRUSTED_PREFIX.to_string(),
        }
    }
}

/// Parse a legacy annotation document and ingest every `annotation`
/// element, in document order. Invalid individual annotations are skipped.
pub fn ingest_document(xml: &str, options: &IngestOptions) -> Result<Vec<Annotation>, IngestError> {
    let doc = Document::parse(xml)?;

    let annotations: Vec<Annotation> = doc
        .descendants()
        .filter(|n| n.has_tag_name("annotation"))
        .filter_map(|n| ingest_one(n, options))
        .collect();

    debug!(count = annotations.len(), "ingested annotation document");
    Ok(annotations)
}

/// Ingest a single `annotation` element, or `None` if it is structurally
/// or semantically unusable.
pub fn ingest_one(node: Node<'_, '_>, options: &IngestOptions) -> Option<Annotation> {
    let kind = match node.attribute("type") {
        None => {
            debug!("dropping annotation without a type attribute");
            return None;
        }
        Some("pause") => {
            debug!("dropping pause-type annotation");
            return None;
        }
        Some(value) => AnnotationType::from(value),
    };
    let style = node.attribute("style");

    let Some(moving_region) = node.descendants().find(|n| n.has_tag_name("movingRegion")) else {
        debug!("dropping annotation without a movingRegion");
        return None;
    };
    let Some(region_type) = moving_region.attribute("type") else {
        debug!("dropping annotation with an untyped movingRegion");
        return None;
    };

    // e.g. type="rect" selects the <rectRegion> children
    let region_name = format!("{region_type}Region");
    let regions: Vec<Node<'_, '_>> = moving_region
        .descendants()
        .filter(|n| n.tag_name().name() == region_name)
        .collect();
    let (Some(first), Some(last)) = (regions.first(), regions.last()) else {
        debug!(region_name, "dropping annotation without region children");
        return None;
    };

    // Geometry comes from the first region only; later regions matter
    // solely for their timestamps.
    let geometry = Geometry::new(
        region_f64(*first, "x")?,
        region_f64(*first, "y")?,
        region_f64(*first, "w")?,
        region_f64(*first, "h")?,
    );

    let start = region_time(*first)?;
    let end = region_time(*last)?;
    let time_range = TimeRange::new(start, end);

    let text = node
        .descendants()
        .find(|n| n.has_tag_name("TEXT"))
        .and_then(|n| n.text())
        .map(ToString::to_string);

    let action = extract_action(node, &options.trusted_prefix);
    let appearance = extract_appearance(node);

    let mut annotation = Annotation::new(kind, geometry, time_range);
    annotation.style = style.map(ToString::to_string);
    annotation.text = text;
    annotation.action = action;
    annotation.appearance = appearance;

    Some(annotation)
}

/// Read a click action from `action/url[value]`.
///
/// Off-allowlist targets drop the action, never the annotation. A trusted
/// href with `src_vid == v` is a same-video seek whose offset comes from
/// the `#t=` fragment (0 when absent); otherwise it is a cross-video link.
fn extract_action(node: Node<'_, '_>, trusted_prefix: &str) -> Option<Action> {
    let action = node.descendants().find(|n| n.has_tag_name("action"))?;
    let url_element = action.descendants().find(|n| n.has_tag_name("url"))?;
    let href = url_element.attribute("value")?;

    if !href.starts_with(trusted_prefix) {
        debug!(href, "dropping action with untrusted target");
        return None;
    }
    let url = Url::parse(href).ok()?;

    let src_vid = query_param(&url, "src_vid")?;
    let to_vid = query_param(&url, "v")?;

    if src_vid == to_vid {
        let seconds = url
            .fragment()
            .and_then(|fragment| fragment.strip_prefix("t="))
            .map_or(0, parse_letter_duration);
        #[allow(clippy::cast_precision_loss)]
        Some(Action::Time { seconds: seconds as f64 })
    } else {
        Some(Action::Url { href: href.to_string() })
    }
}

fn extract_appearance(node: Node<'_, '_>) -> Option<Appearance> {
    let element = node.descendants().find(|n| n.has_tag_name("appearance"))?;

    let appearance = Appearance {
        bg_color: attr_u32(element, "bgColor"),
        bg_opacity: attr_f64(element, "bgAlpha"),
        fg_color: attr_u32(element, "fgColor"),
        text_size: attr_f64(element, "textSize"),
    };

    // An appearance element with nothing usable in it is no appearance.
    (!appearance.is_empty()).then_some(appearance)
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn region_f64(region: Node<'_, '_>, name: &str) -> Option<f64> {
    let value = attr_f64(region, name);
    if value.is_none() {
        debug!(attribute = name, "dropping annotation with bad region geometry");
    }
    value
}

fn region_time(region: Node<'_, '_>) -> Option<f64> {
    let parsed = region
        .attribute("t")
        .and_then(|t| parse_colon_duration(t).ok());
    if parsed.is_none() {
        debug!("dropping annotation with an unparsable region timestamp");
    }
    parsed
}

fn attr_f64(node: Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn attr_u32(node: Node<'_, '_>, name: &str) -> Option<u32> {
    node.attribute(name).and_then(|v| v.parse::<u32>().ok())
}
