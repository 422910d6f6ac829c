//! `annolay` - codec and visibility engine for legacy time-coded video
//! annotations
//!
//! # Features
//!
//! - **AR format codec**: compact `shortKey=value` text encoding of
//!   annotations, round-trip safe by construction
//! - **Legacy XML ingest**: one-way transform from the retired authoring
//!   format, dropping unusable records instead of aborting
//! - **Visibility engine**: minimal show/hide transitions for a playback
//!   position, with sticky user dismissal
//! - **Duration parsing**: colon-delimited ("1:02:03") and letter-suffixed
//!   ("1h2m3s") time strings
//!
//! # Example
//!
//! ```rust
//! use annolay::{ingest_document, serialize_list, IngestOptions, VisibilityEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let xml = r#"<document>
//!         <annotation type="text">
//!             <TEXT>Hello</TEXT>
//!             <movingRegion type="rect">
//!                 <rectRegion x="10" y="20" w="30" h="15" t="0:05"/>
//!                 <rectRegion x="10" y="20" w="30" h="15" t="0:10"/>
//!             </movingRegion>
//!         </annotation>
//!     </document>"#;
//!
//!     let annotations = ingest_document(xml, &IngestOptions::default())?;
//!     let ar_text = serialize_list(&annotations);
//!     assert!(ar_text.ends_with(';'));
//!
//!     let mut engine = VisibilityEngine::new(annotations);
//!     let transitions = engine.update(7.0);
//!     assert_eq!(transitions.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod ingest;
pub mod model;
pub mod time;
pub mod visibility;

pub use codec::{
    deserialize_annotation, deserialize_list, serialize_annotation, serialize_list,
};
pub use error::{CodecError, FormatError, IngestError, ValidationError};
pub use ingest::{ingest_document, ingest_one, IngestOptions, DEFAULT_TRUSTED_PREFIX};
pub use model::{Action, Annotation, AnnotationType, Appearance, Geometry, TimeRange};
pub use time::{format_colon_duration, parse_colon_duration, parse_letter_duration};
pub use visibility::{DisplayState, Transition, VisibilityEngine};

/// Version of annolay
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
