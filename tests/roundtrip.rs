//! End-to-end pipeline tests: legacy XML → canonical model → AR text →
//! canonical model → visibility engine.

use annolay::{
    deserialize_list, ingest_document, serialize_list, Action, AnnotationType, DisplayState,
    IngestOptions, VisibilityEngine,
};

const ARCHIVE_XML: &str = r#"<document>
    <annotations>
        <annotation type="text" style="popup">
            <TEXT>Subscribe here, it's free!</TEXT>
            <movingRegion type="rect">
                <rectRegion x="5.5" y="10" w="25" h="12.5" t="0:05"/>
                <rectRegion x="5.5" y="10" w="25" h="12.5" t="0:15"/>
            </movingRegion>
            <action type="openUrl">
                <url value="https://www.youtube.com/watch?v=next1&amp;src_vid=this1"/>
            </action>
            <appearance bgAlpha="0.3" bgColor="16777215" fgColor="0" textSize="3.6"/>
        </annotation>
        <annotation type="highlight">
            <movingRegion type="rect">
                <rectRegion x="40" y="40" w="20" h="20" t="0:10"/>
                <rectRegion x="40" y="40" w="20" h="20" t="0:20"/>
            </movingRegion>
            <action type="openUrl">
                <url value="https://www.youtube.com/watch?v=same&amp;src_vid=same#t=1m30s"/>
            </action>
        </annotation>
        <annotation type="pause">
            <movingRegion type="rect">
                <rectRegion x="0" y="0" w="1" h="1" t="0:02"/>
            </movingRegion>
        </annotation>
        <annotation type="branding">
            <movingRegion type="rect">
                <rectRegion x="80" y="80" w="15" h="10" t="0:00"/>
                <rectRegion x="80" y="80" w="15" h="10" t="9:59"/>
            </movingRegion>
            <action type="openUrl">
                <url value="https://phishing.example.net/watch?v=a&amp;src_vid=b"/>
            </action>
        </annotation>
    </annotations>
</document>"#;

#[test]
fn xml_to_ar_to_model_round_trip() {
    let ingested = ingest_document(ARCHIVE_XML, &IngestOptions::default()).unwrap();
    // pause annotation filtered, everything else kept
    assert_eq!(ingested.len(), 3);

    let ar_text = serialize_list(&ingested);
    let decoded = deserialize_list(&ar_text).unwrap();
    assert_eq!(decoded, ingested);
}

#[test]
fn ingest_resolves_actions_per_allowlist() {
    let ingested = ingest_document(ARCHIVE_XML, &IngestOptions::default()).unwrap();

    // cross-video link kept as a URL action
    assert!(matches!(
        ingested[0].action,
        Some(Action::Url { ref href }) if href.contains("v=next1")
    ));

    // same-video link becomes a 90s seek
    assert_eq!(ingested[1].action, Some(Action::Time { seconds: 90.0 }));

    // untrusted target: action dropped, annotation kept
    assert_eq!(ingested[2].kind, AnnotationType::Branding);
    assert!(ingested[2].action.is_none());
}

#[test]
fn appearance_survives_the_full_round_trip() {
    let ingested = ingest_document(ARCHIVE_XML, &IngestOptions::default()).unwrap();
    let ar_text = serialize_list(&ingested);
    let decoded = deserialize_list(&ar_text).unwrap();

    let appearance = decoded[0].appearance.unwrap();
    assert_eq!(appearance.bg_opacity, Some(0.3));
    assert_eq!(appearance.bg_color, Some(0xFF_FFFF));
    assert_eq!(appearance.fg_color, Some(0));
    assert_eq!(appearance.text_size, Some(3.6));
    assert!(decoded[1].appearance.is_none());
}

#[test]
fn playback_session_over_ingested_annotations() {
    let ingested = ingest_document(ARCHIVE_XML, &IngestOptions::default()).unwrap();
    let mut engine = VisibilityEngine::new(ingested);

    // t=0: only the long-running branding annotation shows
    let transitions = engine.update(0.0);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].id, 2);

    // t=12: both timed annotations join it
    let transitions = engine.update(12.0);
    assert_eq!(transitions.len(), 2);
    assert_eq!(engine.state(0), Some(DisplayState::Visible));
    assert_eq!(engine.state(1), Some(DisplayState::Visible));

    // user closes the text annotation; it never comes back
    engine.dismiss(0);
    assert!(engine.update(12.0).is_empty());

    // t=15: text range [5,15) is over anyway, highlight stays up
    let transitions = engine.update(15.0);
    assert!(transitions.is_empty());
    assert_eq!(engine.state(0), Some(DisplayState::Dismissed));
    assert_eq!(engine.state(1), Some(DisplayState::Visible));

    // playback tracking stops
    let hidden = engine.hide_all();
    assert_eq!(hidden.len(), 2);
    assert_eq!(engine.state(0), Some(DisplayState::Dismissed));
}

#[test]
fn reload_clears_dismissals() {
    let ingested = ingest_document(ARCHIVE_XML, &IngestOptions::default()).unwrap();
    let mut engine = VisibilityEngine::new(ingested.clone());

    engine.update(12.0);
    engine.dismiss(0);

    engine.load(ingested);
    assert_eq!(engine.state(0), Some(DisplayState::Hidden));
    assert_eq!(engine.update(12.0).len(), 3);
}
