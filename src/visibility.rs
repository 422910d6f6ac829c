//! Temporal visibility engine
//!
//! Tracks one display state per annotation and, given a playback position,
//! computes the minimal set of state transitions. Repeated calls at a
//! steady time produce zero transitions, so a renderer driven on a fixed
//! tick never does redundant work.
//!
//! The engine owns all display state; annotations stay immutable and are
//! addressed by a stable integer id (their load-order position). A pass
//! evaluates every annotation against one time snapshot, so annotations
//! sharing an interval edge always agree on which side of it they are.

use serde::{Deserialize, Serialize};

use crate::model::Annotation;

/// Display state of one annotation.
///
/// `Dismissed` is absorbing: nothing leaves it short of a full reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    #[default]
    Hidden,
    Visible,
    Dismissed,
}

/// One reported state change, keyed by annotation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Position of the annotation in the loaded list
    pub id: usize,
    pub from: DisplayState,
    pub to: DisplayState,
}

/// Per-session visibility tracker over an ordered annotation list.
#[derive(Debug, Default)]
pub struct VisibilityEngine {
    annotations: Vec<Annotation>,
    states: Vec<DisplayState>,
}

impl VisibilityEngine {
    /// Create an engine over `annotations`, all starting `Hidden`.
    #[must_use]
    pub fn new(annotations: Vec<Annotation>) -> Self {
        let states = vec![DisplayState::Hidden; annotations.len()];
        Self { annotations, states }
    }

    /// Replace the annotation set. All state is discarded, including
    /// dismissals.
    pub fn load(&mut self, annotations: Vec<Annotation>) {
        self.states = vec![DisplayState::Hidden; annotations.len()];
        self.annotations = annotations;
    }

    /// Evaluate every annotation against one `current_time` snapshot and
    /// return the transitions actually required.
    ///
    /// An annotation targets `Visible` on the half-open interval
    /// `[start, end)`; `end` itself is excluded. Dismissed annotations
    /// never transition.
    pub fn update(&mut self, current_time: f64) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for (id, annotation) in self.annotations.iter().enumerate() {
            let from = self.states[id];
            let to = Self::target_state(annotation, from, current_time);
            if to != from {
                self.states[id] = to;
                transitions.push(Transition { id, from, to });
            }
        }

        transitions
    }

    /// The state an annotation should be in at `current_time`, given its
    /// current state.
    #[must_use]
    pub fn target_state(
        annotation: &Annotation,
        current: DisplayState,
        current_time: f64,
    ) -> DisplayState {
        if current == DisplayState::Dismissed {
            return DisplayState::Dismissed;
        }
        let range = annotation.time_range;
        if current_time >= range.start && current_time < range.end {
            DisplayState::Visible
        } else {
            DisplayState::Hidden
        }
    }

    /// Force an annotation to `Dismissed`, unconditionally. Irreversible
    /// until the next [`load`](Self::load) or [`reset`](Self::reset).
    ///
    /// Returns `false` if `id` is out of range.
    pub fn dismiss(&mut self, id: usize) -> bool {
        match self.states.get_mut(id) {
            Some(state) => {
                *state = DisplayState::Dismissed;
                true
            }
            None => false,
        }
    }

    /// Reset every annotation to `Hidden`, clearing dismissals. Used when
    /// restarting playback tracking.
    pub fn reset(&mut self) {
        self.states.fill(DisplayState::Hidden);
    }

    /// Hide everything currently visible, e.g. when playback tracking
    /// stops. Dismissed annotations stay dismissed.
    pub fn hide_all(&mut self) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for (id, state) in self.states.iter_mut().enumerate() {
            if *state == DisplayState::Visible {
                *state = DisplayState::Hidden;
                transitions.push(Transition {
                    id,
                    from: DisplayState::Visible,
                    to: DisplayState::Hidden,
                });
            }
        }

        transitions
    }

    /// The loaded annotations, in id order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Current display state of one annotation.
    #[must_use]
    pub fn state(&self, id: usize) -> Option<DisplayState> {
        self.states.get(id).copied()
    }

    /// Iterate `(id, annotation, state)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Annotation, DisplayState)> {
        self.annotations
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(id, (annotation, state))| (id, annotation, *state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationType, Geometry, TimeRange};

    fn annotation(start: f64, end: f64) -> Annotation {
        Annotation::new(
            AnnotationType::Text,
            Geometry::new(0.0, 0.0, 10.0, 10.0),
            TimeRange::new(start, end),
        )
    }

    fn engine() -> VisibilityEngine {
        VisibilityEngine::new(vec![annotation(10.0, 20.0)])
    }

    #[test]
    fn shows_inside_interval_and_hides_outside() {
        let mut engine = engine();

        let transitions = engine.update(10.0);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].to, DisplayState::Visible);

        let transitions = engine.update(25.0);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].from, DisplayState::Visible);
        assert_eq!(transitions[0].to, DisplayState::Hidden);
    }

    #[test]
    fn end_of_interval_is_exclusive() {
        let mut engine = engine();
        engine.update(19.999);
        assert_eq!(engine.state(0), Some(DisplayState::Visible));

        let transitions = engine.update(20.0);
        assert_eq!(transitions.len(), 1);
        assert_eq!(engine.state(0), Some(DisplayState::Hidden));
    }

    #[test]
    fn steady_time_produces_no_transitions() {
        let mut engine = engine();
        assert_eq!(engine.update(15.0).len(), 1);
        assert!(engine.update(15.0).is_empty());
        assert!(engine.update(15.0).is_empty());
    }

    #[test]
    fn before_start_stays_hidden_without_transitions() {
        let mut engine = engine();
        assert!(engine.update(5.0).is_empty());
    }

    #[test]
    fn dismissed_is_absorbing() {
        let mut engine = engine();
        engine.update(15.0);
        assert!(engine.dismiss(0));

        assert!(engine.update(15.0).is_empty());
        assert!(engine.update(5.0).is_empty());
        assert_eq!(engine.state(0), Some(DisplayState::Dismissed));
    }

    #[test]
    fn dismiss_out_of_range_is_rejected() {
        let mut engine = engine();
        assert!(!engine.dismiss(7));
    }

    #[test]
    fn reset_clears_dismissals() {
        let mut engine = engine();
        engine.dismiss(0);
        engine.reset();
        assert_eq!(engine.state(0), Some(DisplayState::Hidden));

        let transitions = engine.update(15.0);
        assert_eq!(transitions[0].to, DisplayState::Visible);
    }

    #[test]
    fn load_replaces_set_and_state() {
        let mut engine = engine();
        engine.dismiss(0);

        engine.load(vec![annotation(0.0, 5.0), annotation(3.0, 8.0)]);
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.state(0), Some(DisplayState::Hidden));

        let transitions = engine.update(4.0);
        assert_eq!(transitions.len(), 2);
    }

    #[test]
    fn hide_all_hides_visible_and_skips_dismissed() {
        let mut engine = VisibilityEngine::new(vec![
            annotation(0.0, 30.0),
            annotation(0.0, 30.0),
            annotation(50.0, 60.0),
        ]);
        engine.update(10.0);
        engine.dismiss(1);

        let transitions = engine.hide_all();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].id, 0);
        assert_eq!(engine.state(1), Some(DisplayState::Dismissed));
        assert_eq!(engine.state(2), Some(DisplayState::Hidden));
    }

    #[test]
    fn shared_edge_is_consistent_across_annotations() {
        let mut engine = VisibilityEngine::new(vec![
            annotation(0.0, 10.0),
            annotation(10.0, 20.0),
        ]);

        let transitions = engine.update(10.0);
        // the first ends exactly where the second begins
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].id, 1);
        assert_eq!(engine.state(0), Some(DisplayState::Hidden));
        assert_eq!(engine.state(1), Some(DisplayState::Visible));
    }
}
