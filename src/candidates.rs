//! Hanja disambiguation flow: target resolution, lookup, and selection.

use serde::Deserialize;
use tracing::debug;

use crate::config::DisplayConfig;
use crate::engine::EngineClient;
use crate::surface::TextSurface;

/// Ordered candidate-key → display-label mapping.
///
/// Iteration follows insertion order; inserting an existing key replaces its
/// label in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: Vec<(String, String)>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// How the candidate list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CandidateStyle {
    #[serde(rename = "overlay-vertical")]
    OverlayVertical,
    #[serde(rename = "overlay-horizontal")]
    OverlayHorizontal,
    /// Inline scroll strip; the only style that needs no overlay permission.
    #[serde(rename = "inline")]
    Inline,
}

impl CandidateStyle {
    fn needs_overlay(self) -> bool {
        !matches!(self, Self::Inline)
    }
}

/// Candidate list renderer.
///
/// Selection is not a callback: the embedder delivers the chosen key back to
/// the router as an `on_candidate_selected` notification on the event thread.
pub trait CandidateDisplay {
    fn show(&mut self, source: &str, candidates: &CandidateSet, style: CandidateStyle);
    fn dismiss(&mut self);
    /// Whether the overlay styles are permitted on this platform.
    fn can_overlay(&self) -> bool;
}

struct PendingSelection {
    /// Replace the single character before the cursor on selection. True for
    /// preedit and cursor-char targets, false for selected-text targets.
    remove_cursor_char: bool,
}

/// Resolves the disambiguation target, runs the lookup, and applies the
/// user's selection.
pub struct CandidateFlow {
    display: Box<dyn CandidateDisplay>,
    style: CandidateStyle,
    pending: Option<PendingSelection>,
}

impl CandidateFlow {
    pub fn new(display: Box<dyn CandidateDisplay>) -> Self {
        Self {
            display,
            style: CandidateStyle::Inline,
            pending: None,
        }
    }

    /// Re-resolve the display style, downgrading overlay styles to the
    /// inline strip when the overlay permission is missing. Any open UI is
    /// dismissed: its style may no longer be valid.
    pub fn apply_config(&mut self, display: &DisplayConfig) {
        self.dismiss();
        self.style = if display.candidate_style.needs_overlay() && !self.display.can_overlay() {
            CandidateStyle::Inline
        } else {
            display.candidate_style
        };
    }

    /// Open the disambiguation flow. Target precedence: in-progress preedit,
    /// then selected text, then the single character before the cursor. A
    /// lookup miss or no target at all is a no-op.
    pub fn open(&mut self, engine: &EngineClient, surface: &dyn TextSurface) {
        let (target, remove_cursor_char) = if let Some(preedit) = engine.preedit() {
            (preedit, true)
        } else if let Some(selected) = surface.selected_text().filter(|s| !s.is_empty()) {
            (selected, false)
        } else if let Some(before) = surface.text_before_cursor(1).filter(|s| !s.is_empty()) {
            (before, true)
        } else {
            return;
        };

        let Some(candidates) = engine.lookup_exact(&target) else {
            return;
        };

        debug!(%target, count = candidates.len(), "opening candidates");
        self.display.show(&target, &candidates, self.style);
        self.pending = Some(PendingSelection { remove_cursor_char });
    }

    /// Apply a selection from the display: replace the target span with the
    /// chosen key and close the flow. Ignored when no flow is open.
    pub fn select(
        &mut self,
        key: &str,
        engine: &mut EngineClient,
        surface: &mut dyn TextSurface,
    ) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        surface.finish_composing_text();
        engine.reset();
        if pending.remove_cursor_char {
            // Select the character just before the cursor so the commit
            // below replaces it.
            if let Some(pos) = surface.cursor_position() {
                if pos > 0 {
                    surface.set_selection(pos - 1, pos);
                }
            }
        }
        surface.commit_text(key);
        self.display.dismiss();
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
        self.display.dismiss();
    }
}
