//! Hangul/Latin input-method event-routing core.
//!
//! [`KeyRouter`] sits between the platform's raw key-event stream and a text
//! surface. Per key event it decides whether to pass the event through,
//! remap it, feed it into the external Hangul composition engine, or open a
//! hanja disambiguation flow. The composition algorithm itself, candidate
//! rendering, configuration storage, and the insertion API are collaborators
//! reached through the traits in [`engine`], [`candidates`], [`config`], and
//! [`surface`].
//!
//! Everything here runs on one logical event thread: key events, selection
//! notifications, configuration reloads, and candidate selections are
//! delivered serially, and platform adapters marshal onto that thread before
//! calling in.

pub mod candidates;
pub mod config;
pub mod engine;
pub mod layout;
pub mod mode;
mod routing;
pub mod surface;
pub mod types;

#[cfg(test)]
mod tests;

use tracing::warn;

use candidates::CandidateFlow;
use engine::EngineClient;
use mode::ModeController;

pub use candidates::{CandidateDisplay, CandidateSet, CandidateStyle};
pub use config::{BuiltinDefaults, Config, ConfigError, ConfigSource};
pub use engine::{CompositionEngine, EngineError};
pub use layout::{LatinLayout, ScriptLayout};
pub use mode::{InputMode, ModeSwitch, StatusDisplay};
pub use surface::TextSurface;
pub use types::{keycode, Decision, KeyAction, KeyEvent, Modifiers};

/// The event-routing state machine.
///
/// Owns its collaborators outright: the engine client, the text surface, the
/// mode controller, the candidate flow, and the configuration source are all
/// injected at construction.
pub struct KeyRouter {
    engine: EngineClient,
    surface: Box<dyn TextSurface>,
    mode: ModeController,
    candidates: CandidateFlow,
    config_source: Box<dyn ConfigSource>,
    config: Config,
    last_selection: Option<(usize, usize)>,
}

impl KeyRouter {
    /// Build a router. The initial snapshot is pulled from `config_source`
    /// (built-in defaults on failure) and decides the mode-switch strategy
    /// for the router's lifetime; later reloads keep the strategy.
    pub fn new(
        engine: Box<dyn CompositionEngine>,
        surface: Box<dyn TextSurface>,
        status: Box<dyn StatusDisplay>,
        display: Box<dyn CandidateDisplay>,
        config_source: Box<dyn ConfigSource>,
    ) -> Self {
        let config = pull_config(&*config_source);
        let mut engine = EngineClient::new(engine);
        let mut mode = ModeController::new(config.mode.switch, status);
        let mut candidates = CandidateFlow::new(display);

        engine.apply_config(&config);
        mode.apply_config(&config.display);
        candidates.apply_config(&config.display);

        Self {
            engine,
            surface,
            mode,
            candidates,
            config_source,
            config,
            last_selection: None,
        }
    }

    pub fn current_mode(&self) -> InputMode {
        self.mode.current()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pull a fresh snapshot and apply it. Called by the embedder between
    /// key events whenever the configuration store reports a change.
    pub fn reload_config(&mut self) {
        let config = pull_config(&*self.config_source);
        self.engine.apply_config(&config);
        self.mode.apply_config(&config.display);
        self.candidates.apply_config(&config.display);
        self.config = config;
    }

    /// A text-editing session begins: refresh the mode status icon.
    pub fn on_session_start(&mut self) {
        self.last_selection = None;
        self.mode.refresh_display();
    }

    /// A text-editing session ends: dismiss candidate UI and leave the
    /// engine empty, committing anything still in flight. Safe to call
    /// repeatedly.
    pub fn on_session_end(&mut self) {
        self.candidates.dismiss();
        self.force_commit();
        self.last_selection = None;
    }

    /// Cursor/selection-change notification. A moved cursor invalidates any
    /// open disambiguation target.
    pub fn on_selection_changed(&mut self, start: usize, end: usize) {
        if self.last_selection.is_some() && self.last_selection != Some((start, end)) {
            self.candidates.dismiss();
        }
        self.last_selection = Some((start, end));
    }

    /// The user picked a candidate in the display.
    pub fn on_candidate_selected(&mut self, key: &str) {
        self.candidates.select(key, &mut self.engine, &mut *self.surface);
    }

    /// Platform subtype notification (subtype strategy only).
    pub fn on_subtype_changed(&mut self, language_tag: &str) {
        self.mode.set_mode_from_subtype(language_tag);
    }

    /// Commit whatever is in flight and leave the engine empty.
    pub(crate) fn force_commit(&mut self) {
        if let Some(text) = self.engine.take_in_flight() {
            self.surface.commit_text(&text);
        }
        self.surface.finish_composing_text();
        self.engine.reset();
    }

    /// Relay the engine's commit/preedit state to the surface after a
    /// feed or backspace.
    pub(crate) fn update_composing(&mut self) {
        if let Some(text) = self.engine.commit_pending() {
            self.surface.commit_text(&text);
        }
        if let Some(preedit) = self.engine.preedit() {
            self.surface.set_composing_text(&preedit);
        }
    }

    /// Handle a mode-toggle trigger: stale candidates go first, then the
    /// controller flips (or re-announces, under the subtype strategy).
    pub(crate) fn switch_mode(&mut self) {
        self.candidates.dismiss();
        self.mode.toggle();
    }
}

fn pull_config(source: &dyn ConfigSource) -> Config {
    match source.snapshot() {
        Ok(config) => config,
        Err(e) => {
            warn!("configuration unavailable, using built-in defaults: {e}");
            Config::default()
        }
    }
}
