
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::candidates::{CandidateDisplay, CandidateSet, CandidateStyle};
use crate::config::{Config, ConfigError, ConfigSource};
use crate::engine::{CompositionEngine, EngineError};
use crate::mode::{InputMode, StatusDisplay};
use crate::surface::TextSurface;
use crate::types::{keycode, Decision, KeyEvent, Modifiers};
use crate::KeyRouter;

// ---------------------------------------------------------------------------
// Test engine: a deterministic two-jamo syllable automaton. Lowercase
// letters are jamo; a pair composes one syllable (picked from the hangul
// syllable block so the text reads like real output), promoted to the
// pending commit text when a third jamo arrives or on flush.
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct EngineState {
    pub buf: String,
    pub pending: String,
    pub lookup: HashMap<String, CandidateSet>,
    pub reject_all: bool,
    pub fail_feeds: bool,
    pub fail_lookups: bool,
    pub layout: String,
    pub options: Vec<(u16, bool)>,
    pub resets: usize,
}

pub(crate) fn syllable(first: char, second: char) -> char {
    let cho = (first as u32 - 'a' as u32) % 19;
    let jung = (second as u32 - 'a' as u32) % 21;
    char::from_u32(0xAC00 + cho * 588 + jung * 28).unwrap()
}

/// Render a jamo buffer: a full pair becomes a syllable, a lone jamo stays
/// as-is.
pub(crate) fn compose(buf: &str) -> String {
    let chars: Vec<char> = buf.chars().collect();
    match chars.as_slice() {
        [first, second] => syllable(*first, *second).to_string(),
        _ => buf.to_string(),
    }
}

pub(crate) struct TestEngine(pub Rc<RefCell<EngineState>>);

impl CompositionEngine for TestEngine {
    fn feed(&mut self, code: i32) -> Result<bool, EngineError> {
        let mut s = self.0.borrow_mut();
        if s.fail_feeds {
            return Err(EngineError::Fault("scripted feed fault".into()));
        }
        let Some(ch) = u32::try_from(code).ok().and_then(char::from_u32) else {
            return Ok(false);
        };
        if s.reject_all || !ch.is_ascii_lowercase() {
            return Ok(false);
        }
        if s.buf.chars().count() == 2 {
            let composed = compose(&s.buf);
            s.buf.clear();
            s.pending.push_str(&composed);
        }
        s.buf.push(ch);
        Ok(true)
    }

    fn backspace(&mut self) -> Result<bool, EngineError> {
        let mut s = self.0.borrow_mut();
        if s.buf.pop().is_some() {
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn preedit(&self) -> Option<String> {
        let s = self.0.borrow();
        if s.buf.is_empty() {
            None
        } else {
            Some(s.buf.clone())
        }
    }

    fn commit_pending(&mut self) -> Option<String> {
        let mut s = self.0.borrow_mut();
        if s.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut s.pending))
        }
    }

    fn flush(&mut self) -> Option<String> {
        let mut s = self.0.borrow_mut();
        let buf = std::mem::take(&mut s.buf);
        let text = format!("{}{}", std::mem::take(&mut s.pending), compose(&buf));
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn reset(&mut self) {
        let mut s = self.0.borrow_mut();
        s.buf.clear();
        s.pending.clear();
        s.resets += 1;
    }

    fn is_empty(&self) -> bool {
        let s = self.0.borrow();
        s.buf.is_empty() && s.pending.is_empty()
    }

    fn select_layout(&mut self, id: &str) {
        self.0.borrow_mut().layout = id.to_string();
    }

    fn set_option(&mut self, option: u16, value: bool) {
        self.0.borrow_mut().options.push((option, value));
    }

    fn lookup_exact(&self, text: &str) -> Result<Option<CandidateSet>, EngineError> {
        let s = self.0.borrow();
        if s.fail_lookups {
            return Err(EngineError::Fault("scripted lookup fault".into()));
        }
        Ok(s.lookup.get(text).cloned())
    }
}

// ---------------------------------------------------------------------------
// Recording surface
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct SurfaceState {
    pub committed: Vec<String>,
    pub composing: Vec<String>,
    pub finishes: usize,
    pub selections: Vec<(usize, usize)>,
    pub sent_keys: Vec<KeyEvent>,
    pub selected_text: Option<String>,
    pub before_cursor: String,
    pub cursor: Option<usize>,
}

impl SurfaceState {
    pub fn committed_text(&self) -> String {
        self.committed.concat()
    }
}

pub(crate) struct RecordingSurface(pub Rc<RefCell<SurfaceState>>);

impl TextSurface for RecordingSurface {
    fn commit_text(&mut self, text: &str) {
        self.0.borrow_mut().committed.push(text.to_string());
    }

    fn set_composing_text(&mut self, text: &str) {
        self.0.borrow_mut().composing.push(text.to_string());
    }

    fn finish_composing_text(&mut self) {
        self.0.borrow_mut().finishes += 1;
    }

    fn selected_text(&self) -> Option<String> {
        self.0.borrow().selected_text.clone()
    }

    fn text_before_cursor(&self, n: usize) -> Option<String> {
        let s = self.0.borrow();
        if s.before_cursor.is_empty() {
            return None;
        }
        let chars: Vec<char> = s.before_cursor.chars().collect();
        let start = chars.len().saturating_sub(n);
        Some(chars[start..].iter().collect())
    }

    fn cursor_position(&self) -> Option<usize> {
        self.0.borrow().cursor
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.0.borrow_mut().selections.push((start, end));
    }

    fn send_raw_key(&mut self, event: KeyEvent) {
        self.0.borrow_mut().sent_keys.push(event);
    }
}

// ---------------------------------------------------------------------------
// Display spies
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct StatusState {
    pub icons: Vec<InputMode>,
    pub hides: usize,
    pub messages: Vec<InputMode>,
    pub deny_messages: bool,
}

pub(crate) struct StatusSpy(pub Rc<RefCell<StatusState>>);

impl StatusDisplay for StatusSpy {
    fn show_mode_icon(&mut self, mode: InputMode) {
        self.0.borrow_mut().icons.push(mode);
    }

    fn hide_mode_icon(&mut self) {
        self.0.borrow_mut().hides += 1;
    }

    fn show_mode_message(&mut self, mode: InputMode) -> bool {
        let mut s = self.0.borrow_mut();
        if s.deny_messages {
            return false;
        }
        s.messages.push(mode);
        true
    }
}

#[derive(Default)]
pub(crate) struct PanelState {
    pub shown: Vec<(String, CandidateSet, CandidateStyle)>,
    pub dismissals: usize,
    pub overlay_allowed: bool,
}

pub(crate) struct PanelSpy(pub Rc<RefCell<PanelState>>);

impl CandidateDisplay for PanelSpy {
    fn show(&mut self, source: &str, candidates: &CandidateSet, style: CandidateStyle) {
        self.0
            .borrow_mut()
            .shown
            .push((source.to_string(), candidates.clone(), style));
    }

    fn dismiss(&mut self) {
        self.0.borrow_mut().dismissals += 1;
    }

    fn can_overlay(&self) -> bool {
        self.0.borrow().overlay_allowed
    }
}

// ---------------------------------------------------------------------------
// Config sources
// ---------------------------------------------------------------------------

pub(crate) struct SharedConfig(pub Rc<RefCell<Config>>);

impl ConfigSource for SharedConfig {
    fn snapshot(&self) -> Result<Config, ConfigError> {
        Ok(self.0.borrow().clone())
    }
}

pub(crate) struct FailingConfig;

impl ConfigSource for FailingConfig {
    fn snapshot(&self) -> Result<Config, ConfigError> {
        Err(ConfigError::Unavailable("scripted store failure".into()))
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

pub(crate) struct Fixture {
    pub router: KeyRouter,
    pub engine: Rc<RefCell<EngineState>>,
    pub surface: Rc<RefCell<SurfaceState>>,
    pub status: Rc<RefCell<StatusState>>,
    pub panel: Rc<RefCell<PanelState>>,
    pub config: Rc<RefCell<Config>>,
}

pub(crate) fn fixture_with(config: Config) -> Fixture {
    let engine = Rc::new(RefCell::new(EngineState::default()));
    let surface = Rc::new(RefCell::new(SurfaceState::default()));
    let status = Rc::new(RefCell::new(StatusState::default()));
    let panel = Rc::new(RefCell::new(PanelState::default()));
    let config = Rc::new(RefCell::new(config));

    let router = KeyRouter::new(
        Box::new(TestEngine(engine.clone())),
        Box::new(RecordingSurface(surface.clone())),
        Box::new(StatusSpy(status.clone())),
        Box::new(PanelSpy(panel.clone())),
        Box::new(SharedConfig(config.clone())),
    );

    Fixture {
        router,
        engine,
        surface,
        status,
        panel,
        config,
    }
}

pub(crate) fn fixture() -> Fixture {
    fixture_with(Config::default())
}

// Helpers

pub(crate) fn char_key(ch: char) -> KeyEvent {
    KeyEvent::down(0, Some(ch), Modifiers::empty())
}

pub(crate) fn press(router: &mut KeyRouter, ch: char) -> Decision {
    router.route(&char_key(ch))
}

pub(crate) fn type_string(router: &mut KeyRouter, s: &str) -> Vec<Decision> {
    s.chars().map(|ch| press(router, ch)).collect()
}

/// Flip the router into Script mode via the right-alt toggle.
pub(crate) fn enter_script_mode(router: &mut KeyRouter) {
    let resp = router.route(&KeyEvent::down(
        keycode::ALT_RIGHT,
        None,
        Modifiers::ALT_RIGHT,
    ));
    assert_eq!(resp, Decision::Consumed);
    assert_eq!(router.current_mode(), InputMode::Script);
}
