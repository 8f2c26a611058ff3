//! Composition-engine contract and the client adapter the router talks to.

use tracing::warn;

use crate::candidates::CandidateSet;
use crate::config::Config;

// Engine option ids, matching the composition options in the config.
pub const OPT_AUTO_REORDER: u16 = 0;
pub const OPT_COMBI_DOUBLE_STROKE: u16 = 1;
pub const OPT_NON_CHOSEONG_COMBI: u16 = 2;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine fault: {0}")]
    Fault(String),
}

/// External phonetic composition engine.
///
/// The engine owns the composition buffer; the router only drives it through
/// these operations and observes preedit/commit text. Faults reported here
/// never cross the router: the client below maps them to a reject or an
/// empty lookup.
pub trait CompositionEngine {
    /// Feed one key code. `Ok(true)` if the engine consumed it into the
    /// composition, `Ok(false)` if the character cannot extend it.
    fn feed(&mut self, code: i32) -> Result<bool, EngineError>;
    /// Remove the last fed unit. `Ok(false)` when there was nothing to remove.
    fn backspace(&mut self) -> Result<bool, EngineError>;
    /// Text currently being composed, if any.
    fn preedit(&self) -> Option<String>;
    /// Take text the engine has finished composing since the last call.
    fn commit_pending(&mut self) -> Option<String>;
    /// Finalize the composition and take everything still in flight.
    fn flush(&mut self) -> Option<String>;
    fn reset(&mut self);
    fn is_empty(&self) -> bool;
    fn select_layout(&mut self, id: &str);
    fn set_option(&mut self, option: u16, value: bool);
    /// Candidates whose key exactly matches `text`, in display order.
    fn lookup_exact(&self, text: &str) -> Result<Option<CandidateSet>, EngineError>;
}

/// Adapter wrapping the engine for the router.
///
/// Absorbs engine faults (treated as reject / no candidates) and implements
/// the force-commit cascade used before mode switches and non-composable
/// keys.
pub struct EngineClient {
    inner: Box<dyn CompositionEngine>,
}

impl EngineClient {
    pub fn new(inner: Box<dyn CompositionEngine>) -> Self {
        Self { inner }
    }

    pub fn feed(&mut self, code: i32) -> bool {
        match self.inner.feed(code) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("feed fault treated as reject: {e}");
                false
            }
        }
    }

    pub fn backspace(&mut self) -> bool {
        match self.inner.backspace() {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("backspace fault treated as reject: {e}");
                false
            }
        }
    }

    pub fn preedit(&self) -> Option<String> {
        self.inner.preedit().filter(|s| !s.is_empty())
    }

    pub fn commit_pending(&mut self) -> Option<String> {
        self.inner.commit_pending().filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn lookup_exact(&self, text: &str) -> Option<CandidateSet> {
        match self.inner.lookup_exact(text) {
            Ok(result) => result.filter(|set| !set.is_empty()),
            Err(e) => {
                warn!("lookup fault treated as empty: {e}");
                None
            }
        }
    }

    /// Take everything still in flight, in commit order: flushed text,
    /// then pending commit text, then bare preedit. The caller commits the
    /// result to the surface and resets the engine.
    pub fn take_in_flight(&mut self) -> Option<String> {
        if let Some(text) = self.inner.flush().filter(|s| !s.is_empty()) {
            return Some(text);
        }
        if let Some(text) = self.commit_pending() {
            return Some(text);
        }
        self.preedit()
    }

    /// Push the layout and composition options from a fresh snapshot.
    pub fn apply_config(&mut self, config: &Config) {
        self.inner.select_layout(config.layout.script.id());
        self.inner
            .set_option(OPT_AUTO_REORDER, config.engine.auto_reorder);
        self.inner
            .set_option(OPT_COMBI_DOUBLE_STROKE, config.engine.combi_double_stroke);
        self.inner
            .set_option(OPT_NON_CHOSEONG_COMBI, config.engine.non_choseong_combi);
    }
}
