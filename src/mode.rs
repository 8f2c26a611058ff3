//! Input-language mode and its status display.

use serde::Deserialize;
use tracing::debug;

use crate::config::DisplayConfig;

/// Language tag that selects Script mode under the subtype strategy.
const SCRIPT_LANGUAGE_TAG: &str = "ko-KR";

/// Current input language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Latin,
    Script,
}

impl InputMode {
    fn flipped(self) -> Self {
        match self {
            Self::Latin => Self::Script,
            Self::Script => Self::Latin,
        }
    }
}

/// How the active language changes. Exactly one mechanism is active,
/// selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ModeSwitch {
    /// The toggle triggers flip the mode in-process.
    #[serde(rename = "toggle")]
    Toggle,
    /// The platform's subtype mechanism owns switching; the mode follows
    /// external language-tag notifications.
    #[serde(rename = "subtype")]
    Subtype,
}

/// Observer for mode-change announcements.
pub trait StatusDisplay {
    fn show_mode_icon(&mut self, mode: InputMode);
    fn hide_mode_icon(&mut self);
    /// Show a transient mode message. Returns false when the channel is
    /// unavailable (e.g. notification permission not granted).
    fn show_mode_message(&mut self, mode: InputMode) -> bool;
}

/// Owns the current input mode and announces changes.
pub struct ModeController {
    mode: InputMode,
    strategy: ModeSwitch,
    status: Box<dyn StatusDisplay>,
    show_icon: bool,
    show_message: bool,
    /// Set when the transient channel reported itself unavailable; cleared
    /// on the next config apply so a granted permission takes effect.
    message_denied: bool,
}

impl ModeController {
    pub fn new(strategy: ModeSwitch, status: Box<dyn StatusDisplay>) -> Self {
        Self {
            mode: InputMode::Latin,
            strategy,
            status,
            show_icon: true,
            show_message: false,
            message_denied: false,
        }
    }

    pub fn current(&self) -> InputMode {
        self.mode
    }

    pub fn strategy(&self) -> ModeSwitch {
        self.strategy
    }

    /// Handle a toggle trigger. Under the manual strategy this flips the
    /// mode; under the subtype strategy the platform owns the switch and the
    /// mode changes only when the subtype notification arrives, so this only
    /// re-announces.
    pub fn toggle(&mut self) {
        match self.strategy {
            ModeSwitch::Toggle => {
                self.mode = self.mode.flipped();
                debug!(mode = ?self.mode, "mode toggled");
            }
            ModeSwitch::Subtype => {
                debug!("toggle trigger under subtype strategy; awaiting platform notification");
            }
        }
        self.announce(true);
    }

    /// External subtype notification: the language tag decides the mode.
    pub fn set_mode_from_subtype(&mut self, language_tag: &str) {
        self.mode = if language_tag == SCRIPT_LANGUAGE_TAG {
            InputMode::Script
        } else {
            InputMode::Latin
        };
        debug!(mode = ?self.mode, %language_tag, "mode set from subtype");
        self.announce(true);
    }

    /// Refresh the status icon without a transient message (session start).
    pub fn refresh_display(&mut self) {
        self.announce(false);
    }

    pub fn apply_config(&mut self, display: &DisplayConfig) {
        self.show_icon = display.status_icon;
        self.show_message = display.transient_message;
        self.message_denied = false;
        if !self.show_icon {
            self.status.hide_mode_icon();
        }
    }

    fn announce(&mut self, with_message: bool) {
        if self.show_icon {
            self.status.show_mode_icon(self.mode);
        }
        if with_message && self.show_message && !self.message_denied {
            // A denied channel stays off until the next config apply.
            if !self.status.show_mode_message(self.mode) {
                self.message_denied = true;
            }
        }
    }
}
