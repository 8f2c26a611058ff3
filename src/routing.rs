//! Per-event routing rules.

use tracing::debug_span;

use crate::mode::InputMode;
use crate::types::{keycode, Decision, KeyEvent, Modifiers};
use crate::KeyRouter;

impl KeyRouter {
    /// Route one key-down event. Rules are evaluated in order; the first
    /// match wins.
    pub fn route(&mut self, event: &KeyEvent) -> Decision {
        let _span = debug_span!("route", key_code = event.key_code).entered();

        // Escape clears back to Latin mode, but the key itself always
        // reaches the platform's default handling.
        if event.key_code == keycode::ESCAPE && event.mods.is_empty() {
            if self.config().triggers.escape_to_latin && self.current_mode() == InputMode::Script
            {
                self.force_commit();
                self.switch_mode();
            }
            return Decision::Passthrough;
        }

        // Mode toggle fires regardless of the current mode.
        if self.is_toggle_trigger(event) {
            self.force_commit();
            self.switch_mode();
            return Decision::Consumed;
        }

        // Configured chord translations (Ctrl+Grave → Escape,
        // Ctrl+number → function keys). Unmapped chords fall through.
        if let Some(translated) = self.translate_chord(event) {
            self.surface.send_raw_key(translated);
            return Decision::Consumed;
        }

        if self.current_mode() == InputMode::Latin {
            let layout = self.config().layout.latin;
            if layout.is_identity() {
                return Decision::Passthrough;
            }
            if let Some(ch) = event.unicode {
                let text = layout.remap(ch).to_string();
                self.surface.commit_text(&text);
                return Decision::Commit(text);
            }
            return Decision::Passthrough;
        }

        // Script mode from here on.

        // Chorded shortcut over a printable key: the platform must see it
        // against a committed baseline.
        if (event.mods.ctrl() || event.mods.alt() || event.mods.meta()) && event.unicode.is_some()
        {
            self.force_commit();
            return Decision::Passthrough;
        }

        if self.is_candidate_trigger(event) {
            self.candidates.open(&self.engine, &*self.surface);
            return Decision::Consumed;
        }

        if event.key_code == keycode::DEL {
            if self.engine.backspace() {
                self.update_composing();
                if self.engine.is_empty() {
                    // Nothing was composing anymore; the platform performs
                    // the actual character deletion.
                    self.engine.reset();
                    return Decision::Passthrough;
                }
                return Decision::Consumed;
            }
            return Decision::Passthrough;
        }

        if let Some(ch) = event.unicode {
            // Keys outside the active layout's set can never extend the
            // composition; skip the engine round-trip.
            if !self.config().layout.script.uses_key(ch) {
                self.force_commit();
                return Decision::Passthrough;
            }
            if self.engine.feed(ch as i32) {
                self.update_composing();
                return Decision::Consumed;
            }
            // Rejected: re-run the key against a clean baseline.
            self.force_commit();
            return Decision::Passthrough;
        }

        // Navigation and function keys must not leave stale preedit behind.
        // A bare Shift down is half of an upcoming keystroke and leaves the
        // composition alone.
        if !event.mods.shift() {
            self.force_commit();
        }
        Decision::Passthrough
    }

    /// Route one key-up event. Only the arrow keys matter: the cursor is
    /// about to move outside the composition's span, so a non-empty
    /// composition is committed.
    pub fn route_up(&mut self, event: &KeyEvent) -> Decision {
        let arrow = matches!(
            event.key_code,
            keycode::DPAD_LEFT | keycode::DPAD_RIGHT | keycode::DPAD_UP | keycode::DPAD_DOWN
        );
        if arrow && !self.engine.is_empty() {
            self.force_commit();
        }
        Decision::Passthrough
    }

    fn is_toggle_trigger(&self, event: &KeyEvent) -> bool {
        let t = &self.config().triggers;
        (t.right_alt_toggle
            && event.key_code == keycode::ALT_RIGHT
            && modifier_only(event, Modifiers::ALT_RIGHT))
            || (t.left_shift_space_toggle
                && event.key_code == keycode::SPACE
                && event.mods == Modifiers::SHIFT_LEFT)
    }

    fn is_candidate_trigger(&self, event: &KeyEvent) -> bool {
        let t = &self.config().triggers;
        (t.right_ctrl_candidates
            && event.key_code == keycode::CTRL_RIGHT
            && modifier_only(event, Modifiers::CTRL_RIGHT))
            || (t.right_shift_space_candidates
                && event.key_code == keycode::SPACE
                && event.mods == Modifiers::SHIFT_RIGHT)
    }

    /// Apply a configured modifier translation, producing the synthesized
    /// event to resend with the triggering modifier cleared.
    fn translate_chord(&self, event: &KeyEvent) -> Option<KeyEvent> {
        if !event.mods.ctrl() {
            return None;
        }
        let t = &self.config().triggers;
        let key_code = if t.ctrl_grave_to_escape && event.key_code == keycode::GRAVE {
            keycode::ESCAPE
        } else if t.ctrl_number_to_function {
            function_key_for(event.key_code)?
        } else {
            return None;
        };

        let mut mods = event.mods;
        mods.remove(Modifiers::CTRL);
        Some(KeyEvent {
            key_code,
            unicode: None,
            mods,
            ..event.clone()
        })
    }
}

/// True when the event carries no modifiers beyond what the trigger key
/// itself asserts.
fn modifier_only(event: &KeyEvent, own: Modifiers) -> bool {
    event.mods.difference(own).is_empty()
}

fn function_key_for(key_code: u16) -> Option<u16> {
    match key_code {
        keycode::DIGIT_1..=keycode::DIGIT_9 => Some(keycode::F1 + (key_code - keycode::DIGIT_1)),
        keycode::DIGIT_0 => Some(keycode::F10),
        keycode::MINUS => Some(keycode::F11),
        keycode::EQUALS => Some(keycode::F12),
        _ => None,
    }
}
