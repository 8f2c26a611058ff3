use bitflags::bitflags;

// Android key codes, as delivered by the platform key-event stream.
pub mod keycode {
    pub const DIGIT_0: u16 = 7;
    pub const DIGIT_1: u16 = 8;
    pub const DIGIT_9: u16 = 16;
    pub const DPAD_UP: u16 = 19;
    pub const DPAD_DOWN: u16 = 20;
    pub const DPAD_LEFT: u16 = 21;
    pub const DPAD_RIGHT: u16 = 22;
    pub const ALT_RIGHT: u16 = 58;
    pub const SHIFT_LEFT: u16 = 59;
    pub const SHIFT_RIGHT: u16 = 60;
    pub const SPACE: u16 = 62;
    pub const DEL: u16 = 67;
    pub const GRAVE: u16 = 68;
    pub const MINUS: u16 = 69;
    pub const EQUALS: u16 = 70;
    pub const ESCAPE: u16 = 111;
    pub const CTRL_RIGHT: u16 = 114;
    pub const F1: u16 = 131;
    pub const F10: u16 = 140;
    pub const F11: u16 = 141;
    pub const F12: u16 = 142;
}

bitflags! {
    /// Modifier keys held during a key event.
    ///
    /// Left and right variants are kept distinct because the chorded
    /// triggers (left-shift+space vs right-shift+space) depend on the side.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const SHIFT_LEFT  = 1 << 0;
        const SHIFT_RIGHT = 1 << 1;
        const CTRL_LEFT   = 1 << 2;
        const CTRL_RIGHT  = 1 << 3;
        const ALT_LEFT    = 1 << 4;
        const ALT_RIGHT   = 1 << 5;
        const META        = 1 << 6;
    }
}

impl Modifiers {
    pub const SHIFT: Self = Self::SHIFT_LEFT.union(Self::SHIFT_RIGHT);
    pub const CTRL: Self = Self::CTRL_LEFT.union(Self::CTRL_RIGHT);
    pub const ALT: Self = Self::ALT_LEFT.union(Self::ALT_RIGHT);

    pub fn shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.intersects(Self::CTRL)
    }

    pub fn alt(self) -> bool {
        self.intersects(Self::ALT)
    }

    pub fn meta(self) -> bool {
        self.intersects(Self::META)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// One platform key event. Consumed once per routing decision and never
/// stored beyond the current routing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: u16,
    /// The printable character this event would insert, if any. `None` for
    /// control and navigation chords.
    pub unicode: Option<char>,
    pub mods: Modifiers,
    pub down_time: u64,
    pub event_time: u64,
    pub repeat: u32,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn down(key_code: u16, unicode: Option<char>, mods: Modifiers) -> Self {
        Self {
            key_code,
            unicode,
            mods,
            down_time: 0,
            event_time: 0,
            repeat: 0,
            action: KeyAction::Down,
        }
    }

    pub fn up(key_code: u16) -> Self {
        Self {
            key_code,
            unicode: None,
            mods: Modifiers::empty(),
            down_time: 0,
            event_time: 0,
            repeat: 0,
            action: KeyAction::Up,
        }
    }
}

/// Routing outcome for one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the platform's default handling run.
    Passthrough,
    /// Event fully handled; nothing further for the platform to do.
    Consumed,
    /// Event handled by committing this text to the surface.
    Commit(String),
}
