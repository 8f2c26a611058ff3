//! Static layout tables: Latin remaps and script-layout key membership.

use serde::Deserialize;

/// Alternate Latin layout applied while in Latin mode.
///
/// Remapping consults the lower-case table, then the upper-case table, then
/// falls back to the input character unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LatinLayout {
    #[serde(rename = "q")]
    Qwerty,
    #[serde(rename = "c")]
    Colemak,
    #[serde(rename = "d")]
    Dvorak,
}

const COLEMAK_LOWER: &[(char, char)] = &[
    ('q', 'q'), ('w', 'w'), ('e', 'f'), ('r', 'p'), ('t', 'g'),
    ('y', 'j'), ('u', 'l'), ('i', 'u'), ('o', 'y'), ('p', ';'),
    ('a', 'a'), ('s', 'r'), ('d', 's'), ('f', 't'), ('g', 'd'),
    ('h', 'h'), ('j', 'n'), ('k', 'e'), ('l', 'i'), (';', 'o'),
    ('z', 'z'), ('x', 'x'), ('c', 'c'), ('v', 'v'), ('b', 'b'),
    ('n', 'k'), ('m', 'm'),
];

const COLEMAK_UPPER: &[(char, char)] = &[
    ('Q', 'Q'), ('W', 'W'), ('E', 'F'), ('R', 'P'), ('T', 'G'),
    ('Y', 'J'), ('U', 'L'), ('I', 'U'), ('O', 'Y'), ('P', ':'),
    ('A', 'A'), ('S', 'R'), ('D', 'S'), ('F', 'T'), ('G', 'D'),
    ('H', 'H'), ('J', 'N'), ('K', 'E'), ('L', 'I'), (':', 'O'),
    ('Z', 'Z'), ('X', 'X'), ('C', 'C'), ('V', 'V'), ('B', 'B'),
    ('N', 'K'), ('M', 'M'),
];

const DVORAK_LOWER: &[(char, char)] = &[
    ('q', '\''), ('w', ','), ('e', '.'), ('r', 'p'), ('t', 'y'),
    ('y', 'f'), ('u', 'g'), ('i', 'c'), ('o', 'r'), ('p', 'l'),
    ('a', 'a'), ('s', 'o'), ('d', 'e'), ('f', 'u'), ('g', 'i'),
    ('h', 'd'), ('j', 'h'), ('k', 't'), ('l', 'n'), ('n', ';'),
    ('z', '/'), ('x', 'q'), ('c', 'j'), ('v', 'k'), ('b', 'x'),
    ('m', 'w'), (',', 'v'), ('.', 'z'), ('/', '/'),
];

const DVORAK_UPPER: &[(char, char)] = &[
    ('Q', '"'), ('W', '<'), ('E', '>'), ('R', 'P'), ('T', 'Y'),
    ('Y', 'F'), ('U', 'G'), ('I', 'C'), ('O', 'R'), ('P', 'L'),
    ('A', 'A'), ('S', 'O'), ('D', 'E'), ('F', 'U'), ('G', 'I'),
    ('H', 'D'), ('J', 'H'), ('K', 'T'), ('L', 'N'), ('N', ':'),
    ('Z', '?'), ('X', 'Q'), ('C', 'J'), ('V', 'K'), ('B', 'X'),
    ('M', 'W'), ('<', 'V'), ('>', 'Z'), ('?', '?'),
];

fn table_get(table: &[(char, char)], ch: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == ch).map(|(_, to)| *to)
}

impl LatinLayout {
    /// True for the identity (QWERTY) layout, which routes as passthrough.
    pub fn is_identity(self) -> bool {
        self == Self::Qwerty
    }

    /// Remap a printable character: lower-case table, then upper-case table,
    /// then identity.
    pub fn remap(self, ch: char) -> char {
        let (lower, upper) = match self {
            Self::Qwerty => return ch,
            Self::Colemak => (COLEMAK_LOWER, COLEMAK_UPPER),
            Self::Dvorak => (DVORAK_LOWER, DVORAK_UPPER),
        };
        table_get(lower, ch)
            .or_else(|| table_get(upper, ch))
            .unwrap_or(ch)
    }
}

/// Hangul keyboard layout driven by the composition engine.
///
/// The router only needs the layout's id (forwarded to the engine) and its
/// key set: a character outside the set can never extend a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ScriptLayout {
    #[serde(rename = "2")]
    Dubeolsik,
    #[serde(rename = "2y")]
    DubeolsikYetgeul,
    #[serde(rename = "39")]
    Sebeolsik390,
    #[serde(rename = "3f")]
    SebeolsikFinal,
    #[serde(rename = "3s")]
    SebeolsikNoShift,
    #[serde(rename = "3y")]
    SebeolsikYetgeul,
    #[serde(rename = "32")]
    Sebeolsik2Bul,
    #[serde(rename = "ahn")]
    Ahnmatae,
    #[serde(rename = "ro")]
    Romaja,
}

impl ScriptLayout {
    /// Engine-facing layout id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Dubeolsik => "2",
            Self::DubeolsikYetgeul => "2y",
            Self::Sebeolsik390 => "39",
            Self::SebeolsikFinal => "3f",
            Self::SebeolsikNoShift => "3s",
            Self::SebeolsikYetgeul => "3y",
            Self::Sebeolsik2Bul => "32",
            Self::Ahnmatae => "ahn",
            Self::Romaja => "ro",
        }
    }

    // Keys beyond the letter rows, for the layouts that use number and
    // punctuation positions.
    fn extra_keys(self) -> &'static str {
        match self {
            Self::Dubeolsik
            | Self::DubeolsikYetgeul
            | Self::Sebeolsik2Bul
            | Self::Ahnmatae
            | Self::Romaja => "",
            Self::SebeolsikFinal => "~!@#$%^&*()_`1234567890-={}|[]\\:\";'<>?/",
            Self::Sebeolsik390 => "!1234567890;'<>/",
            Self::SebeolsikNoShift => "1234567890-=[]\\;<>/",
            Self::SebeolsikYetgeul => "~!@^`1234567890;'<>/",
        }
    }

    /// Whether `ch` is on a key position this layout maps.
    pub fn uses_key(self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || self.extra_keys().contains(ch)
    }
}
