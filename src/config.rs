//! Configuration snapshots.
//!
//! A [`Config`] is an immutable snapshot of every routing-relevant option,
//! parsed from TOML. The router owns the current snapshot and replaces it
//! wholesale between key events; no routing step ever observes a partial
//! update. When the source fails, the embedded defaults are substituted.

use serde::Deserialize;

use crate::candidates::CandidateStyle;
use crate::layout::{LatinLayout, ScriptLayout};
use crate::mode::ModeSwitch;

pub const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("configuration source unavailable: {0}")]
    Unavailable(String),
}

/// Resolved configuration snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub engine: EngineOptions,
    pub triggers: TriggerConfig,
    pub display: DisplayConfig,
    pub mode: ModeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutConfig {
    pub latin: LatinLayout,
    pub script: ScriptLayout,
}

/// Composition options forwarded verbatim to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EngineOptions {
    pub auto_reorder: bool,
    pub combi_double_stroke: bool,
    pub non_choseong_combi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TriggerConfig {
    pub escape_to_latin: bool,
    pub left_shift_space_toggle: bool,
    pub right_alt_toggle: bool,
    pub right_shift_space_candidates: bool,
    pub right_ctrl_candidates: bool,
    pub ctrl_number_to_function: bool,
    pub ctrl_grave_to_escape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DisplayConfig {
    pub candidate_style: CandidateStyle,
    pub status_icon: bool,
    pub transient_message: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModeConfig {
    pub switch: ModeSwitch,
}

impl Config {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig {
                latin: LatinLayout::Qwerty,
                script: ScriptLayout::Dubeolsik,
            },
            engine: EngineOptions {
                auto_reorder: true,
                combi_double_stroke: true,
                non_choseong_combi: true,
            },
            triggers: TriggerConfig {
                escape_to_latin: true,
                left_shift_space_toggle: true,
                right_alt_toggle: true,
                right_shift_space_candidates: true,
                right_ctrl_candidates: true,
                ctrl_number_to_function: false,
                ctrl_grave_to_escape: false,
            },
            display: DisplayConfig {
                candidate_style: CandidateStyle::Inline,
                status_icon: true,
                transient_message: false,
            },
            mode: ModeConfig {
                switch: ModeSwitch::Toggle,
            },
        }
    }
}

/// Supplier of configuration snapshots.
///
/// Change notification is the embedder's responsibility: on a store change it
/// marshals onto the event thread and calls `KeyRouter::reload_config`, which
/// pulls a fresh snapshot from here.
pub trait ConfigSource {
    fn snapshot(&self) -> Result<Config, ConfigError>;
}

/// Source that always yields the built-in defaults.
#[derive(Debug, Default)]
pub struct BuiltinDefaults;

impl ConfigSource for BuiltinDefaults {
    fn snapshot(&self) -> Result<Config, ConfigError> {
        Ok(Config::default())
    }
}
