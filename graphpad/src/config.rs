//! Editor tunables and input bindings.

use crate::error::ConfigError;
use crate::interaction::Intent;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl ModifierKey {
    pub fn name(self) -> &'static str {
        match self {
            ModifierKey::Shift => "shift",
            ModifierKey::Ctrl => "ctrl",
            ModifierKey::Alt => "alt",
            ModifierKey::Meta => "meta",
        }
    }
}

/// Modifier keys held during a pointer press, as detected by the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };

    /// Bit layout: 1 shift, 2 ctrl, 4 alt, 8 meta.
    pub fn from_bits(bits: u8) -> Self {
        Modifiers {
            shift: bits & 1 != 0,
            ctrl: bits & 2 != 0,
            alt: bits & 4 != 0,
            meta: bits & 8 != 0,
        }
    }

    pub fn only(key: ModifierKey) -> Self {
        let mut m = Modifiers::NONE;
        match key {
            ModifierKey::Shift => m.shift = true,
            ModifierKey::Ctrl => m.ctrl = true,
            ModifierKey::Alt => m.alt = true,
            ModifierKey::Meta => m.meta = true,
        }
        m
    }

    pub fn has(self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hit radius of a node, in canvas units.
    pub node_radius: f64,
    /// Max pointer travel for a press/release pair to still count as a click.
    pub click_distance: f64,
    pub edge_pick_tolerance: f64,
    pub connect_modifier: ModifierKey,
    pub edit_modifier: ModifierKey,
    pub delete_keys: Vec<String>,
    pub commit_keys: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            node_radius: 50.0,
            click_distance: 5.0,
            edge_pick_tolerance: 6.0,
            connect_modifier: ModifierKey::Shift,
            edit_modifier: ModifierKey::Alt,
            delete_keys: vec!["Backspace".into(), "Delete".into()],
            commit_keys: vec!["Enter".into()],
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (param, got) in [
            ("node_radius", self.node_radius),
            ("click_distance", self.click_distance),
            ("edge_pick_tolerance", self.edge_pick_tolerance),
        ] {
            if !got.is_finite() || got < 0.0 {
                return Err(ConfigError::InvalidDistance { param, got });
            }
        }
        if self.connect_modifier == self.edit_modifier {
            return Err(ConfigError::SharedModifier {
                key: self.connect_modifier.name(),
            });
        }
        Ok(())
    }

    /// Interprets the modifiers of a press. Connect takes precedence when
    /// both bound keys are held.
    pub fn intent(&self, mods: Modifiers) -> Intent {
        if mods.has(self.connect_modifier) {
            Intent::Connect
        } else if mods.has(self.edit_modifier) {
            Intent::Edit
        } else {
            Intent::Plain
        }
    }

    pub fn is_delete_key(&self, key: &str) -> bool {
        self.delete_keys.iter().any(|k| k == key)
    }

    pub fn is_commit_key(&self, key: &str) -> bool {
        self.commit_keys.iter().any(|k| k == key)
    }
}
