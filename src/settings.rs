//! Player settings and preferences
//!
//! Persisted as a JSON object in storage. Every field is optional on load;
//! missing fields take their defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Difficulty levels (scale the tick interval at game start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tick interval multiplier (higher = slower)
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.2,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects on
    pub sound: bool,
    /// Haptic feedback on
    pub vibration: bool,
    pub difficulty: Difficulty,
    /// Swipe threshold in pixels
    pub sensitivity: u32,
    pub theme: Theme,
}

/// Default swipe threshold
pub const DEFAULT_SENSITIVITY: u32 = 30;

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            vibration: true,
            difficulty: Difficulty::Normal,
            sensitivity: DEFAULT_SENSITIVITY,
            theme: Theme::Dark,
        }
    }
}

impl Settings {
    /// Parse stored JSON. Corrupt JSON gives the defaults; a field with the
    /// wrong type only resets that field.
    pub fn from_json(json: &str) -> Self {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to parse settings: {}", e);
                return Self::default();
            }
        };
        let Some(fields) = value.as_object() else {
            log::warn!("Stored settings are not an object, using defaults");
            return Self::default();
        };

        let mut settings = Self::default();
        if let Some(sound) = field(fields, "sound") {
            settings.sound = sound;
        }
        if let Some(vibration) = field(fields, "vibration") {
            settings.vibration = vibration;
        }
        if let Some(difficulty) = field(fields, "difficulty") {
            settings.difficulty = difficulty;
        }
        // Slider values may be stored as fractional numbers
        if let Some(sensitivity) = fields
            .get("sensitivity")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite() && *v >= 0.0)
        {
            settings.sensitivity = sensitivity as u32;
        }
        if let Some(theme) = field(fields, "theme") {
            settings.theme = theme;
        }
        settings
    }
}

fn field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key)?;
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring stored setting {}: {}", key, e);
            None
        }
    }
}
