//! High score and settings persistence
//!
//! Two keys in a string key-value store:
//! - `snake_highscore`: decimal integer
//! - `snake_settings`: JSON object (see [`Settings`])
//!
//! Read failures fall back to defaults; write failures are logged.

use std::rc::Rc;

use crate::platform::{KeyValueStore, StorageError};
use crate::settings::Settings;

pub const HIGH_SCORE_KEY: &str = "snake_highscore";
pub const SETTINGS_KEY: &str = "snake_settings";

/// Typed access to the persisted high score and settings
#[derive(Clone)]
pub struct StorageManager {
    store: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager").finish_non_exhaustive()
    }
}

impl StorageManager {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored high score, 0 if missing or unreadable
    pub fn high_score(&self) -> u64 {
        match self.store.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                0
            }
        }
    }

    /// Persist `score` only if it beats the stored high score
    pub fn save_high_score(&self, score: u64) {
        if score <= self.high_score() {
            return;
        }
        match self.store.set_item(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New high score saved: {}", score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }

    /// Stored settings, defaults if missing or corrupt
    pub fn settings(&self) -> Settings {
        match self.store.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => Settings::from_json(&json),
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("Failed to read settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) {
        match self.try_save_settings(settings) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    fn try_save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)?;
        self.store.set_item(SETTINGS_KEY, &json)
    }

    /// Load, modify and store settings in one step. Returns the new settings.
    pub fn update_settings<F>(&self, f: F) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings();
        f(&mut settings);
        self.save_settings(&settings);
        settings
    }
}
