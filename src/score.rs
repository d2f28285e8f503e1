//! Score tracking
//!
//! The high score is persisted through [`StorageManager`] whenever the
//! running score strictly beats it.

use crate::persistence::StorageManager;

#[derive(Debug, Clone)]
pub struct ScoreManager {
    storage: StorageManager,
    current_score: u64,
    high_score: u64,
}

impl ScoreManager {
    pub fn new(storage: StorageManager) -> Self {
        let high_score = storage.high_score();
        Self {
            storage,
            current_score: 0,
            high_score,
        }
    }

    pub fn current_score(&self) -> u64 {
        self.current_score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn add_points(&mut self, points: u64) {
        self.current_score += points;
        if self.current_score > self.high_score {
            self.high_score = self.current_score;
            self.storage.save_high_score(self.high_score);
        }
    }

    /// Zero the running score and re-read the stored high score
    pub fn reset(&mut self) {
        self.current_score = 0;
        self.high_score = self.storage.high_score();
    }
}
