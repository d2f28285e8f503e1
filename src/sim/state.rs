//! Game phase and change notification

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Title screen, nothing ticking
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

impl GamePhase {
    pub const ALL: [GamePhase; 4] = [
        GamePhase::Idle,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::GameOver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == name)
    }
}

/// Handle returned by [`StateManager::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(GamePhase)>;

/// Owns the current phase and fans out changes to listeners synchronously
pub struct StateManager {
    current: GamePhase,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            current: GamePhase::Idle,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub fn current(&self) -> GamePhase {
        self.current
    }

    /// Switch phase and notify listeners. Returns false (and notifies no one)
    /// if the phase is unchanged.
    pub fn set_state(&mut self, phase: GamePhase) -> bool {
        if phase == self.current {
            return false;
        }
        log::debug!("Phase {} -> {}", self.current.as_str(), phase.as_str());
        self.current = phase;
        for (_, listener) in self.listeners.iter_mut() {
            listener(phase);
        }
        true
    }

    /// Switch phase by name; unknown names are logged and ignored
    pub fn set_state_named(&mut self, name: &str) -> bool {
        match GamePhase::from_name(name) {
            Some(phase) => self.set_state(phase),
            None => {
                log::warn!("Invalid state: {}", name);
                false
            }
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(GamePhase) + 'static,
    {
        let sub = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((sub, Box::new(listener)));
        sub
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != sub);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(manager: &mut StateManager) -> (Subscription, Rc<RefCell<Vec<GamePhase>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = manager.subscribe(move |phase| sink.borrow_mut().push(phase));
        (sub, seen)
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(StateManager::new().current(), GamePhase::Idle);
    }

    #[test]
    fn test_set_state_notifies() {
        let mut manager = StateManager::new();
        let (_, seen) = recorder(&mut manager);

        assert!(manager.set_state(GamePhase::Playing));
        assert_eq!(manager.current(), GamePhase::Playing);
        assert_eq!(*seen.borrow(), vec![GamePhase::Playing]);
    }

    #[test]
    fn test_same_state_is_silent() {
        let mut manager = StateManager::new();
        let (_, seen) = recorder(&mut manager);

        assert!(!manager.set_state(GamePhase::Idle));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_invalid_name_is_ignored() {
        let mut manager = StateManager::new();
        let (_, seen) = recorder(&mut manager);

        assert!(!manager.set_state_named("flying"));
        assert_eq!(manager.current(), GamePhase::Idle);
        assert!(seen.borrow().is_empty());

        assert!(manager.set_state_named("gameover"));
        assert_eq!(manager.current(), GamePhase::GameOver);
    }

    #[test]
    fn test_unsubscribe() {
        let mut manager = StateManager::new();
        let (sub, seen) = recorder(&mut manager);
        let (_, other) = recorder(&mut manager);

        assert!(manager.unsubscribe(sub));
        assert!(!manager.unsubscribe(sub));

        manager.set_state(GamePhase::Paused);
        assert!(seen.borrow().is_empty());
        assert_eq!(*other.borrow(), vec![GamePhase::Paused]);
    }

    #[test]
    fn test_phase_names_round_trip() {
        for phase in GamePhase::ALL {
            assert_eq!(GamePhase::from_name(phase.as_str()), Some(phase));
        }
    }
}
