//! Snake Reborn entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Which DOM overlays each phase shows
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod screens {
    use snake_reborn::sim::GamePhase;

    /// Every overlay a phase change may hide
    pub const ALL: [&str; 6] = [
        "start-screen",
        "settings-screen",
        "hud",
        "pause-screen",
        "gameover-screen",
        "boost-btn",
    ];

    pub fn visible(phase: GamePhase) -> &'static [&'static str] {
        match phase {
            GamePhase::Idle => &["start-screen"],
            GamePhase::Playing => &["hud", "boost-btn"],
            GamePhase::Paused => &["hud", "pause-screen"],
            GamePhase::GameOver => &["gameover-screen"],
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_settings_screen_closes_on_any_phase() {
            assert!(ALL.contains(&"settings-screen"));
            for phase in GamePhase::ALL {
                assert!(!visible(phase).contains(&"settings-screen"));
            }
        }

        #[test]
        fn test_visible_screens_are_known() {
            for phase in GamePhase::ALL {
                assert!(!visible(phase).is_empty());
                for id in visible(phase) {
                    assert!(ALL.contains(id), "{} not in ALL", id);
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use snake_reborn::audio::{HapticAudio, Haptics, NavigatorHaptics, SoundPlayer, WebAudioPlayer};
    use snake_reborn::persistence::StorageManager;
    use snake_reborn::platform::{InputManager, KeyValueStore, LocalStorage, MemoryStorage};
    use snake_reborn::renderer::CanvasSurface;
    use snake_reborn::sim::{GameContext, GameEngine, GamePhase, StateManager};
    use snake_reborn::{Difficulty, GameConfig, ScoreManager, Settings, Theme};

    use super::screens;

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        surface: Option<CanvasSurface>,
        storage: StorageManager,
        /// Shared with the haptic audio wrapper inside the engine
        haptics_enabled: Rc<Cell<bool>>,
        last_time: f64,
        /// Set by the phase listener, consumed by the frame loop
        pending_phase: Rc<Cell<Option<GamePhase>>>,
    }

    impl Game {
        /// Flip sound on/off and persist it
        fn toggle_sound(&mut self) -> Settings {
            let audio = self.engine.audio_mut();
            audio.toggle_mute();
            let sound = !audio.is_muted();
            self.storage.update_settings(|s| s.sound = sound)
        }

        fn toggle_vibration(&mut self) -> Settings {
            let settings = self.storage.update_settings(|s| s.vibration = !s.vibration);
            self.haptics_enabled.set(settings.vibration);
            settings
        }

        fn toggle_theme(&mut self) -> Settings {
            let settings = self.storage.update_settings(|s| s.theme = s.theme.toggled());
            apply_theme(settings.theme);
            settings
        }

        fn set_difficulty(&mut self, difficulty: Difficulty) -> Settings {
            self.engine.set_difficulty(difficulty.multiplier());
            self.storage.update_settings(|s| s.difficulty = difficulty)
        }

        /// Run simulation and draw one frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.engine.update(dt);
            if let Some(surface) = self.surface.as_mut() {
                self.engine.render(surface);
            }

            let document = current_document();
            if let Some(phase) = self.pending_phase.take() {
                apply_phase(&document, phase, self.engine.score());
            }
            if self.engine.phase() == GamePhase::Playing {
                if let Some(el) = document.get_element_by_id("current-score") {
                    el.set_text_content(Some(&self.engine.score().current_score().to_string()));
                }
            }
        }
    }

    fn current_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            if visible {
                let _ = classes.remove_1("hidden");
                let _ = classes.add_1("active");
            } else {
                let _ = classes.add_1("hidden");
                let _ = classes.remove_1("active");
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Show the screens belonging to a phase, hide the rest
    fn apply_phase(document: &Document, phase: GamePhase, score: &ScoreManager) {
        let visible = screens::visible(phase);
        for id in screens::ALL {
            set_visible(document, id, visible.contains(&id));
        }

        match phase {
            GamePhase::Idle => {
                set_text(document, "start-high-score", &score.high_score().to_string());
            }
            GamePhase::GameOver => {
                set_text(document, "final-score", &score.current_score().to_string());
                set_text(document, "final-high-score", &score.high_score().to_string());
            }
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    fn apply_theme(theme: Theme) {
        if let Some(body) = current_document().body() {
            let _ = match theme {
                Theme::Light => body.class_list().add_1("light-theme"),
                Theme::Dark => body.class_list().remove_1("light-theme"),
            };
        }
    }

    fn set_toggle(document: &Document, id: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(if on { "ON" } else { "OFF" }));
            let _ = if on {
                el.class_list().add_1("active")
            } else {
                el.class_list().remove_1("active")
            };
        }
    }

    fn update_settings_ui(settings: &Settings) {
        let document = current_document();
        set_toggle(&document, "toggle-sound", settings.sound);
        set_toggle(&document, "toggle-vibration", settings.vibration);
        set_text(
            &document,
            "toggle-theme",
            match settings.theme {
                Theme::Light => "LIGHT",
                Theme::Dark => "DARK",
            },
        );

        for btn in difficulty_buttons(&document) {
            let active = btn.get_attribute("data-diff").as_deref() == Some(settings.difficulty.as_str());
            let _ = if active {
                btn.class_list().add_1("active")
            } else {
                btn.class_list().remove_1("active")
            };
        }

        if let Some(slider) = document
            .get_element_by_id("sensitivity-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            slider.set_value(&settings.sensitivity.to_string());
        }
        set_text(&document, "sensitivity-value", &settings.sensitivity.to_string());
    }

    fn difficulty_buttons(document: &Document) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(".difficulty-btn") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn on_event<F>(target: &web_sys::EventTarget, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click<F>(document: &Document, id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        if let Some(el) = document.get_element_by_id(id) {
            on_event(&el, "click", move |_event| handler());
        }
    }

    fn open_storage() -> StorageManager {
        let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(store) => Rc::new(store),
            Err(e) => {
                log::warn!("{} - settings will not persist", e);
                Rc::new(MemoryStorage::new())
            }
        };
        StorageManager::new(store)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snake Reborn starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the backing store to device pixels
        let dpr = window.device_pixel_ratio();
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(400.0)
            * dpr;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0)
            * dpr;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let storage = open_storage();
        let settings = storage.settings();
        log::info!("Loaded settings: {:?}", settings);

        // Audio with haptics layered on top
        let mut audio = HapticAudio::new(WebAudioPlayer::new(), NavigatorHaptics, settings.vibration);
        let haptics_enabled = audio.enabled_handle();
        if !settings.sound {
            audio.set_muted(true);
        }

        let pending_phase = Rc::new(Cell::new(Some(GamePhase::Idle)));
        let mut state = StateManager::new();
        {
            let pending = pending_phase.clone();
            state.subscribe(move |phase| {
                log::info!("Phase: {}", phase.as_str());
                pending.set(Some(phase));
            });
        }

        let ctx = GameContext::new(state, ScoreManager::new(storage.clone()), Box::new(audio));
        let config = GameConfig::from_canvas(width as i32, height as i32);
        let seed = js_sys::Date::now() as u64;
        let mut engine = GameEngine::new(config, ctx, seed);
        engine.set_difficulty(settings.difficulty.multiplier());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            engine,
            surface: CanvasSurface::from_canvas(&canvas),
            storage,
            haptics_enabled,
            last_time: 0.0,
            pending_phase,
        }));

        apply_theme(settings.theme);
        update_settings_ui(&settings);

        let input = Rc::new(RefCell::new(InputManager::new()));
        {
            let mut input = input.borrow_mut();
            input.set_sensitivity(settings.sensitivity);
            let game = game.clone();
            input.on_direction(move |dir| game.borrow_mut().engine.handle_direction(dir));
        }

        setup_input_handlers(&window, game.clone(), input.clone());
        setup_boost_button(&document, game.clone());
        setup_menu_buttons(&document, game.clone());
        setup_settings(&document, game.clone(), input);
        setup_auto_pause(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Snake Reborn running!");
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
        input: Rc<RefCell<InputManager>>,
    ) {
        // Keyboard
        {
            let input = input.clone();
            on_event(window, "keydown", move |event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if input.borrow_mut().handle_key(&key).is_some() {
                    return;
                }
                if matches!(key.as_str(), "Escape" | "p" | "P") {
                    game.borrow_mut().engine.pause();
                }
            });
        }

        // Swipes
        {
            let input = input.clone();
            on_event(window, "touchstart", move |event| {
                let Ok(event) = event.dyn_into::<TouchEvent>() else {
                    return;
                };
                if let Some(touch) = event.touches().get(0) {
                    input
                        .borrow_mut()
                        .touch_start(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
        }
        on_event(window, "touchend", move |event| {
            let Ok(event) = event.dyn_into::<TouchEvent>() else {
                return;
            };
            if let Some(touch) = event.changed_touches().get(0) {
                input
                    .borrow_mut()
                    .touch_end(touch.client_x() as f32, touch.client_y() as f32);
            }
        });
    }

    fn setup_boost_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("boost-btn") else {
            return;
        };

        for event in ["mousedown", "touchstart"] {
            let game = game.clone();
            on_event(&btn, event, move |event| {
                if event.cancelable() {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if g.haptics_enabled.get() {
                    NavigatorHaptics.vibrate(10);
                }
                g.engine.activate_boost();
            });
        }

        for event in ["mouseup", "mouseleave", "touchend"] {
            let game = game.clone();
            on_event(&btn, event, move |event| {
                if event.cancelable() {
                    event.prevent_default();
                }
                game.borrow_mut().engine.deactivate_boost();
            });
        }
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "start-btn", move || game.borrow_mut().engine.start());
        }
        {
            let game = game.clone();
            on_click(document, "restart-btn", move || game.borrow_mut().engine.start());
        }
        {
            let game = game.clone();
            on_click(document, "pause-btn", move || game.borrow_mut().engine.pause());
        }
        {
            let game = game.clone();
            on_click(document, "resume-btn", move || game.borrow_mut().engine.pause());
        }
        on_click(document, "home-btn", move || game.borrow_mut().engine.go_home());

        on_click(document, "settings-btn", || {
            let document = current_document();
            set_visible(&document, "start-screen", false);
            set_visible(&document, "settings-screen", true);
        });
        on_click(document, "settings-back-btn", || {
            let document = current_document();
            set_visible(&document, "settings-screen", false);
            set_visible(&document, "start-screen", true);
        });
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>, input: Rc<RefCell<InputManager>>) {
        {
            let game = game.clone();
            on_click(document, "toggle-sound", move || {
                let settings = game.borrow_mut().toggle_sound();
                update_settings_ui(&settings);
            });
        }
        {
            let game = game.clone();
            on_click(document, "toggle-vibration", move || {
                let settings = game.borrow_mut().toggle_vibration();
                update_settings_ui(&settings);
            });
        }
        {
            let game = game.clone();
            on_click(document, "toggle-theme", move || {
                let settings = game.borrow_mut().toggle_theme();
                update_settings_ui(&settings);
            });
        }

        for btn in difficulty_buttons(document) {
            let game = game.clone();
            let name = btn.get_attribute("data-diff").unwrap_or_default();
            on_event(&btn, "click", move |_event| {
                if let Some(difficulty) = Difficulty::from_name(&name) {
                    let settings = game.borrow_mut().set_difficulty(difficulty);
                    update_settings_ui(&settings);
                }
            });
        }

        if let Some(slider) = document.get_element_by_id("sensitivity-slider") {
            on_event(&slider, "input", |event| {
                if let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                {
                    set_text(&current_document(), "sensitivity-value", &input.value());
                }
            });
            on_event(&slider, "change", move |event| {
                let Some(value) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .and_then(|el| el.value().parse::<u32>().ok())
                else {
                    return;
                };
                input.borrow_mut().set_sensitivity(value);
                game.borrow()
                    .storage
                    .update_settings(|s| s.sensitivity = value);
                set_text(&current_document(), "sensitivity-value", &value.to_string());
            });
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let document_clone = document.clone();
            on_event(document, "visibilitychange", move |_event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.engine.phase() == GamePhase::Playing {
                        g.engine.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
        }

        on_event(window, "blur", move |_event| {
            let mut g = game.borrow_mut();
            if g.engine.phase() == GamePhase::Playing {
                g.engine.pause();
                log::info!("Auto-paused (window blur)");
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Reborn (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Seeded demo run driven by a greedy autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::rc::Rc;

    use snake_reborn::audio::SilentPlayer;
    use snake_reborn::persistence::StorageManager;
    use snake_reborn::platform::MemoryStorage;
    use snake_reborn::sim::{GameContext, GameEngine, GamePhase, StateManager, check_all};
    use snake_reborn::{Direction, GameConfig, ScoreManager};

    /// Simulated frame length (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run(seed: u64) {
        let storage = StorageManager::new(Rc::new(MemoryStorage::new()));
        let ctx = GameContext::new(
            StateManager::new(),
            ScoreManager::new(storage),
            Box::new(SilentPlayer::new()),
        );
        let mut engine = GameEngine::new(GameConfig::default(), ctx, seed);
        engine.start();

        let mut frames = 0;
        while engine.phase() == GamePhase::Playing && frames < MAX_FRAMES {
            let dir = autopilot(&engine);
            engine.handle_direction(dir);
            engine.update(FRAME_MS);
            frames += 1;
        }

        log::info!(
            "Run finished after {:.1}s: score {}, level {}, length {}",
            frames as f64 * FRAME_MS / 1000.0,
            engine.score().current_score(),
            engine.level(),
            engine.snake().len()
        );
        println!(
            "seed {}: score {} (level {})",
            seed,
            engine.score().current_score(),
            engine.level()
        );
    }

    /// Head toward the food, preferring moves that don't kill the snake
    fn autopilot(engine: &GameEngine) -> Direction {
        let snake = engine.snake();
        let config = engine.config();
        let head = snake.head();
        let to_food = engine.food().position - head;

        let mut preferred = Vec::with_capacity(4);
        if to_food.x > 0 {
            preferred.push(Direction::Right);
        } else if to_food.x < 0 {
            preferred.push(Direction::Left);
        }
        if to_food.y > 0 {
            preferred.push(Direction::Down);
        } else if to_food.y < 0 {
            preferred.push(Direction::Up);
        }
        preferred.push(snake.direction);
        for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            preferred.push(dir);
        }

        preferred
            .into_iter()
            .filter(|dir| !snake.direction.is_opposite(*dir))
            .find(|dir| {
                let next = head + dir.delta() * config.grid_size;
                !check_all(next, snake.trunk(), engine.obstacles(), config.width, config.height).any()
            })
            .unwrap_or(snake.direction)
    }
}
