//! Flappy Levels entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_levels::Tuning;
    use flappy_levels::audio::{AudioManager, sounds_for};
    use flappy_levels::persistence::{HighScoreStore, LocalStorageStore, persist_high_scores};
    use flappy_levels::platform::{Command, FrameClock};
    use flappy_levels::renderer::{DomRenderer, FrameView};
    use flappy_levels::sim::{GameEvent, GamePhase, Session, tick};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: DomRenderer,
        audio: AudioManager,
        clock: FrameClock,
        store: LocalStorageStore,
    }

    impl Game {
        /// Apply a player command and publish its effects immediately
        fn handle(&mut self, command: Command) {
            self.audio.resume();
            command.apply(&mut self.session);
            self.flush_events();
        }

        /// Fan queued events out to HUD, audio and storage
        fn flush_events(&mut self) {
            let events = self.session.drain_events();
            if events.is_empty() {
                return;
            }

            for event in &events {
                if *event == GameEvent::PhaseChanged(GamePhase::Running) {
                    // No catch-up delta after start or resume
                    self.clock.resync();
                }
                self.renderer.apply_event(event);
            }

            for effect in sounds_for(&events) {
                self.audio.play(effect);
            }

            let now = js_sys::Date::now();
            if persist_high_scores(&mut self.store, &events, self.session.level(), now) > 0 {
                self.renderer.show_record(&self.store.load_record(), now);
            }
        }

        /// Advance and draw one animation frame
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            tick(&mut self.session, dt);
            self.flush_events();
            self.renderer.render(&FrameView::capture(&self.session));
        }

        fn pause_if_running(&mut self, reason: &str) {
            if self.session.phase() == GamePhase::Running {
                self.session.pause();
                self.flush_events();
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn fit_to_board(&mut self) {
            let (w, h) = self.renderer.board_size();
            self.session.resize(w, h);
        }
    }

    /// Tuning with playfield and actor measured from the page
    fn measured_tuning(renderer: &DomRenderer) -> Tuning {
        let mut tuning = Tuning::load();
        let (w, h) = renderer.board_size();
        if w > 0.0 && h > 0.0 {
            tuning.playfield_width = w;
            tuning.playfield_height = h;
        }
        if let Some((w, h)) = renderer.actor_size() {
            tuning.actor_width = w;
            tuning.actor_height = h;
        }
        tuning
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy Levels starting...");

        let Some(renderer) = DomRenderer::new() else {
            log::error!("#game-board not found - nothing to run");
            return;
        };

        let store = LocalStorageStore::new();
        let record = store.load_record();
        let high_score = record.score;
        renderer.show_record(&record, js_sys::Date::now());

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(measured_tuning(&renderer), seed, high_score) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Measured tuning rejected ({}), using defaults", e);
                match Session::new(Tuning::default(), seed, high_score) {
                    Ok(session) => session,
                    Err(e) => {
                        log::error!("Default tuning rejected: {}", e);
                        return;
                    }
                }
            }
        };
        log::info!("Session ready with seed {} (best {})", seed, high_score);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio: AudioManager::new(),
            clock: FrameClock::default(),
            store,
        }));

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);
        log::info!("Flappy Levels running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = Command::from_key_code(&event.code()) {
                    if command == Command::Jump {
                        event.prevent_default();
                    }
                    game.borrow_mut().handle(command);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(board) = document.get_element_by_id("game-board") else {
            return;
        };

        // Click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle(Command::pointer());
            });
            let _ =
                board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (non-passive so the page does not scroll or zoom)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().handle(Command::pointer());
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = board.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let buttons = [
            ("start-btn", Command::Jump),
            ("restart-btn", Command::Restart),
            ("resume-btn", Command::TogglePause),
            ("restart-from-pause", Command::Restart),
        ];

        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} missing", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the board's click handler from jumping as well
                event.stop_propagation();
                game.borrow_mut().handle(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().pause_if_running("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().pause_if_running("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_board();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run: plays one game and logs the outcome
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use flappy_levels::Tuning;
    use flappy_levels::persistence::{HighScoreStore, MemoryStore, persist_high_scores};
    use flappy_levels::platform::FrameClock;
    use flappy_levels::sim::{GameEvent, GamePhase, Session, autopilot, tick};

    env_logger::init();
    log::info!("Flappy Levels (native) starting...");
    log::info!("Native mode runs a headless autopilot game - use `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {}", path))?;
            Tuning::from_json(&json).with_context(|| format!("parsing tuning file {}", path))?
        }
        None => Tuning::default(),
    };
    log::debug!("Tuning: {}", tuning.to_json()?);

    let mut store = MemoryStore::new();
    let seed = 0x5eed;
    let mut session = Session::new(tuning, seed, store.load_high_score())
        .context("creating session")?;

    // Two minutes of simulated 60 Hz frames
    let mut clock = FrameClock::default();
    let frame_ms = 1000.0 / 60.0;
    let mut level_ups = 0;
    session.jump();
    for frame in 0..(120 * 60) {
        let dt = clock.delta(frame as f64 * frame_ms);
        if autopilot::wants_jump(&session) {
            session.jump();
        }
        tick(&mut session, dt);

        let events = session.drain_events();
        level_ups += events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelChanged(l) if *l > 1))
            .count();
        persist_high_scores(&mut store, &events, session.level(), frame as f64 * frame_ms);

        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Score {} | level {} | level-ups {} | {:.1}s simulated | best {}",
        session.score(),
        session.level(),
        level_ups,
        session.elapsed(),
        store.load_high_score()
    );
    Ok(())
}
