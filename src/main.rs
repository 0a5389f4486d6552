//! Brickfall entry point
//!
//! Native builds run a headless autopilot game; the web build wires keyboard
//! events and `requestAnimationFrame` into the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use brickfall::display::{DisplaySink, Frame};
    use brickfall::highscores::LocalStorageStore;
    use brickfall::platform::{KeyboardInput, viewport_for_window};
    use brickfall::sim::Viewport;
    use brickfall::{Game, Settings};

    // Page hooks; each is optional so the game still runs on a bare page
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (typeof window.brickfallRender === 'function') {
                window.brickfallRender(JSON.parse(json));
            }
        }

        export function notify_game_over(score, highScore) {
            if (typeof window.brickfallGameOver === 'function') {
                window.brickfallGameOver(score, highScore);
            }
        }

        export function notify_victory() {
            if (typeof window.brickfallVictory === 'function') {
                window.brickfallVictory();
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
        fn notify_game_over(score: f64, high_score: f64);
        fn notify_victory();
    }

    /// Forwards frames and notices to the host page
    #[derive(Debug, Default)]
    struct PageDisplay;

    impl DisplaySink for PageDisplay {
        fn render(&mut self, frame: &Frame<'_>) {
            match frame.to_json() {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Dropping frame: {}", e),
            }
        }

        fn show_game_over(&mut self, score: u64, high_score: u64) {
            log::info!("GAME OVER - score {} (high score {})", score, high_score);
            notify_game_over(score as f64, high_score as f64);
        }

        fn show_victory(&mut self) {
            log::info!("YOU WIN!");
            notify_victory();
        }
    }

    /// Game instance plus host-side input state
    struct App {
        game: Game<PageDisplay, LocalStorageStore>,
        keys: KeyboardInput,
        /// Whether a frame callback is currently pending
        running: bool,
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    fn current_viewport() -> Viewport {
        let window = web_sys::window();
        let dim = |v: Option<Result<JsValue, JsValue>>| {
            v.and_then(|r| r.ok())
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32
        };
        let width = dim(window.as_ref().map(|w| w.inner_width()));
        let height = dim(window.as_ref().map(|w| w.inner_height()));
        viewport_for_window(width, height)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Brickfall starting...");

        let app = Rc::new(RefCell::new(App {
            game: Game::new(
                Settings::load(),
                current_viewport(),
                PageDisplay,
                LocalStorageStore,
            ),
            keys: KeyboardInput::new(),
            running: true,
        }));
        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        setup_input_handlers(app.clone());
        request_animation_frame(app);
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let down_app = app.clone();
        let keydown = Closure::<dyn FnMut(_)>::new(move |e: web_sys::KeyboardEvent| {
            if down_app.borrow_mut().keys.key_down(&e.key()) {
                e.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        keydown.forget();

        let keyup = Closure::<dyn FnMut(_)>::new(move |e: web_sys::KeyboardEvent| {
            app.borrow_mut().keys.key_up(&e.key());
        });
        let _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
        keyup.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let input = a.keys.sample();
            let more = a.game.tick(&input, current_viewport());
            a.running = more;
            more
        };

        if keep_going {
            request_animation_frame(app);
        }
    }

    /// Restart trigger for the host page's "play again" button
    #[wasm_bindgen]
    pub fn restart_game() {
        let Some(app) = APP.with(|slot| slot.borrow().clone()) else {
            return;
        };
        let resume = {
            let mut a = app.borrow_mut();
            a.game.restart(current_viewport());
            a.keys.clear();
            let resume = !a.running;
            a.running = true;
            resume
        };
        if resume {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use brickfall::highscores::FileStore;
    use brickfall::platform::KeyboardInput;
    use brickfall::sim::{GamePhase, Viewport};
    use brickfall::{Game, GameResult, LogDisplay, Settings};

    /// Give up on a game that never ends
    const MAX_TICKS: u64 = 100_000;
    /// Headless viewport
    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    pub fn run() -> GameResult<()> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from(Path::new(&path))?,
            None => Settings::default(),
        };
        let seed = std::env::var("BRICKFALL_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        log::info!("Brickfall (native) starting, autopilot seed {}", seed);

        let mut game = Game::new(
            settings,
            VIEWPORT,
            LogDisplay::new(),
            FileStore::new(FileStore::DEFAULT_PATH),
        );
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut keys = KeyboardInput::new();

        while game.wants_next_tick() && game.state().time_ticks < MAX_TICKS {
            autopilot(&game, &mut keys, &mut rng);
            game.tick(&keys.sample(), VIEWPORT);
        }

        let state = game.state();
        match game.phase() {
            GamePhase::Playing => log::warn!("Stopped after {} ticks without a result", state.time_ticks),
            phase => log::info!("{:?} after {} ticks", phase, state.time_ticks),
        }
        log::info!(
            "Final score {}/{} (high score {})",
            state.score,
            game.settings().max_score(),
            game.high_score()
        );
        if log::log_enabled!(log::Level::Debug) {
            if let Ok(json) = serde_json::to_string(state) {
                log::debug!("Final state: {}", json);
            }
        }
        Ok(())
    }

    /// Chase the ball with a little aim noise so runs differ by seed
    fn autopilot(game: &Game<LogDisplay, FileStore>, keys: &mut KeyboardInput, rng: &mut Pcg32) {
        let state = game.state();
        let paddle = &state.paddle;
        let aim = paddle.width * 0.45;
        let target = state.ball.pos.x + rng.random_range(-aim..aim);
        let dead_zone = game.settings().paddle_step;

        keys.clear();
        if target < paddle.center_x() - dead_zone {
            keys.key_down("ArrowLeft");
        } else if target > paddle.center_x() + dead_zone {
            keys.key_down("ArrowRight");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
