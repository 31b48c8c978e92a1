//! Brick Breaker entry point
//!
//! In the browser this wires the canvas, DOM events and
//! `requestAnimationFrame` into a [`GameSession`]. Natively it runs the game
//! headless under the autopilot and prints a summary.
//!
//! [`GameSession`]: brick_breaker::GameSession

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use brick_breaker::config::GameConfig;
    use brick_breaker::game::{FrameScheduler, GameOverHandler, GameSession};
    use brick_breaker::renderer::CanvasSurface;

    type WebSession = GameSession<CanvasSurface, RafScheduler, AlertGameOver>;

    /// Schedules `frame` through `requestAnimationFrame`
    struct RafScheduler {
        session: Weak<RefCell<WebSession>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) {
            let Some(window) = web_sys::window() else {
                log::error!("No window; frame loop stopped");
                return;
            };
            let session = self.session.clone();
            let closure = Closure::once(move |_time: f64| {
                if let Some(session) = session.upgrade() {
                    session.borrow_mut().frame();
                }
            });
            if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
            closure.forget();
        }
    }

    /// Blocking `alert` dialog
    struct AlertGameOver;

    impl GameOverHandler for AlertGameOver {
        fn acknowledge(&mut self, final_score: u64) {
            log::info!("Game over with score {}", final_score);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Game Over");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let surface = CanvasSurface::new(&canvas).expect("no 2d context");

        let mut config = GameConfig::default();
        config.canvas.width = canvas.width() as f32;
        config.canvas.height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let session = Rc::new_cyclic(|weak: &Weak<RefCell<WebSession>>| {
            RefCell::new(GameSession::new(
                config,
                seed,
                surface,
                RafScheduler {
                    session: weak.clone(),
                },
                AlertGameOver,
            ))
        });

        setup_input_handlers(&canvas, session.clone());
        setup_buttons(session);

        log::info!("Brick Breaker running with seed {}", seed);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, session: Rc<RefCell<WebSession>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Key down
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                session.borrow_mut().key_down(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                session.borrow_mut().key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move, relative to the canvas' left edge
        {
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let relative_x = event.client_x() - canvas.offset_left();
                session.borrow_mut().pointer_move(relative_x as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(session: Rc<RefCell<WebSession>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                session.borrow_mut().start_game();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Rules dialog close button is purely cosmetic
        if let Some(close) = document.query_selector(".close").ok().flatten() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(modal) = document
                    .get_element_by_id("rulesModal")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = modal.style().set_property("display", "none");
                }
            });
            let _ =
                close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use brick_breaker::autopilot::{Autopilot, PilotInput, PilotMode};
    use brick_breaker::config::GameConfig;
    use brick_breaker::consts::MAX_BRICKS;
    use brick_breaker::game::{GameSession, ManualScheduler, ScoreLog};
    use brick_breaker::renderer::RecordingSurface;
    use brick_breaker::sim::GamePhase;

    #[derive(Parser, Debug)]
    #[command(about = "Run Brick Breaker headless under the autopilot", version)]
    struct Args {
        /// Number of frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON config file; missing fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,
        /// Autopilot input style
        #[arg(long, value_enum, default_value_t = PilotMode::Pointer)]
        pilot: PilotMode,
        /// Print the final game state as JSON
        #[arg(long)]
        dump_state: bool,
    }

    #[derive(Debug, Default)]
    struct RunStats {
        frames: u64,
        bricks: u64,
        rollovers: u32,
        lives_lost: u32,
        game_overs: u32,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let config = match &args.config {
            Some(path) => {
                let (config, err) = GameConfig::load_or_default(path);
                if let Some(e) = err {
                    log::warn!("{}: {e}; using default config", path.display());
                }
                config
            }
            None => GameConfig::default(),
        };
        match config.brick_count() {
            Some(n) if n <= MAX_BRICKS => {}
            _ => anyhow::bail!(
                "brick grid {}x{} is larger than {} bricks",
                config.bricks.rows,
                config.bricks.columns,
                MAX_BRICKS
            ),
        }
        let mode = args.pilot;
        let seed = match args.seed {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock before UNIX epoch")?
                .as_nanos() as u64,
        };

        log::info!("Brick Breaker (headless) seed {} pilot {}", seed, mode.as_str());

        let surface = RecordingSurface::new(config.canvas.width, config.canvas.height);
        let mut session = GameSession::new(
            config,
            seed,
            surface,
            ManualScheduler::default(),
            ScoreLog::default(),
        );
        let mut pilot = Autopilot::new(mode);
        let mut stats = RunStats::default();

        while stats.frames < args.frames {
            if !session.scheduler_mut().take() {
                // Loop stopped: press Start again like a player would
                if session.state().phase == GamePhase::Idle {
                    session.start_game();
                    continue;
                }
                break;
            }

            match pilot.decide(session.state()) {
                PilotInput::PointerMove(x) => session.pointer_move(x),
                PilotInput::KeyDown(key) => session.key_down(key),
                PilotInput::KeyUp(key) => session.key_up(key),
                PilotInput::None => {}
            }

            let outcome = session.frame();
            stats.frames += 1;
            stats.bricks += outcome.bricks_hit as u64;
            stats.rollovers += outcome.rollover as u32;
            stats.lives_lost += outcome.life_lost as u32;
            stats.game_overs += outcome.game_over as u32;
        }

        let state = session.state();
        log::info!("Run finished: {:?}", stats);
        println!(
            "frames={} bricks={} rollovers={} lives_lost={} game_overs={} score={} lives={} draw_calls={}",
            stats.frames,
            stats.bricks,
            stats.rollovers,
            stats.lives_lost,
            stats.game_overs,
            state.score,
            state.lives,
            session.surface().commands().len(),
        );
        if !session.game_over_handler().final_scores.is_empty() {
            println!("final scores: {:?}", session.game_over_handler().final_scores);
        }

        if args.dump_state {
            let json = serde_json::to_string_pretty(state).context("serialize game state")?;
            println!("{json}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
