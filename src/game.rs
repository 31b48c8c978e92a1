//! Game session lifecycle
//!
//! A [`GameSession`] owns the game state and the three host collaborators:
//! the drawing surface, the frame scheduler and the game-over prompt. Hosts
//! call [`GameSession::frame`] whenever a frame they requested comes due.

use crate::config::GameConfig;
use crate::input::{self, KeyMap};
use crate::renderer::{self, Surface};
use crate::sim::{GamePhase, GameState, StepOutcome, step};

/// Host hook that arranges for `GameSession::frame` to be called once,
/// later, on the same thread (e.g. `requestAnimationFrame`)
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Host hook that tells the player the match is over. May block until the
/// player acknowledges (e.g. `window.alert`).
pub trait GameOverHandler {
    fn acknowledge(&mut self, final_score: u64);
}

/// Scheduler that only counts requests; the caller pumps frames itself
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: u32,
}

impl ManualScheduler {
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Consume one outstanding request
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

/// Game-over handler that logs and keeps the final scores
#[derive(Debug, Default)]
pub struct ScoreLog {
    pub final_scores: Vec<u64>,
}

impl GameOverHandler for ScoreLog {
    fn acknowledge(&mut self, final_score: u64) {
        log::info!("Game Over (score {})", final_score);
        self.final_scores.push(final_score);
    }
}

/// One running instance of the game
pub struct GameSession<S, F, G> {
    config: GameConfig,
    keys: KeyMap,
    state: GameState,
    surface: S,
    scheduler: F,
    game_over: G,
    /// A frame has been requested and not yet delivered
    frame_pending: bool,
    /// Matches started since the session was created
    matches_started: u32,
}

impl<S, F, G> GameSession<S, F, G>
where
    S: Surface,
    F: FrameScheduler,
    G: GameOverHandler,
{
    /// Launch a session: build fresh state, draw it, and start a match if
    /// `config.auto_start` is set
    pub fn new(config: GameConfig, seed: u64, surface: S, scheduler: F, game_over: G) -> Self {
        for warning in config.validate() {
            log::warn!("Config: {}", warning);
        }
        let keys = KeyMap {
            arrow_keys_on_press: config.arrow_keys_on_press,
        };
        let state = GameState::new(&config, seed);
        let mut session = Self {
            config,
            keys,
            state,
            surface,
            scheduler,
            game_over,
            frame_pending: false,
            matches_started: 0,
        };
        session.launch();
        session
    }

    fn launch(&mut self) {
        log::info!("Session launched with seed {}", self.state.seed);
        self.render();
        if self.config.auto_start {
            self.start_game();
        }
    }

    /// Reset bricks, ball, score and lives and run the frame loop. Starting
    /// while a frame is already pending does not start a second loop.
    pub fn start_game(&mut self) {
        self.state.start();
        self.matches_started += 1;
        log::info!(
            "Match {} started: {} lives, {} bricks",
            self.matches_started,
            self.state.lives,
            self.state.bricks.total()
        );
        self.schedule();
    }

    fn schedule(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    /// Scheduled frame callback: step, draw, and ask for the next frame
    pub fn frame(&mut self) -> StepOutcome {
        self.frame_pending = false;
        if self.state.phase != GamePhase::Running {
            return StepOutcome::default();
        }

        let outcome = step(&mut self.state);
        log::trace!("Frame {}: {:?}", self.state.frame_count, outcome);

        if outcome.game_over {
            self.game_over();
        } else {
            self.render();
            self.schedule();
        }
        outcome
    }

    /// End the match: prompt the player, then rebuild everything from
    /// scratch as if the game had just been launched
    pub fn game_over(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.game_over.acknowledge(self.state.score);

        let seed = self.state.next_seed();
        self.state = GameState::new(&self.config, seed);
        self.launch();
    }

    pub fn key_down(&mut self, key: &str) {
        input::on_key_down(&mut self.state.paddle, &self.keys, key);
    }

    pub fn key_up(&mut self, key: &str) {
        input::on_key_up(&mut self.state.paddle, &self.keys, key);
    }

    /// `pointer_x` relative to the surface's left edge
    pub fn pointer_move(&mut self, pointer_x: f32) {
        input::on_pointer_move(&mut self.state.paddle, self.state.canvas.width, pointer_x);
    }

    pub fn render(&mut self) {
        renderer::draw(&self.state, &self.config.hud, &mut self.surface);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tests and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn matches_started(&self) -> u32 {
        self.matches_started
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn game_over_handler(&self) -> &G {
        &self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    type TestSession = GameSession<RecordingSurface, ManualScheduler, ScoreLog>;

    fn session(config: GameConfig) -> TestSession {
        let surface = RecordingSurface::new(config.canvas.width, config.canvas.height);
        GameSession::new(
            config,
            42,
            surface,
            ManualScheduler::default(),
            ScoreLog::default(),
        )
    }

    fn idle_config() -> GameConfig {
        GameConfig {
            auto_start: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_launch_without_auto_start_is_idle() {
        let s = session(idle_config());
        assert_eq!(s.state().phase, GamePhase::Idle);
        assert_eq!(s.scheduler().pending(), 0);
        // Initial frame drawn so the canvas is not blank
        assert_eq!(s.surface().frames(), 1);
    }

    #[test]
    fn test_auto_start_runs_immediately() {
        let s = session(GameConfig::default());
        assert_eq!(s.state().phase, GamePhase::Running);
        assert_eq!(s.scheduler().pending(), 1);
        assert_eq!(s.matches_started(), 1);
    }

    #[test]
    fn test_start_game_twice_matches_once() {
        let mut s = session(idle_config());
        s.start_game();
        let once = s.state().clone();
        s.start_game();
        let twice = s.state();

        assert_eq!(twice.phase, GamePhase::Running);
        assert_eq!(twice.score, 0);
        assert_eq!(twice.lives, STARTING_LIVES);
        assert_eq!(twice.bricks, once.bricks);
        assert_eq!(twice.bricks.visible_count(), 45);
        assert_eq!(twice.ball.pos, once.ball.pos);
        assert_eq!(twice.ball.vel.y, once.ball.vel.y);
        assert_eq!(twice.ball.vel.x.abs(), once.ball.vel.x.abs());
        // Only one frame loop
        assert_eq!(s.scheduler().pending(), 1);
    }

    #[test]
    fn test_start_resets_progress() {
        let mut s = session(GameConfig::default());
        s.state_mut().score = 17;
        s.state_mut().lives = 1;
        s.state_mut().bricks.hide(3);
        s.start_game();
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().lives, STARTING_LIVES);
        assert_eq!(s.state().bricks.visible_count(), 45);
        assert_eq!(s.state().ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_frame_steps_draws_and_reschedules() {
        let mut s = session(GameConfig::default());
        assert!(s.scheduler_mut().take());
        let ball_before = s.state().ball.pos;

        s.frame();
        assert_ne!(s.state().ball.pos, ball_before);
        assert_eq!(s.state().frame_count, 1);
        assert_eq!(s.scheduler().pending(), 1);
        assert!(s.frame_pending());

        let cmds = s.surface().commands();
        assert_eq!(cmds.len(), 50);
        assert!(matches!(
            &cmds[1],
            DrawCommand::Circle { center, .. } if *center == s.state().ball.pos
        ));
    }

    #[test]
    fn test_frame_when_idle_does_nothing() {
        let mut s = session(idle_config());
        let outcome = s.frame();
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(s.state().frame_count, 0);
        assert_eq!(s.scheduler().pending(), 0);
    }

    #[test]
    fn test_input_forwarding() {
        let mut s = session(GameConfig::default());
        s.key_down("d");
        assert_eq!(s.state().paddle.dx, PADDLE_SPEED);
        s.key_up("ArrowRight");
        assert_eq!(s.state().paddle.dx, 0.0);
        s.pointer_move(600.0);
        assert_eq!(s.state().paddle.pos.x, 550.0);
    }

    #[test]
    fn test_arrow_keys_on_press_from_config() {
        let mut s = session(GameConfig {
            arrow_keys_on_press: true,
            ..Default::default()
        });
        s.key_down("ArrowLeft");
        assert_eq!(s.state().paddle.dx, -PADDLE_SPEED);
    }

    #[test]
    fn test_game_over_relaunches_fresh() {
        let mut s = session(GameConfig::default());
        s.state_mut().lives = 1;
        s.state_mut().score = 9;
        s.state_mut().bricks.hide(0);
        s.state_mut().paddle.pos.x = 0.0;
        s.state_mut().ball.pos = Vec2::new(100.0, 595.0);
        s.state_mut().ball.vel = Vec2::ZERO;
        let old_seed = s.state().seed;

        assert!(s.scheduler_mut().take());
        let outcome = s.frame();
        assert!(outcome.game_over);
        assert_eq!(s.game_over_handler().final_scores, vec![9]);

        // Relaunched and auto-started, as on a fresh load
        let state = s.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.bricks.visible_count(), 45);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 560.0));
        assert_ne!(state.seed, old_seed);
        assert_eq!(s.matches_started(), 2);
        assert_eq!(s.scheduler().pending(), 1);
    }

    #[test]
    fn test_game_over_without_auto_start_goes_idle() {
        let mut s = session(idle_config());
        s.start_game();
        s.game_over();
        assert_eq!(s.state().phase, GamePhase::Idle);
        assert_eq!(s.game_over_handler().final_scores, vec![0]);
    }

    #[test]
    fn test_stale_frame_after_game_over_is_harmless() {
        let mut s = session(idle_config());
        s.start_game();
        s.game_over();
        // The frame requested by start_game still arrives
        assert!(s.scheduler_mut().take());
        assert_eq!(s.frame(), StepOutcome::default());
        assert_eq!(s.state().phase, GamePhase::Idle);
    }
}
