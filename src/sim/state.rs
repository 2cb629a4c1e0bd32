//! Game session state and command surface
//!
//! A `Session` exclusively owns the actor, the obstacle field and the score
//! for one player. Hosts drive it with commands and `tick`, then drain the
//! queued `GameEvent`s for rendering, audio and persistence.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::levels::MAX_LEVEL;
use super::obstacle::{Obstacle, ObstacleField, SpawnParams};
use super::scoring::Progression;
use crate::tuning::{ConfigError, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, waiting for input
    Idle,
    /// Simulation ticking
    Running,
    /// Ticking suspended, resumable
    Paused,
    /// Run ended, score final
    GameOver,
}

/// Notification for presentation and persistence layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Previous run discarded; drop any obstacle visuals now
    Reset,
    ScoreChanged(u32),
    LevelChanged(u32),
    /// Actor cleared an obstacle (audio cue)
    PassThrough,
    /// Jump impulse applied (audio cue)
    Jumped,
    PhaseChanged(GamePhase),
    NewHighScore(u32),
    GameOver { final_score: u32, high_score: u32 },
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Collision { obstacle_id: u32 },
    OutOfBounds,
}

/// One game session (single player, single run at a time)
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) tuning: Tuning,
    pub(super) phase: GamePhase,
    pub(super) actor: Actor,
    pub(super) field: ObstacleField,
    pub(super) progression: Progression,
    /// Level used by the next start/restart
    selected_level: u32,
    /// Best score seen, seeded from storage
    high_score: u32,
    /// Current playfield size (may change on resize)
    pub(super) playfield: Vec2,
    pub(super) rng: Pcg32,
    /// Seconds simulated in the current run
    pub(super) elapsed: f32,
    /// Ticks simulated in the current run
    pub(super) ticks: u64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session
    ///
    /// `high_score` is the persisted best score (0 if none).
    pub fn new(tuning: Tuning, seed: u64, high_score: u32) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let playfield = Vec2::new(tuning.playfield_width, tuning.playfield_height);
        let actor = Actor::new(
            tuning.actor_x,
            Vec2::new(tuning.actor_width, tuning.actor_height),
            playfield.y,
        );
        let field = ObstacleField::new(tuning.obstacle_width, tuning.spawn_interval);
        let selected_level = tuning.start_level;

        Ok(Self {
            tuning,
            phase: GamePhase::Idle,
            actor,
            field,
            progression: Progression::new(selected_level),
            selected_level,
            high_score,
            playfield,
            rng: Pcg32::seed_from_u64(seed),
            elapsed: 0.0,
            ticks: 0,
            events: Vec::new(),
        })
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn obstacle_width(&self) -> f32 {
        self.field.width()
    }

    /// Seconds accumulated toward the next spawn
    pub fn since_spawn(&self) -> f32 {
        self.field.since_spawn()
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn selected_level(&self) -> u32 {
        self.selected_level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn playfield(&self) -> Vec2 {
        self.playfield
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Begin a fresh run from any phase
    ///
    /// Discards every obstacle and resets actor, score, level and spawn
    /// timer before the first tick of the new run.
    pub fn start(&mut self) {
        self.field.clear();
        self.actor = Actor::new(self.tuning.actor_x, self.actor.size, self.playfield.y);
        self.progression = Progression::new(self.selected_level);
        self.elapsed = 0.0;
        self.ticks = 0;
        self.phase = GamePhase::Running;

        self.emit(GameEvent::Reset);
        self.emit(GameEvent::ScoreChanged(0));
        self.emit(GameEvent::LevelChanged(self.progression.level()));
        self.emit(GameEvent::PhaseChanged(GamePhase::Running));
        log::info!("Run started at level {}", self.progression.level());
    }

    /// Same as `start`; named for the host's restart button
    pub fn restart(&mut self) {
        self.start();
    }

    /// Flap: starts the run when idle, ignored when paused or over
    pub fn jump(&mut self) {
        match self.phase {
            GamePhase::Idle => {
                self.start();
                self.apply_jump();
            }
            GamePhase::Running => self.apply_jump(),
            GamePhase::Paused | GamePhase::GameOver => {}
        }
    }

    fn apply_jump(&mut self) {
        self.actor.jump(self.tuning.jump_impulse);
        self.emit(GameEvent::Jumped);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            self.emit(GameEvent::PhaseChanged(GamePhase::Paused));
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.emit(GameEvent::PhaseChanged(GamePhase::Running));
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Choose the level the next run starts at (idle only)
    ///
    /// Returns false when ignored.
    pub fn select_level(&mut self, level: u32) -> bool {
        if self.phase != GamePhase::Idle || !(1..=MAX_LEVEL).contains(&level) {
            return false;
        }
        self.selected_level = level;
        self.progression = Progression::new(level);
        self.emit(GameEvent::LevelChanged(level));
        true
    }

    /// Adopt a new playfield size (window resize)
    ///
    /// Affects spawns and the floor check from the next tick on. Live
    /// obstacles keep their geometry. Ignored for non-positive sizes.
    pub fn resize(&mut self, width: f32, height: f32) {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            log::warn!("Ignoring invalid playfield size {}x{}", width, height);
            return;
        }
        self.playfield = Vec2::new(width, height);
        if self.phase == GamePhase::Idle {
            self.actor = Actor::new(self.tuning.actor_x, self.actor.size, height);
        }
    }

    // === Internals used by tick ===

    /// Spawn parameters for the active level and current playfield
    pub(super) fn spawn_params(&self) -> SpawnParams {
        let level = self.progression.config();
        SpawnParams {
            x: self.playfield.x,
            playfield_height: self.playfield.y,
            gap: level.gap,
            speed: level.speed,
            min_margin: self.tuning.min_margin,
        }
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Freeze the run and settle the high score
    pub(super) fn finish(&mut self, cause: GameOverCause) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;

        let final_score = self.progression.score();
        if final_score > self.high_score {
            self.high_score = final_score;
            self.emit(GameEvent::NewHighScore(final_score));
            log::info!("New high score: {}", final_score);
        }

        self.emit(GameEvent::PhaseChanged(GamePhase::GameOver));
        self.emit(GameEvent::GameOver {
            final_score,
            high_score: self.high_score,
        });
        log::info!(
            "Game over ({:?}): score {}, level {}",
            cause,
            final_score,
            self.progression.level()
        );
    }
}
