//! Per-frame simulation step
//!
//! Update order is fixed: actor physics, obstacle field, collision, scoring,
//! then the floor check. A point scored on the same tick as a crash still
//! counts toward the final score.

use super::actor::Integration;
use super::collision::first_collision;
use super::state::{GameEvent, GameOverCause, GamePhase, Session};

/// Advance a running session by `dt` seconds
///
/// No-op outside `Running` and for non-positive or non-finite deltas.
pub fn tick(session: &mut Session, dt: f32) {
    if session.phase != GamePhase::Running {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    session.ticks += 1;
    session.elapsed += dt;

    let gravity = session.tuning.gravity;
    let bounds = session.actor.integrate(dt, gravity, session.playfield.y);

    let params = session.spawn_params();
    let actor_x = session.actor.x();
    let passed = session.field.tick(dt, &params, actor_x, &mut session.rng);

    let hit = first_collision(
        &session.actor,
        session.field.obstacles(),
        session.field.width(),
        session.tuning.hitbox_inset,
    );

    for _ in &passed {
        session.emit(GameEvent::PassThrough);
        let outcome = session.progression.record_pass();
        session.emit(GameEvent::ScoreChanged(outcome.score));
        if let Some(level) = outcome.level_up {
            session.emit(GameEvent::LevelChanged(level));
        }
    }

    if let Some(obstacle_id) = hit {
        session.finish(GameOverCause::Collision { obstacle_id });
    } else if bounds == Integration::OutOfBounds {
        session.finish(GameOverCause::OutOfBounds);
    }
}
