//! Demo autopilot
//!
//! Flaps whenever the actor is falling below the centre of the next gap.
//! Drives the native headless run.

use super::state::{GamePhase, Session};

/// How far below the gap centre the actor may sink before flapping
const SLACK: f32 = 12.0;

/// Vertical point the autopilot steers toward
pub fn target_y(session: &Session) -> f32 {
    let actor_x = session.actor().x();
    let width = session.obstacle_width();
    session
        .obstacles()
        .iter()
        .find(|o| o.trailing_edge(width) >= actor_x)
        .map(|o| o.gap_top + o.gap / 2.0)
        .unwrap_or(session.playfield().y / 2.0)
}

/// Should the autopilot jump this frame?
pub fn wants_jump(session: &Session) -> bool {
    if !matches!(session.phase(), GamePhase::Idle | GamePhase::Running) {
        return false;
    }
    let actor = session.actor();
    let centre = actor.y() + actor.height() / 2.0;
    actor.vel_y >= 0.0 && centre > target_y(session) + SLACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::SpawnParams;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_targets_playfield_centre_without_obstacles() {
        let s = Session::new(Tuning::default(), 1, 0).expect("valid");
        assert_eq!(target_y(&s), 300.0);
    }

    #[test]
    fn test_targets_next_gap() {
        let mut s = Session::new(Tuning::default(), 1, 0).expect("valid");
        s.start();
        let params = SpawnParams {
            x: 300.0,
            ..s.spawn_params()
        };
        s.field.place(&params, 100.0).expect("in range");
        assert_eq!(target_y(&s), 200.0);

        // Actor centre at 312 and not rising
        assert!(wants_jump(&s));
        s.jump();
        assert!(!wants_jump(&s), "never flaps while rising");
    }

    #[test]
    fn test_idle_on_paused_or_over() {
        let mut s = Session::new(Tuning::default(), 1, 0).expect("valid");
        s.start();
        s.actor.pos.y = 500.0;
        s.pause();
        assert!(!wants_jump(&s));
    }

    #[test]
    fn test_keeps_actor_off_the_floor() {
        let mut s = Session::new(Tuning::default(), 5, 0).expect("valid");
        s.start();
        // Before the first obstacle arrives nothing can hit the actor
        for _ in 0..120 {
            if wants_jump(&s) {
                s.jump();
            }
            tick(&mut s, 1.0 / 60.0);
        }
        assert_eq!(s.phase(), GamePhase::Running);
    }
}
