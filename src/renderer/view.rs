//! Read-only frame snapshot for drawing

use crate::sim::{GamePhase, Obstacle, Session};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Tilt in degrees
    pub rotation_deg: f32,
}

/// One obstacle pair in drawing terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    /// Top segment spans `0..top_height`
    pub top_height: f32,
    /// Bottom segment spans `bottom_y..bottom_y + bottom_height`
    pub bottom_y: f32,
    pub bottom_height: f32,
}

impl ObstacleView {
    pub fn from_obstacle(obstacle: &Obstacle, width: f32, playfield_height: f32) -> Self {
        Self {
            id: obstacle.id,
            x: obstacle.x,
            width,
            top_height: obstacle.gap_top,
            bottom_y: obstacle.gap_bottom(),
            bottom_height: obstacle.bottom_height(playfield_height),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub actor: ActorView,
    /// In spawn order
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub phase: GamePhase,
}

impl FrameView {
    pub fn capture(session: &Session) -> Self {
        let actor = session.actor();
        let width = session.obstacle_width();
        let height = session.playfield().y;

        Self {
            actor: ActorView {
                x: actor.x(),
                y: actor.y(),
                width: actor.width(),
                height: actor.height(),
                rotation_deg: actor.rotation_hint(),
            },
            obstacles: session
                .obstacles()
                .iter()
                .map(|o| ObstacleView::from_obstacle(o, width, height))
                .collect(),
            score: session.score(),
            level: session.level(),
            high_score: session.high_score(),
            phase: session.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_obstacle_view_segments() {
        let o = Obstacle {
            id: 4,
            x: 120.0,
            gap_top: 150.0,
            gap: 200.0,
            speed: 300.0,
            passed: false,
        };
        let v = ObstacleView::from_obstacle(&o, 80.0, 600.0);
        assert_eq!(v.top_height, 150.0);
        assert_eq!(v.bottom_y, 350.0);
        assert_eq!(v.bottom_height, 250.0);
        assert_eq!(v.width, 80.0);
    }

    #[test]
    fn test_capture_idle_session() {
        let s = Session::new(Tuning::default(), 1, 7).expect("valid");
        let frame = FrameView::capture(&s);
        assert_eq!(frame.actor.x, 80.0);
        assert_eq!(frame.actor.y, 300.0);
        assert_eq!(frame.actor.rotation_deg, 0.0);
        assert!(frame.obstacles.is_empty());
        assert_eq!(frame.high_score, 7);
        assert_eq!(frame.phase, GamePhase::Idle);
    }

    #[test]
    fn test_capture_tracks_resized_floor() {
        let tuning = Tuning {
            gravity: 1.0,
            ..Tuning::default()
        };
        let mut s = Session::new(tuning, 3, 0).expect("valid");
        s.start();
        for _ in 0..30 {
            if !s.obstacles().is_empty() {
                break;
            }
            crate::sim::tick(&mut s, 0.1);
        }
        let before = FrameView::capture(&s).obstacles[0];

        s.resize(400.0, 700.0);
        let after = FrameView::capture(&s).obstacles[0];
        assert_eq!(after.bottom_y, before.bottom_y);
        assert!((after.bottom_height - before.bottom_height - 100.0).abs() < 1e-3);
        assert!((after.bottom_y + after.bottom_height - 700.0).abs() < 1e-3);
    }
}
