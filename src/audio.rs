//! Audio cues
//!
//! Game events map to sound effects here; playback uses procedurally
//! generated Web Audio tones, no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump impulse
    Flap,
    /// Obstacle cleared
    Score,
    /// Crash (collision or floor)
    Hit,
    /// Next level unlocked
    LevelUp,
    /// New best score
    HighScore,
}

/// Sounds to play for a batch of events, in order
///
/// A `LevelChanged` only counts as a level-up when it follows a
/// pass-through in the same batch; start and level select also announce the
/// level and stay silent.
pub fn sounds_for(events: &[GameEvent]) -> Vec<SoundEffect> {
    let mut sounds = Vec::new();
    let mut scored = false;
    for event in events {
        match event {
            GameEvent::Reset => scored = false,
            GameEvent::Jumped => sounds.push(SoundEffect::Flap),
            GameEvent::PassThrough => {
                scored = true;
                sounds.push(SoundEffect::Score);
            }
            GameEvent::LevelChanged(_) if scored => sounds.push(SoundEffect::LevelUp),
            GameEvent::NewHighScore(_) => sounds.push(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => sounds.push(SoundEffect::Hit),
            _ => {}
        }
    }
    sounds
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Master level for every cue
    const VOLUME: f32 = 0.8;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };
            let vol = VOLUME;

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        /// Oscillator routed through its own gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short upward chirp
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Bright two-note ding
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                    return;
                };
                let t = ctx.current_time() + i as f64 * 0.07;

                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();

                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        /// Falling sawtooth thud
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Rising arpeggio
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let notes = [523.25, 659.25, 783.99, 1046.5];
            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                    return;
                };
                let t = ctx.current_time() + i as f64 * 0.08;

                gain.gain().set_value_at_time(vol * 0.12, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();

                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        /// Fanfare
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            let notes = [523.25, 659.25, 783.99, 1046.5, 1318.5];
            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                    return;
                };
                let t = ctx.current_time() + i as f64 * 0.1;

                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();

                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_start_is_silent_except_flap() {
        let events = [
            GameEvent::Reset,
            GameEvent::ScoreChanged(0),
            GameEvent::LevelChanged(1),
            GameEvent::PhaseChanged(GamePhase::Running),
            GameEvent::Jumped,
        ];
        assert_eq!(sounds_for(&events), vec![SoundEffect::Flap]);
    }

    #[test]
    fn test_level_up_after_score() {
        let events = [
            GameEvent::PassThrough,
            GameEvent::ScoreChanged(5),
            GameEvent::LevelChanged(2),
        ];
        assert_eq!(
            sounds_for(&events),
            vec![SoundEffect::Score, SoundEffect::LevelUp]
        );
    }

    #[test]
    fn test_level_select_is_silent() {
        assert!(sounds_for(&[GameEvent::LevelChanged(4)]).is_empty());
    }

    #[test]
    fn test_restart_in_batch_clears_score_flag() {
        let events = [
            GameEvent::PassThrough,
            GameEvent::Reset,
            GameEvent::LevelChanged(1),
        ];
        assert_eq!(sounds_for(&events), vec![SoundEffect::Score]);
    }

    #[test]
    fn test_game_over_with_record() {
        let events = [
            GameEvent::NewHighScore(9),
            GameEvent::PhaseChanged(GamePhase::GameOver),
            GameEvent::GameOver {
                final_score: 9,
                high_score: 9,
            },
        ];
        assert_eq!(
            sounds_for(&events),
            vec![SoundEffect::HighScore, SoundEffect::Hit]
        );
    }
}
