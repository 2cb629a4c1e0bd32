//! Input mapping
//!
//! Device events become abstract commands; the session never sees keys.

use crate::sim::Session;

/// Player command, independent of input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    TogglePause,
    Restart,
    /// Pick the start level (only honoured before the first run)
    SelectLevel(u32),
}

impl Command {
    /// Map a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(Command::Jump),
            "KeyP" => Some(Command::TogglePause),
            "KeyR" => Some(Command::Restart),
            "Digit0" => Some(Command::SelectLevel(10)),
            _ => code
                .strip_prefix("Digit")
                .and_then(|d| d.parse::<u32>().ok())
                .filter(|d| (1..=9).contains(d))
                .map(Command::SelectLevel),
        }
    }

    /// Click or tap anywhere on the board
    pub fn pointer() -> Self {
        Command::Jump
    }

    pub fn apply(self, session: &mut Session) {
        match self {
            Command::Jump => session.jump(),
            Command::TogglePause => session.toggle_pause(),
            Command::Restart => session.restart(),
            Command::SelectLevel(level) => {
                if !session.select_level(level) {
                    log::debug!("Level select {} ignored in {:?}", level, session.phase());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_key_codes() {
        assert_eq!(Command::from_key_code("Space"), Some(Command::Jump));
        assert_eq!(Command::from_key_code("KeyP"), Some(Command::TogglePause));
        assert_eq!(Command::from_key_code("KeyR"), Some(Command::Restart));
        assert_eq!(Command::from_key_code("Digit3"), Some(Command::SelectLevel(3)));
        assert_eq!(Command::from_key_code("Digit0"), Some(Command::SelectLevel(10)));
        assert_eq!(Command::from_key_code("KeyX"), None);
        assert_eq!(Command::from_key_code("Digit"), None);
    }

    #[test]
    fn test_apply_drives_session() {
        let mut s = Session::new(Tuning::default(), 3, 0).expect("valid");
        Command::SelectLevel(2).apply(&mut s);
        assert_eq!(s.selected_level(), 2);

        Command::pointer().apply(&mut s);
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.level(), 2);

        Command::TogglePause.apply(&mut s);
        assert_eq!(s.phase(), GamePhase::Paused);

        Command::Restart.apply(&mut s);
        assert_eq!(s.phase(), GamePhase::Running);
    }
}
