use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named presets offered to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Intermediate, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(9, 9, 10),
            Self::Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Self::Hard => GameConfig::new_unchecked(22, 22, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Intermediate => "Intermediate",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Looks up a preset by name.
pub fn resolve(name: &str) -> Result<GameConfig> {
    name.parse::<Difficulty>().map(Difficulty::config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn presets_match_table() {
        assert_eq!(resolve("Easy"), Ok(GameConfig::new(9, 9, 10).unwrap()));
        assert_eq!(resolve("Intermediate"), Ok(GameConfig::new(16, 16, 40).unwrap()));
        assert_eq!(resolve("Hard"), Ok(GameConfig::new(22, 22, 99).unwrap()));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!("hard".parse(), Ok(Difficulty::Hard));
        assert_eq!(" EASY ".parse(), Ok(Difficulty::Easy));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(resolve("Expert"), Err(GameError::UnknownDifficulty));
        assert_eq!(resolve(""), Err(GameError::UnknownDifficulty));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse(), Ok(difficulty));
        }
    }
}
