use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three tiers offered on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Standard,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Basic, Self::Standard, Self::Advanced];

    /// Numeric level, 1 through 3.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Standard => 2,
            Self::Advanced => 3,
        }
    }

    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Basic),
            2 => Some(Self::Standard),
            3 => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Instruction fed to the question generator to bias content.
    #[must_use]
    pub const fn descriptor(self) -> &'static str {
        match self {
            Self::Basic => {
                "Basic level: core formulas and simple antiderivative and definite integral computations."
            }
            Self::Standard => {
                "Standard level: areas, volumes of revolution, substitution and integration by parts at the comprehension and application level."
            }
            Self::Advanced => {
                "Advanced level: novel real-world problems (construction, economics, physics, engineering) that demand higher-order reasoning and show striking practical uses of integrals."
            }
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
        }
    }

    #[must_use]
    pub const fn tagline(self) -> &'static str {
        match self {
            Self::Basic => "Fundamentals & formulas",
            Self::Standard => "Standard applications",
            Self::Advanced => "Real-world & reasoning",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {raw}")]
pub struct ParseDifficultyError {
    raw: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.parse::<u8>() {
            Ok(level) => Self::from_level(level),
            Err(_) => Self::ALL
                .into_iter()
                .find(|level| level.label().eq_ignore_ascii_case(trimmed)),
        };
        parsed.ok_or_else(|| ParseDifficultyError { raw: s.to_string() })
    }
}
