//! Combat stances
//!
//! The five classic choices. Tokens are case-sensitive: all lowercase
//! except "Spock", who earned his capital.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five combat choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Stance {
    /// All stances in authored order
    pub const ALL: [Stance; 5] = [
        Stance::Rock,
        Stance::Paper,
        Stance::Scissors,
        Stance::Lizard,
        Stance::Spock,
    ];

    /// The command-token spelling of this stance
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Rock => "rock",
            Stance::Paper => "paper",
            Stance::Scissors => "scissors",
            Stance::Lizard => "lizard",
            Stance::Spock => "Spock",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token did not name a stance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStance(pub String);

impl FromStr for Stance {
    type Err = UnknownStance;

    // Deliberately case-sensitive: "spock" is not a stance.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Stance::Rock),
            "paper" => Ok(Stance::Paper),
            "scissors" => Ok(Stance::Scissors),
            "lizard" => Ok(Stance::Lizard),
            "Spock" => Ok(Stance::Spock),
            _ => Err(UnknownStance(s.to_string())),
        }
    }
}
