use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a raw rank or token does not name one of the eight stages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid stage '{0}': expected a rank 1-8 or one of FIRST..SEVENTH, DONE")]
pub struct InvalidStageError(pub String);

/// Leitner box a card sits in, ordered from new to mastered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Newly introduced, reviewed after 1 day
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Fifth = 5,
    Sixth = 6,
    /// Last reviewed box, 64 days
    Seventh = 7,
    /// Mastered - never due again
    Done = 8,
}

/// Days to wait after a review, indexed by rank - 1. The terminal stage has no entry.
const INTERVAL_DAYS: [u32; 7] = [1, 2, 4, 8, 16, 32, 64];

impl Stage {
    /// Stage for new cards and for cards that were answered wrong
    pub const FIRST: Stage = Stage::First;

    /// Terminal "mastered" stage
    pub const DONE: Stage = Stage::Done;

    /// All stages in rank order
    pub const ALL: [Stage; 8] = [
        Stage::First,
        Stage::Second,
        Stage::Third,
        Stage::Fourth,
        Stage::Fifth,
        Stage::Sixth,
        Stage::Seventh,
        Stage::Done,
    ];

    /// Rank 1..=8
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Look up a stage by rank
    pub fn from_rank(rank: u8) -> Result<Self, InvalidStageError> {
        match rank {
            1..=8 => Ok(Self::ALL[usize::from(rank) - 1]),
            _ => Err(InvalidStageError(rank.to_string())),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Done
    }

    /// Review interval in days, `None` for the terminal stage
    pub fn interval_days(self) -> Option<u32> {
        INTERVAL_DAYS.get(usize::from(self.rank()) - 1).copied()
    }

    /// One rank up, saturating at `Done`
    pub fn next_on_success(self) -> Self {
        match self {
            Stage::Done => Stage::Done,
            other => Self::ALL[usize::from(other.rank())],
        }
    }

    /// Symbolic token used in JSON and on the command line
    pub fn token(self) -> &'static str {
        match self {
            Stage::First => "FIRST",
            Stage::Second => "SECOND",
            Stage::Third => "THIRD",
            Stage::Fourth => "FOURTH",
            Stage::Fifth => "FIFTH",
            Stage::Sixth => "SIXTH",
            Stage::Seventh => "SEVENTH",
            Stage::Done => "DONE",
        }
    }

    /// Review cadence for listings, matching `interval_days`
    pub fn label(self) -> &'static str {
        match self {
            Stage::First => "daily",
            Stage::Second => "every 2 days",
            Stage::Third => "every 4 days",
            Stage::Fourth => "every 8 days",
            Stage::Fifth => "every 16 days",
            Stage::Sixth => "every 32 days",
            Stage::Seventh => "every 64 days",
            Stage::Done => "mastered",
        }
    }
}

/// Interval for a raw rank as read from outside the crate.
/// Unknown ranks are an error rather than a default.
pub fn interval_days_for_rank(rank: u8) -> Result<Option<u32>, InvalidStageError> {
    Stage::from_rank(rank).map(Stage::interval_days)
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Stage {
    type Err = InvalidStageError;

    /// Accepts a rank ("4") or a token ("FOURTH", case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(rank) = s.parse::<u8>() {
            return Stage::from_rank(rank).map_err(|_| InvalidStageError(s.to_string()));
        }

        Stage::ALL
            .into_iter()
            .find(|stage| stage.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidStageError(s.to_string()))
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvalidStageError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Stage::from_rank(rank)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        stage.rank()
    }
}
