//! Difficulty labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal difficulty label derived from English word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// 1-3 words: short expressions and idioms.
    Starter,
    /// 4-8 words: basic sentences.
    Beginner,
    /// 9-15 words: everyday conversation.
    Intermediate,
    /// 16-25 words: compound sentences, relative clauses.
    Advanced,
    /// 26-35 words: multiple subordinate clauses.
    Challenge,
}

impl Difficulty {
    /// All labels in ordinal order.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Starter,
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Challenge,
    ];

    /// The literal label written to the output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Starter => "STARTER",
            Difficulty::Beginner => "BEGINNER",
            Difficulty::Intermediate => "INTERMEDIATE",
            Difficulty::Advanced => "ADVANCED",
            Difficulty::Challenge => "CHALLENGE",
        }
    }

    /// Inclusive word-count range covered by this label.
    pub fn word_range(&self) -> (usize, usize) {
        match self {
            Difficulty::Starter => (1, 3),
            Difficulty::Beginner => (4, 8),
            Difficulty::Intermediate => (9, 15),
            Difficulty::Advanced => (16, 25),
            Difficulty::Challenge => (26, 35),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty label: {}", s))
    }
}
