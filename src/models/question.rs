use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const NUM_OPTIONS: usize = 4;

/// Positional label of an answer choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; NUM_OPTIONS] =
        [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when a string is not one of `A`, `B`, `C`, `D`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid option label: {0:?} (expected A, B, C or D)")]
pub struct ParseLabelError(pub String);

impl FromStr for OptionLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(ParseLabelError(s.to_string())),
        }
    }
}

/// A multiple-choice question in its structured form.
///
/// `options` is indexed by [`OptionLabel::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_answer: OptionLabel,
    pub order_number: u32,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct_answer == label
    }
}

/// A question row as persisted for a practical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestQuestion {
    pub id: Uuid,
    pub practical_id: Uuid,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: OptionLabel,
    pub order_number: u32,
    pub created_at: DateTime<Utc>,
}

impl TestQuestion {
    pub fn new(practical_id: Uuid, question: Question) -> Self {
        let [option_a, option_b, option_c, option_d] = question.options;
        Self {
            id: Uuid::new_v4(),
            practical_id,
            question: question.question_text,
            option_a,
            option_b,
            option_c,
            option_d,
            correct_answer: question.correct_answer,
            order_number: question.order_number,
            created_at: Utc::now(),
        }
    }

    pub fn option(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.option_a,
            OptionLabel::B => &self.option_b,
            OptionLabel::C => &self.option_c,
            OptionLabel::D => &self.option_d,
        }
    }
}

impl From<&TestQuestion> for Question {
    fn from(row: &TestQuestion) -> Self {
        Self {
            question_text: row.question.clone(),
            options: [
                row.option_a.clone(),
                row.option_b.clone(),
                row.option_c.clone(),
                row.option_d.clone(),
            ],
            correct_answer: row.correct_answer,
            order_number: row.order_number,
        }
    }
}
