use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::{OptionLabel, Question};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A question row as exported from storage. Ids and timestamps are optional
/// so hand-written files work too.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: OptionLabel,
    #[serde(default)]
    order_number: u32,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Self {
            question_text: row.question,
            options: [row.option_a, row.option_b, row.option_c, row.option_d],
            correct_answer: row.correct_answer,
            order_number: row.order_number,
        }
    }
}

pub fn load_test_text<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON array of question rows, ordered by `order_number` (file
/// order for rows without one).
pub fn load_question_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let json_content = load_test_text(path)?;

    let rows: Vec<QuestionRow> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut questions: Vec<Question> = rows.into_iter().map(Question::from).collect();
    questions.sort_by_key(|question| question.order_number);
    Ok(questions)
}
