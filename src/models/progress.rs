use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OptionLabel;

/// A lecture the student has been granted access to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lecture_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

/// Answers keyed by question id; `None` means the question was left blank.
pub type AnswerSheet = BTreeMap<Uuid, Option<OptionLabel>>;

/// The latest attempt of a student at a practical's test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Uuid,
    pub student_id: Uuid,
    pub practical_id: Uuid,
    pub score: u32,
    pub answers: AnswerSheet,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub student_id: Uuid,
    pub practical_id: Uuid,
    pub score: u32,
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndependentSubmission {
    pub id: Uuid,
    pub student_id: Uuid,
    pub independent_work_id: Uuid,
    pub submission_text: String,
    pub score: Option<u32>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub student_id: Uuid,
    pub independent_work_id: Uuid,
    pub submission_text: String,
}
