//! Scoring a student's test and granting access to the next lecture.

use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::data::{RepoError, Repository};
use crate::error::{PracticumError, Result};
use crate::models::{
    AnswerSheet, Lecture, NewTestResult, OptionLabel, Practical, TestQuestion, TestResult,
};

pub const DEFAULT_PASS_SCORE: u32 = 6;

/// The student's pick per question id.
pub type Selections = HashMap<Uuid, OptionLabel>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingPolicy {
    pub pass_score: u32,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            pass_score: DEFAULT_PASS_SCORE,
        }
    }
}

impl GradingPolicy {
    pub fn passes(&self, score: u32) -> bool {
        score >= self.pass_score
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub score: u32,
    pub total: u32,
    pub answers: AnswerSheet,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.score as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// One point per question answered with its correct label. Selections for
/// questions outside `questions` are ignored.
pub fn grade(questions: &[TestQuestion], selections: &Selections) -> Grade {
    let answers: AnswerSheet = questions
        .iter()
        .map(|question| (question.id, selections.get(&question.id).copied()))
        .collect();

    let score = questions
        .iter()
        .filter(|question| selections.get(&question.id) == Some(&question.correct_answer))
        .count() as u32;

    Grade {
        score,
        total: questions.len() as u32,
        answers,
    }
}

#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub result: TestResult,
    pub total: u32,
    pub passed: bool,
    /// Lecture opened by passing, if the course has one.
    pub unlocked_lecture: Option<Lecture>,
    pub next_practical: Option<Practical>,
}

/// Grades and records an attempt, replacing any earlier attempt at the same
/// practical. Passing opens the lecture that follows the practical.
pub fn submit_test<R: Repository + ?Sized>(
    repo: &mut R,
    policy: &GradingPolicy,
    student_id: Uuid,
    practical_id: Uuid,
    selections: &Selections,
) -> Result<TestOutcome> {
    let practical = repo
        .practical(practical_id)?
        .ok_or(RepoError::not_found("practical", practical_id))?;
    if repo.profile(student_id)?.is_none() {
        return Err(RepoError::not_found("student", student_id).into());
    }

    let questions = repo.test_questions(practical_id)?;
    if questions.is_empty() {
        return Err(PracticumError::Validation(format!(
            "practical \"{}\" has no test questions",
            practical.title
        )));
    }

    let grade = grade(&questions, selections);
    let passed = policy.passes(grade.score);
    let result = repo.upsert_test_result(NewTestResult {
        student_id,
        practical_id,
        score: grade.score,
        answers: grade.answers,
    })?;

    let next_order = practical.order_number + 1;
    let unlocked_lecture = if passed {
        match repo.published_lecture_by_order(next_order)? {
            Some(lecture) => {
                repo.mark_lecture_complete(student_id, lecture.id)?;
                info!(%student_id, lecture = %lecture.title, "unlocked next lecture");
                Some(lecture)
            }
            None => None,
        }
    } else {
        None
    };
    let next_practical = repo.published_practical_by_order(next_order)?;

    info!(
        %student_id,
        practical = %practical.title,
        score = result.score,
        total = grade.total,
        passed,
        "test submitted"
    );

    Ok(TestOutcome {
        result,
        total: grade.total,
        passed,
        unlocked_lecture,
        next_practical,
    })
}
