//! Content management: lectures, practicals with their tests, independent work.

use tracing::{info, warn};
use uuid::Uuid;

use crate::codec::{self, MarkPolicy};
use crate::data::{RepoError, Repository};
use crate::error::{PracticumError, Result};
use crate::gate::AcceptanceGate;
use crate::models::{
    Attachment, IndependentSubmission, IndependentWork, IndependentWorkUpdate, Lecture,
    LectureUpdate, NewIndependentWork, NewLecture, NewPractical, NewSubmission, Practical,
    PracticalUpdate, Status,
};

/// A practical as filled in on the edit form, with its test as raw text.
#[derive(Debug, Clone, Default)]
pub struct PracticalDraft {
    /// `Some` when editing an existing practical.
    pub id: Option<Uuid>,
    pub title: String,
    /// `None` keeps the current description when editing.
    pub description: Option<String>,
    pub order_number: u32,
    /// `None` means draft when creating and keeps the current status when
    /// editing.
    pub status: Option<Status>,
    pub created_by: Uuid,
    /// `None` keeps the current file when editing.
    pub file: Option<Attachment>,
    pub test_text: String,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PracticumError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_order(order_number: u32) -> Result<()> {
    if order_number == 0 {
        return Err(PracticumError::Validation(
            "order number must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_heading(title: &str, order_number: u32) -> Result<()> {
    validate_title(title)?;
    validate_order(order_number)
}

/// Checks only the fields an update actually sets.
fn validate_changed_heading(title: Option<&str>, order_number: Option<u32>) -> Result<()> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(order_number) = order_number {
        validate_order(order_number)?;
    }
    Ok(())
}

/// Decodes the draft's test, checks it against `gate` and stores the
/// practical. Nothing is written when the test is rejected.
pub fn save_practical<R: Repository + ?Sized>(
    repo: &mut R,
    gate: &AcceptanceGate,
    policy: MarkPolicy,
    draft: PracticalDraft,
) -> Result<Practical> {
    validate_heading(&draft.title, draft.order_number)?;

    let report = codec::decode_with(&draft.test_text, policy);
    let questions = gate.admit(report).inspect_err(|err| {
        warn!(title = %draft.title, "test rejected: {}", err);
    })?;

    let practical = match draft.id {
        Some(id) => {
            let update = PracticalUpdate {
                title: Some(draft.title),
                description: draft.description.map(Some),
                file: draft.file.map(Some),
                order_number: Some(draft.order_number),
                status: draft.status,
            };
            repo.update_practical(id, update, Some(questions))?
        }
        None => {
            let (file_url, file_name) = match draft.file {
                Some(file) => (Some(file.url), Some(file.name)),
                None => (None, None),
            };
            let new = NewPractical {
                title: draft.title,
                description: draft.description,
                file_url,
                file_name,
                order_number: draft.order_number,
                status: draft.status.unwrap_or_default(),
                created_by: draft.created_by,
            };
            repo.insert_practical(new, questions)?
        }
    };

    info!(id = %practical.id, title = %practical.title, "saved practical");
    Ok(practical)
}

/// The stored test of a practical in editable text form.
pub fn practical_test_text<R: Repository + ?Sized>(repo: &R, practical_id: Uuid) -> Result<String> {
    if repo.practical(practical_id)?.is_none() {
        return Err(RepoError::not_found("practical", practical_id).into());
    }
    let rows = repo.test_questions(practical_id)?;
    Ok(codec::encode_records(&rows))
}

pub fn delete_practical<R: Repository + ?Sized>(repo: &mut R, practical_id: Uuid) -> Result<()> {
    repo.delete_practical(practical_id)?;
    info!(id = %practical_id, "deleted practical");
    Ok(())
}

pub fn create_lecture<R: Repository + ?Sized>(repo: &mut R, lecture: NewLecture) -> Result<Lecture> {
    validate_heading(&lecture.title, lecture.order_number)?;
    let lecture = repo.insert_lecture(lecture)?;
    info!(id = %lecture.id, title = %lecture.title, "created lecture");
    Ok(lecture)
}

pub fn update_lecture<R: Repository + ?Sized>(
    repo: &mut R,
    id: Uuid,
    update: LectureUpdate,
) -> Result<Lecture> {
    validate_changed_heading(update.title.as_deref(), update.order_number)?;
    Ok(repo.update_lecture(id, update)?)
}

pub fn delete_lecture<R: Repository + ?Sized>(repo: &mut R, id: Uuid) -> Result<()> {
    repo.delete_lecture(id)?;
    info!(%id, "deleted lecture");
    Ok(())
}

pub fn create_independent_work<R: Repository + ?Sized>(
    repo: &mut R,
    work: NewIndependentWork,
) -> Result<IndependentWork> {
    validate_heading(&work.title, work.order_number)?;
    let work = repo.insert_independent_work(work)?;
    info!(id = %work.id, title = %work.title, "created independent work");
    Ok(work)
}

pub fn update_independent_work<R: Repository + ?Sized>(
    repo: &mut R,
    id: Uuid,
    update: IndependentWorkUpdate,
) -> Result<IndependentWork> {
    validate_changed_heading(update.title.as_deref(), update.order_number)?;
    Ok(repo.update_independent_work(id, update)?)
}

pub fn delete_independent_work<R: Repository + ?Sized>(repo: &mut R, id: Uuid) -> Result<()> {
    repo.delete_independent_work(id)?;
    info!(%id, "deleted independent work");
    Ok(())
}

pub fn submit_independent_work<R: Repository + ?Sized>(
    repo: &mut R,
    submission: NewSubmission,
) -> Result<IndependentSubmission> {
    if submission.submission_text.trim().is_empty() {
        return Err(PracticumError::Validation(
            "submission text must not be empty".to_string(),
        ));
    }
    Ok(repo.insert_submission(submission)?)
}

/// Scores are percentages.
pub fn grade_submission<R: Repository + ?Sized>(
    repo: &mut R,
    submission_id: Uuid,
    score: u32,
) -> Result<IndependentSubmission> {
    if score > 100 {
        return Err(PracticumError::Validation(format!(
            "score {} is above 100",
            score
        )));
    }
    Ok(repo.grade_submission(submission_id, score)?)
}
