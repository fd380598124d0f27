//! Storage interface for course content, students and their results.

use std::io;
use std::path::PathBuf;

use uuid::Uuid;

use crate::models::{
    IndependentSubmission, IndependentWork, IndependentWorkUpdate, Lecture, LectureUpdate,
    NewIndependentWork, NewLecture, NewPractical, NewSubmission, NewTestResult, Practical,
    PracticalUpdate, Profile, ProfileUpdate, Question, StudentProgress, TestQuestion, TestResult,
};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No row with the given id exists.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    /// The backing file could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file holds something other than a snapshot.
    #[error("corrupt data file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The write would break a table constraint.
    #[error("{0}")]
    Invalid(String),
}

impl RepoError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        RepoError::NotFound { kind, id }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Tables of the course platform.
///
/// Lookups that find nothing return `Ok(None)`; updates and deletes of a
/// missing row return [`RepoError::NotFound`]. Lists of ordered content are
/// sorted by `order_number`.
pub trait Repository {
    fn profile(&self, id: Uuid) -> RepoResult<Option<Profile>>;
    fn students(&self) -> RepoResult<Vec<Profile>>;
    /// Admin profiles, oldest first.
    fn admins(&self) -> RepoResult<Vec<Profile>>;
    fn insert_profile(&mut self, profile: Profile) -> RepoResult<Profile>;
    fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> RepoResult<Profile>;
    /// Removes the profile along with its progress, results and submissions.
    fn delete_profile(&mut self, id: Uuid) -> RepoResult<()>;

    fn lectures(&self) -> RepoResult<Vec<Lecture>>;
    fn lecture(&self, id: Uuid) -> RepoResult<Option<Lecture>>;
    fn published_lecture_by_order(&self, order_number: u32) -> RepoResult<Option<Lecture>>;
    fn insert_lecture(&mut self, lecture: NewLecture) -> RepoResult<Lecture>;
    fn update_lecture(&mut self, id: Uuid, update: LectureUpdate) -> RepoResult<Lecture>;
    fn delete_lecture(&mut self, id: Uuid) -> RepoResult<()>;

    fn practicals(&self) -> RepoResult<Vec<Practical>>;
    fn practical(&self, id: Uuid) -> RepoResult<Option<Practical>>;
    fn published_practical_by_order(&self, order_number: u32) -> RepoResult<Option<Practical>>;
    /// Stores the practical and its questions together.
    fn insert_practical(
        &mut self,
        practical: NewPractical,
        questions: Vec<Question>,
    ) -> RepoResult<Practical>;
    /// `Some(questions)` replaces the whole question set, renumbered from 1.
    fn update_practical(
        &mut self,
        id: Uuid,
        update: PracticalUpdate,
        questions: Option<Vec<Question>>,
    ) -> RepoResult<Practical>;
    /// Removes the practical and its questions.
    fn delete_practical(&mut self, id: Uuid) -> RepoResult<()>;
    fn test_questions(&self, practical_id: Uuid) -> RepoResult<Vec<TestQuestion>>;

    fn independent_works(&self) -> RepoResult<Vec<IndependentWork>>;
    fn independent_work(&self, id: Uuid) -> RepoResult<Option<IndependentWork>>;
    fn insert_independent_work(&mut self, work: NewIndependentWork) -> RepoResult<IndependentWork>;
    fn update_independent_work(
        &mut self,
        id: Uuid,
        update: IndependentWorkUpdate,
    ) -> RepoResult<IndependentWork>;
    fn delete_independent_work(&mut self, id: Uuid) -> RepoResult<()>;

    fn submissions(&self, student_id: Uuid) -> RepoResult<Vec<IndependentSubmission>>;
    fn submission(&self, id: Uuid) -> RepoResult<Option<IndependentSubmission>>;
    fn insert_submission(&mut self, submission: NewSubmission) -> RepoResult<IndependentSubmission>;
    fn grade_submission(&mut self, id: Uuid, score: u32) -> RepoResult<IndependentSubmission>;

    fn student_progress(&self, student_id: Uuid) -> RepoResult<Vec<StudentProgress>>;
    /// Returns the existing record if the lecture is already complete.
    fn mark_lecture_complete(
        &mut self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> RepoResult<StudentProgress>;

    fn test_result(&self, student_id: Uuid, practical_id: Uuid) -> RepoResult<Option<TestResult>>;
    fn test_results(&self, student_id: Uuid) -> RepoResult<Vec<TestResult>>;
    fn all_test_results(&self) -> RepoResult<Vec<TestResult>>;
    /// Overwrites the student's previous attempt at the same practical.
    fn upsert_test_result(&mut self, result: NewTestResult) -> RepoResult<TestResult>;
}
