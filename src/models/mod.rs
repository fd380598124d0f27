mod content;
mod profile;
mod progress;
mod question;

pub use content::{
    Attachment, IndependentWork, IndependentWorkUpdate, Lecture, LectureUpdate,
    NewIndependentWork, NewLecture, NewPractical, Practical, PracticalUpdate, Status,
};
pub use profile::{Profile, ProfileUpdate, Role};
pub use progress::{
    AnswerSheet, IndependentSubmission, NewSubmission, NewTestResult, StudentProgress, TestResult,
};
pub use question::{NUM_OPTIONS, OptionLabel, ParseLabelError, Question, TestQuestion};

/// Screen the terminal test runner is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
