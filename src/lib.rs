//! # practicum
//!
//! Course content and test plumbing for a small learning-management system.
//! Admins write each practical's test in a plain-text block format that the
//! [`codec`] turns into structured questions; students take those tests in
//! the terminal and the [`service`] layer records scores, unlocks lectures
//! and ranks students.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use practicum::{GradingPolicy, MemoryRepository, Repository, TestSession};
//!
//! fn main() -> practicum::Result<()> {
//!     let mut repo = MemoryRepository::demo();
//!     let student = repo.students()?[0].id;
//!     let practical = repo.practicals()?[0].id;
//!
//!     let session = TestSession::open(&mut repo, GradingPolicy::default(), student, practical)?;
//!     if let Some(outcome) = session.run()? {
//!         println!("scored {}/{}", outcome.result.score, outcome.total);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod gate;
pub mod models;
pub mod service;
pub mod terminal;
mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use uuid::Uuid;

pub use app::App;
pub use codec::{MarkPolicy, decode, encode};
pub use config::Config;
pub use data::{JsonRepository, MemoryRepository, RepoError, Repository};
pub use error::{PracticumError, Result};
pub use gate::{AcceptanceGate, GateError};
pub use models::{AppState, OptionLabel, Question, TestQuestion};
pub use service::grading::{GradingPolicy, TestOutcome};

use crate::service::grading;

/// One student taking one practical's test in the terminal.
pub struct TestSession<'r, R: Repository + ?Sized> {
    repo: &'r mut R,
    policy: GradingPolicy,
    student_id: Uuid,
    app: App,
    last_outcome: Option<TestOutcome>,
}

impl<'r, R: Repository + ?Sized> TestSession<'r, R> {
    /// Loads the practical and its questions. Fails if either the practical
    /// or the student is unknown.
    pub fn open(
        repo: &'r mut R,
        policy: GradingPolicy,
        student_id: Uuid,
        practical_id: Uuid,
    ) -> Result<Self> {
        let practical = repo
            .practical(practical_id)?
            .ok_or(RepoError::not_found("practical", practical_id))?;
        if repo.profile(student_id)?.is_none() {
            return Err(RepoError::not_found("student", student_id).into());
        }
        let questions = repo.test_questions(practical_id)?;

        Ok(Self {
            repo,
            policy,
            student_id,
            app: App::new(practical, questions),
            last_outcome: None,
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Takes over the terminal until the student quits. Returns the outcome
    /// of the last recorded attempt, if any.
    pub fn run(mut self) -> Result<Option<TestOutcome>> {
        let mut guard = terminal::TerminalGuard::enter()?;
        self.event_loop(guard.terminal())?;
        drop(guard);
        Ok(self.last_outcome)
    }

    fn event_loop(&mut self, terminal: &mut terminal::AppTerminal) -> Result<()> {
        loop {
            if self.app.awaiting_submission() && self.app.total_questions() > 0 {
                self.submit()?;
            }

            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(&mut self.app, key.code) {
                    break;
                }
            }
        }

        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        let outcome = grading::submit_test(
            &mut *self.repo,
            &self.policy,
            self.student_id,
            self.app.practical().id,
            &self.app.selections(),
        )?;
        self.last_outcome = Some(outcome.clone());
        self.app.record_outcome(outcome);
        Ok(())
    }
}

/// Returns true if the session should end.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return true;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
    false
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Enter && app.total_questions() > 0 {
        app.start_test();
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char(c) => {
            if let Ok(label) = c.to_string().parse::<OptionLabel>() {
                app.select_label(label);
            }
        }
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_session(repo: &mut MemoryRepository) -> TestSession<'_, MemoryRepository> {
        let student = repo.students().unwrap()[0].id;
        let practical = repo.practicals().unwrap()[0].id;
        TestSession::open(repo, GradingPolicy::default(), student, practical).unwrap()
    }

    #[test]
    fn test_open_loads_questions() {
        let mut repo = MemoryRepository::demo();
        let session = demo_session(&mut repo);
        assert_eq!(session.app().total_questions(), 10);
        assert_eq!(session.app().state, AppState::Welcome);
    }

    #[test]
    fn test_open_unknown_practical() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let result = TestSession::open(
            &mut repo,
            GradingPolicy::default(),
            student,
            Uuid::new_v4(),
        );
        assert!(matches!(
            result,
            Err(PracticumError::Repo(RepoError::NotFound { kind: "practical", .. }))
        ));
    }

    #[test]
    fn test_keys_drive_the_session() {
        let mut repo = MemoryRepository::demo();
        let mut session = demo_session(&mut repo);
        let app = &mut session.app;

        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        handle_input(app, KeyCode::Char('c'));
        assert_eq!(app.selected_option(), OptionLabel::C);
        handle_input(app, KeyCode::Down);
        assert_eq!(app.selected_option(), OptionLabel::D);

        for _ in 0..10 {
            handle_input(app, KeyCode::Enter);
        }
        assert!(app.awaiting_submission());
        assert!(handle_input(app, KeyCode::Char('q')));
    }

    #[test]
    fn test_submit_records_result() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let practical = repo.practicals().unwrap()[0].id;
        {
            let mut session =
                TestSession::open(&mut repo, GradingPolicy::default(), student, practical)
                    .unwrap();
            session.app.start_test();
            let answers: Vec<OptionLabel> = session
                .app
                .questions()
                .iter()
                .map(|q| q.correct_answer)
                .collect();
            for label in answers {
                session.app.select_label(label);
                session.app.submit_answer();
            }
            session.submit().unwrap();
            assert!(session.app.outcome().is_some_and(|o| o.passed));
        }

        let result = repo.test_result(student, practical).unwrap().unwrap();
        assert_eq!(result.score, 10);
    }
}
