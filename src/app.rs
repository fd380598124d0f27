use crate::models::{AppState, NUM_OPTIONS, OptionLabel, Practical, TestQuestion};
use crate::service::grading::{Selections, TestOutcome};

/// State of one student working through a practical's test.
pub struct App {
    pub state: AppState,
    practical: Practical,
    questions: Vec<TestQuestion>,
    current_question_index: usize,
    selected_option: usize,
    answers: Vec<Option<OptionLabel>>,
    result_scroll: usize,
    outcome: Option<TestOutcome>,
}

impl App {
    pub fn new(practical: Practical, questions: Vec<TestQuestion>) -> Self {
        let num_questions = questions.len();

        Self {
            state: AppState::Welcome,
            practical,
            questions,
            current_question_index: 0,
            selected_option: 0,
            answers: vec![None; num_questions],
            result_scroll: 0,
            outcome: None,
        }
    }

    pub fn practical(&self) -> &Practical {
        &self.practical
    }

    pub fn current_question(&self) -> Option<&TestQuestion> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> OptionLabel {
        OptionLabel::ALL[self.selected_option]
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<OptionLabel>] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&TestOutcome> {
        self.outcome.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Finished answering but not yet recorded.
    pub fn awaiting_submission(&self) -> bool {
        self.state == AppState::Result && self.outcome.is_none()
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    pub fn select_label(&mut self, label: OptionLabel) {
        self.selected_option = label.index();
    }

    pub fn start_test(&mut self) {
        self.state = if self.questions.is_empty() {
            AppState::Result
        } else {
            AppState::Quiz
        };
    }

    pub fn submit_answer(&mut self) {
        let label = self.selected_option();
        if let Some(answer) = self.answers.get_mut(self.current_question_index) {
            *answer = Some(label);
        }
        self.current_question_index += 1;
        self.selected_option = 0;

        if self.current_question_index >= self.questions.len() {
            self.state = AppState::Result;
        }
    }

    /// The answers in the shape the grader takes.
    pub fn selections(&self) -> Selections {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .filter_map(|(question, answer)| answer.map(|label| (question.id, label)))
            .collect()
    }

    pub fn record_outcome(&mut self, outcome: TestOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.answers = vec![None; self.questions.len()];
        self.result_scroll = 0;
        self.outcome = None;
    }
}
