use crate::models::{NUM_OPTIONS, OptionLabel, Question};

use super::{BLOCK_DELIMITER, CORRECT_MARK, OPTION_MARKER};

/// How to treat a block with more than one `====#` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkPolicy {
    /// The last marked choice becomes the correct answer.
    #[default]
    LastWins,
    /// The block is dropped.
    Strict,
}

/// Why a block produced no question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropReason {
    #[error("block has no question text")]
    NoQuestionText,

    #[error("only {found} of 4 answer choices")]
    MissingOptions { found: usize },

    #[error("answer choice {0} is empty")]
    EmptyOption(OptionLabel),

    #[error("no choice is marked correct with ====#")]
    NoCorrectAnswer,

    #[error("{marks} choices are marked correct")]
    MultipleCorrectMarks { marks: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Accepted { order_number: u32 },
    Dropped(DropReason),
}

/// What happened to one non-blank block of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDiagnostic {
    /// 1-based position among the non-blank blocks.
    pub block_number: usize,
    pub question_text: Option<String>,
    pub outcome: BlockOutcome,
    /// Choice lines past the fourth.
    pub ignored_options: usize,
    /// Number of `====#` lines among the first four choices.
    pub marks: usize,
}

impl BlockDiagnostic {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, BlockOutcome::Accepted { .. })
    }

    pub fn drop_reason(&self) -> Option<&DropReason> {
        match &self.outcome {
            BlockOutcome::Dropped(reason) => Some(reason),
            BlockOutcome::Accepted { .. } => None,
        }
    }

    /// Accepted, but something in the block was silently discarded.
    pub fn has_warnings(&self) -> bool {
        self.is_accepted() && (self.ignored_options > 0 || self.marks > 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub questions: Vec<Question>,
    pub blocks: Vec<BlockDiagnostic>,
}

impl DecodeReport {
    pub fn dropped(&self) -> impl Iterator<Item = &BlockDiagnostic> {
        self.blocks.iter().filter(|block| !block.is_accepted())
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped().count()
    }
}

pub fn decode(raw_text: &str) -> Vec<Question> {
    decode_report(raw_text).questions
}

pub fn decode_report(raw_text: &str) -> DecodeReport {
    decode_with(raw_text, MarkPolicy::default())
}

pub fn decode_with(raw_text: &str, policy: MarkPolicy) -> DecodeReport {
    let mut report = DecodeReport::default();

    let blocks = raw_text
        .split(BLOCK_DELIMITER)
        .filter(|block| !block.trim().is_empty());

    for (index, block) in blocks.enumerate() {
        let parsed = ParsedBlock::parse(block);
        let next_order = report.questions.len() as u32 + 1;
        let question_text = parsed.question_text.map(str::to_string);
        let (ignored_options, marks) = (parsed.ignored_options, parsed.marks);

        let outcome = match parsed.into_question(policy, next_order) {
            Ok(question) => {
                report.questions.push(question);
                BlockOutcome::Accepted {
                    order_number: next_order,
                }
            }
            Err(reason) => BlockOutcome::Dropped(reason),
        };

        report.blocks.push(BlockDiagnostic {
            block_number: index + 1,
            question_text,
            outcome,
            ignored_options,
            marks,
        });
    }

    report
}

struct ParsedBlock<'a> {
    question_text: Option<&'a str>,
    options: Vec<&'a str>,
    correct_answer: Option<OptionLabel>,
    marks: usize,
    ignored_options: usize,
}

impl<'a> ParsedBlock<'a> {
    fn parse(block: &'a str) -> Self {
        let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());

        let mut parsed = Self {
            question_text: lines.next(),
            options: Vec::with_capacity(NUM_OPTIONS),
            correct_answer: None,
            marks: 0,
            ignored_options: 0,
        };

        for line in lines {
            let Some(rest) = line.strip_prefix(OPTION_MARKER) else {
                continue;
            };

            let Some(label) = OptionLabel::from_index(parsed.options.len()) else {
                parsed.ignored_options += 1;
                continue;
            };

            let (is_correct, content) = match rest.strip_prefix(CORRECT_MARK) {
                Some(content) => (true, content),
                None => (false, rest),
            };

            parsed.options.push(content.trim());
            if is_correct {
                parsed.marks += 1;
                parsed.correct_answer = Some(label);
            }
        }

        parsed
    }

    fn into_question(self, policy: MarkPolicy, order_number: u32) -> Result<Question, DropReason> {
        let question_text = self
            .question_text
            .filter(|text| !text.is_empty())
            .ok_or(DropReason::NoQuestionText)?;

        let options: [&str; NUM_OPTIONS] =
            self.options
                .as_slice()
                .try_into()
                .map_err(|_| DropReason::MissingOptions {
                    found: self.options.len(),
                })?;

        if let Some(index) = options.iter().position(|option| option.is_empty()) {
            let label = OptionLabel::ALL[index];
            return Err(DropReason::EmptyOption(label));
        }

        let correct_answer = self.correct_answer.ok_or(DropReason::NoCorrectAnswer)?;

        if policy == MarkPolicy::Strict && self.marks > 1 {
            return Err(DropReason::MultipleCorrectMarks { marks: self.marks });
        }

        Ok(Question {
            question_text: question_text.to_string(),
            options: options.map(str::to_string),
            correct_answer,
            order_number,
        })
    }
}
