use crate::models::{OptionLabel, Question, TestQuestion};

use super::{BLOCK_DELIMITER, CORRECT_MARK, OPTION_MARKER};

pub fn encode(questions: &[Question]) -> String {
    questions
        .iter()
        .map(encode_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Encodes stored rows in `order_number` order.
pub fn encode_records(rows: &[TestQuestion]) -> String {
    let mut questions: Vec<Question> = rows.iter().map(Question::from).collect();
    questions.sort_by_key(|question| question.order_number);
    encode(&questions)
}

fn encode_block(question: &Question) -> String {
    let mut lines = Vec::with_capacity(1 + OptionLabel::ALL.len());
    lines.push(format!("{} {}", BLOCK_DELIMITER, question.question_text));

    for label in OptionLabel::ALL {
        let mark = if question.is_correct(label) {
            CORRECT_MARK.to_string()
        } else {
            String::new()
        };
        lines.push(format!("{}{} {}", OPTION_MARKER, mark, question.option(label)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use uuid::Uuid;

    fn question(text: &str, options: [&str; 4], correct: OptionLabel) -> Question {
        Question {
            question_text: text.to_string(),
            options: options.map(str::to_string),
            correct_answer: correct,
            order_number: 1,
        }
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode_records(&[]), "");
    }

    #[test]
    fn test_encode_single_question() {
        let text = encode(&[question("Q1", ["a", "b", "c", "d"], OptionLabel::C)]);
        assert_eq!(text, "+++++ Q1\n==== a\n==== b\n====# c\n==== d");
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let text = encode(&[
            question("Q1", ["a", "b", "c", "d"], OptionLabel::A),
            question("Q2", ["e", "f", "g", "h"], OptionLabel::D),
        ]);
        assert_eq!(
            text,
            "+++++ Q1\n====# a\n==== b\n==== c\n==== d\n\n+++++ Q2\n==== e\n==== f\n==== g\n====# h"
        );
    }

    #[test]
    fn test_decode_restores_encoded_questions() {
        let questions: Vec<Question> = OptionLabel::ALL
            .iter()
            .enumerate()
            .map(|(i, label)| Question {
                question_text: format!("What is {} squared?", i + 2),
                options: [
                    format!("{}", i),
                    format!("{}", (i + 2) * (i + 2)),
                    "I don't know".to_string(),
                    "x = 4 # comment".to_string(),
                ],
                correct_answer: *label,
                order_number: i as u32 + 1,
            })
            .collect();

        let decoded = decode(&encode(&questions));
        assert_eq!(decoded, questions);
    }

    #[test]
    fn test_records_encoded_in_order() {
        let practical_id = Uuid::new_v4();
        let mut second = TestQuestion::new(
            practical_id,
            question("Second", ["a", "b", "c", "d"], OptionLabel::B),
        );
        second.order_number = 2;
        let first = TestQuestion::new(
            practical_id,
            question("First", ["a", "b", "c", "d"], OptionLabel::A),
        );

        let text = encode_records(&[second, first]);
        assert!(text.starts_with("+++++ First\n====# a"));
        assert!(text.ends_with("+++++ Second\n==== a\n====# b\n==== c\n==== d"));
    }
}
