//! The `practicum check` command.

use std::path::Path;

use anyhow::Result;
use practicum::Config;
use practicum::codec::{self, BlockDiagnostic, BlockOutcome};
use practicum::data::load_test_text;

pub fn execute(file: &Path, config: &Config) -> Result<()> {
    let text = load_test_text(file)?;
    let report = codec::decode_with(&text, config.mark_policy());

    for block in &report.blocks {
        println!("{}", describe(block));
    }
    println!(
        "\n{} question(s) accepted, {} block(s) dropped.",
        report.questions.len(),
        report.dropped_count()
    );

    config.gate().admit(report)?;
    println!("Test is ready to save.");
    Ok(())
}

fn describe(block: &BlockDiagnostic) -> String {
    let title = block.question_text.as_deref().unwrap_or("(no question text)");
    let mut line = match &block.outcome {
        BlockOutcome::Accepted { order_number } => {
            format!("  block {}: question {} - {}", block.block_number, order_number, title)
        }
        BlockOutcome::Dropped(reason) => {
            format!("  block {}: DROPPED ({}) - {}", block.block_number, reason, title)
        }
    };

    if block.has_warnings() {
        if block.ignored_options > 0 {
            line.push_str(&format!(
                "\n    WARNING: {} extra choice(s) ignored",
                block.ignored_options
            ));
        }
        if block.marks > 1 {
            line.push_str(&format!(
                "\n    WARNING: {} choices marked correct, the last one wins",
                block.marks
            ));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use practicum::codec::decode_report;

    #[test]
    fn test_describe_dropped_block() {
        let report = decode_report("+++++ Q1\n==== a\n==== b");
        let line = describe(&report.blocks[0]);
        assert!(line.contains("block 1: DROPPED"));
        assert!(line.contains("only 2 of 4 answer choices"));
    }

    #[test]
    fn test_describe_warns_about_marks() {
        let report = decode_report("+++++ Q1\n====# a\n==== b\n====# c\n==== d\n==== e");
        let line = describe(&report.blocks[0]);
        assert!(line.contains("question 1 - Q1"));
        assert!(line.contains("1 extra choice(s) ignored"));
        assert!(line.contains("2 choices marked correct"));
    }
}
