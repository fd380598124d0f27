use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::OptionLabel;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_summary(frame, chunks[1], app);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    match app.outcome() {
        Some(outcome) => {
            let score = outcome.result.score;
            let percentage = if outcome.total > 0 {
                score as f64 / outcome.total as f64 * 100.0
            } else {
                0.0
            };
            content.push(Line::from(Span::styled(
                format!("{} / {}  ({:.0}%)", score, outcome.total, percentage),
                Style::default().fg(grade_color(percentage)).bold(),
            )));
            content.push(if outcome.passed {
                Line::from("passed".fg(Color::Green))
            } else {
                Line::from("not passed".fg(Color::Red))
            });
            if let Some(lecture) = &outcome.unlocked_lecture {
                content.push(Line::from(Span::styled(
                    format!("unlocked: {}", lecture.title),
                    Style::default().fg(Color::Green),
                )));
            }
            if let Some(next) = &outcome.next_practical {
                content.push(Line::from(Span::styled(
                    format!("next up: {}", next.title),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => content.push(Line::from("saving...".fg(Color::DarkGray))),
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .answers()
        .iter()
        .zip(app.questions().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let is_correct = *answer == Some(question.correct_answer);
            let (symbol, color) = if is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.question),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {} → {}", answer_label(*answer), question.correct_answer),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn answer_label(answer: Option<OptionLabel>) -> String {
    answer.map_or_else(|| "-".to_string(), |label| label.to_string())
}

fn truncate_question(text: &str) -> String {
    if text.chars().count() > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retake  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let preview = truncate_question(&long);
        assert_eq!(preview.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_grade_color_bands() {
        assert_eq!(grade_color(100.0), Color::Green);
        assert_eq!(grade_color(70.0), Color::Cyan);
        assert_eq!(grade_color(60.0), Color::Yellow);
        assert_eq!(grade_color(10.0), Color::Red);
    }

    #[test]
    fn test_unanswered_label() {
        assert_eq!(answer_label(None), "-");
        assert_eq!(answer_label(Some(OptionLabel::C)), "C");
    }
}
