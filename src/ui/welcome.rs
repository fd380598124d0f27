use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let practical = app.practical();
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("PRACTICAL {}", practical.order_number),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            practical.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions · your last attempt counts", app.total_questions()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if app.total_questions() == 0 {
        content.push(Line::from("This practical has no test yet".fg(Color::Yellow)));
    } else {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )));
        content.push(Line::from("to start · q to leave".fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
