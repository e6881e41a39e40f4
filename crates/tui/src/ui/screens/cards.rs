use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    ui::{components::card::Panel, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Panel
            Constraint::Length(1), // Error line
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            "Issue a new virtual debit card linked to your HSA.",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::styled(" to issue", Style::default().fg(theme.dim)),
        ]),
    ];
    Panel::new("Virtual Card", &theme)
        .focused(true)
        .render_with(frame, layout[0], Paragraph::new(lines));

    if let Some(message) = &state.cards.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }
}
