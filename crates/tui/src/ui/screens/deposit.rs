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
            Constraint::Length(5), // Form
            Constraint::Length(1), // Error line
            Constraint::Min(0),
        ])
        .split(area);

    let deposit = &state.deposit;
    let lines = vec![
        Line::from(vec![
            Span::styled("$ ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{}│", deposit.amount),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(Span::styled(
            "Enter to deposit",
            Style::default().fg(theme.dim),
        )),
    ];
    Panel::new("Deposit Funds", &theme)
        .focused(true)
        .render_with(frame, layout[0], Paragraph::new(lines));

    if let Some(message) = &deposit.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }
}
