use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, RegisterField},
    ui::theme::Theme,
};

/// Centered rect for the registration box.
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let box_width = 46;
    let box_height = 9;
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" create your HSA account ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status line
        ])
        .margin(1)
        .split(inner);

    let register = &state.register;

    render_input(
        frame,
        rows[0],
        "Name",
        &register.name,
        register.focus == RegisterField::Name,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "Email",
        &register.email,
        register.focus == RegisterField::Email,
        &theme,
    );

    let status = if register.submitting {
        Span::styled("Creating...", Style::default().fg(theme.dim))
    } else if register.can_submit() {
        Span::styled("Enter to create account", Style::default().fg(theme.accent))
    } else {
        Span::styled("Tab switches fields", Style::default().fg(theme.dim))
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        rows[4],
    );

    // Error message below the box (only shown when there's one).
    if let Some(message) = &register.error {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
