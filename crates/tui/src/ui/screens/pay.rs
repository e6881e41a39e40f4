use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::{AppState, PayField},
    ui::{components::card::Panel, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Form
            Constraint::Length(1),  // Error line
            Constraint::Length(3),  // Result panel
            Constraint::Min(0),
        ])
        .split(area);

    let panel = Panel::new("Make a Transaction", &theme).focused(true);
    let inner = panel.inner(layout[0]);
    panel.render_frame(frame, layout[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Card selector
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Merchant
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // MCC
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Amount
        ])
        .margin(1)
        .split(inner);

    let pay = &state.pay;

    render_card_selector(frame, rows[0], state, &theme);
    render_field(
        frame,
        rows[2],
        "Merchant",
        &pay.merchant,
        pay.focus == PayField::Merchant,
        &theme,
    );
    render_field(
        frame,
        rows[4],
        "MCC",
        &pay.mcc,
        pay.focus == PayField::Mcc,
        &theme,
    );
    render_field(
        frame,
        rows[6],
        "Amount",
        &format!("$ {}", pay.amount),
        pay.focus == PayField::Amount,
        &theme,
    );

    if let Some(message) = &pay.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }

    render_result(frame, layout[2], state, &theme);
}

fn render_card_selector(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let pay = &state.pay;
    let focused = pay.focus == PayField::Card;

    let selection = match pay.selected_index() {
        Some(index) => {
            let option = &pay.options[index];
            format!("•••• {}  ({}/{})", option.last4, index + 1, pay.options.len())
        }
        None if pay.options.is_empty() => "no cards issued yet".to_string(),
        None => "select with ↑/↓".to_string(),
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<10}", "Card"), Style::default().fg(theme.dim)),
        Span::styled(selection, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_field(
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
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{value}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_result(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(result) = &state.pay.result else {
        return;
    };

    let (text, color) = if result.is_approved {
        ("✓ Transaction approved".to_string(), theme.positive)
    } else {
        let reason = result.rejection_reason.as_deref().unwrap_or("unknown");
        (format!("✗ Declined: {reason}"), theme.negative)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(Line::from(text))
            .style(Style::default().fg(color))
            .block(block),
        area,
    );
}
