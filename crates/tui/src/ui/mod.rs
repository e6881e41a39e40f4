pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Register => screens::register::render(frame, area, state),
        Screen::Home => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Info bar, tab bar, content, bottom hints.
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Summary => screens::summary::render(frame, layout[2], state),
        Section::Deposit => screens::deposit::render(frame, layout[2], state),
        Section::Cards => screens::cards::render(frame, layout[2], state),
        Section::Pay => screens::pay::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let account = state
        .account_id
        .map(|id| format!("Account #{id}"))
        .unwrap_or_else(|| "Guest".to_string());
    let balance = state
        .summary
        .account
        .as_ref()
        .map(|account| components::money::format_cents(account.balance_cents))
        .unwrap_or_else(|| "$0.00".to_string());

    let line = Line::from(vec![
        Span::styled(
            "HSA",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Account", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {account}  ")),
        Span::styled("Balance", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {balance}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("←/→", Style::default().fg(theme.accent)),
        Span::raw(" section"),
    ];

    let context = context_hints(state.section, theme);
    if !context.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Esc", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" clear"));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(section: Section, theme: &Theme) -> Vec<Span<'static>> {
    match section {
        Section::Summary => Vec::new(),
        Section::Deposit => vec![
            Span::raw("type amount  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" deposit"),
        ],
        Section::Cards => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" issue card"),
        ],
        Section::Pay => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" field  "),
            Span::styled("↑/↓", Style::default().fg(theme.accent)),
            Span::raw(" card  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" submit"),
        ],
    }
}
