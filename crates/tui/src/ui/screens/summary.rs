use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Panel, StatPanel},
            money,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Error banner
            Constraint::Length(4), // Balance
            Constraint::Length(7), // Cards
            Constraint::Min(5),    // Recent transactions
        ])
        .split(area);

    // A failed fetch keeps whatever data was already on screen; the banner
    // is the only signal.
    if let Some(message) = &state.summary.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[0],
        );
    }

    render_balance(frame, layout[1], state, &theme);
    render_cards(frame, layout[2], state, &theme);
    render_transactions(frame, layout[3], state, &theme);
}

fn render_balance(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let balance = state
        .summary
        .account
        .as_ref()
        .map(|account| account.balance_cents)
        .unwrap_or(0);

    let mut panel = StatPanel::new("Account Balance", money::format_cents(balance), theme);
    if let Some(account) = &state.summary.account {
        panel = panel.subtitle(format!("{} · {}", account.name, account.email));
    }
    panel.render(frame, area);
}

fn render_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let panel = Panel::new("Cards", theme);
    let inner = panel.inner(area);
    panel.render_frame(frame, area);

    let items: Vec<ListItem> = state
        .summary
        .cards
        .iter()
        .take(inner.height as usize)
        .map(|card| {
            let badge = if card.is_active {
                Span::styled("Active", Style::default().fg(theme.positive))
            } else {
                Span::styled("Inactive", Style::default().fg(theme.negative))
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("•••• {}  ", card.last4_digits),
                    Style::default().fg(theme.text),
                ),
                badge,
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No cards issued yet",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
    } else {
        frame.render_widget(List::new(items), inner);
    }
}

fn render_transactions(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let panel = Panel::new("Recent Transactions", theme);
    let inner = panel.inner(area);
    panel.render_frame(frame, area);

    let items: Vec<ListItem> = state
        .summary
        .transactions
        .iter()
        .take(inner.height as usize)
        .map(|tx| {
            let date = tx.created_at.format("%d %b").to_string();
            let amount = money::format_cents(tx.amount_cents);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{date:<8}"), Style::default().fg(theme.dim)),
                Span::styled(format!("{:<20}", tx.merchant), Style::default().fg(theme.text)),
                Span::styled(format!("{amount:>10}  "), Style::default().fg(theme.text)),
                Span::styled(format!("MCC {}  ", tx.mcc), Style::default().fg(theme.dim)),
                money::verdict_span(tx.is_approved, tx.rejection_reason.as_deref(), theme),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No transactions yet",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
    } else {
        frame.render_widget(List::new(items), inner);
    }
}
