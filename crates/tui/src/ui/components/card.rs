use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded-border container used for every panel in the app.
pub struct Panel<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Panel<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    /// Focused panels get the accent border color.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// A panel showing one prominent value with an optional subtitle line.
pub struct StatPanel<'a> {
    title: &'a str,
    value: String,
    subtitle: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatPanel<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.into(),
            subtitle: None,
            theme,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            self.value.clone(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ))];

        if let Some(sub) = &self.subtitle {
            lines.push(Line::from(Span::styled(
                sub.clone(),
                Style::default().fg(self.theme.dim),
            )));
        }

        Panel::new(self.title, self.theme).render_with(frame, area, Paragraph::new(lines));
    }
}
