use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats integer cents as dollars with exactly two decimal places.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Approved/declined badge for a transaction outcome. Declines carry the
/// server's rejection reason; approvals never render a reason.
#[must_use]
pub fn verdict_span(is_approved: bool, reason: Option<&str>, theme: &Theme) -> Span<'static> {
    if is_approved {
        Span::styled("Approved", Style::default().fg(theme.positive))
    } else {
        let reason = reason.unwrap_or("unknown");
        Span::styled(
            format!("Declined ({reason})"),
            Style::default().fg(theme.negative),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(1250), "$12.50");
        assert_eq!(format_cents(-980), "-$9.80");
    }
}
