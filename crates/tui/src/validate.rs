use thiserror::Error;

/// Client-detected input failures. These are resolved locally and never
/// reach the network or the logs. The `Display` strings double as the
/// user-facing messages.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("No negative or zero amount allowed.")]
    InvalidAmount,
    #[error("MCC must be 4 digits.")]
    InvalidCategoryCode,
    #[error("Please select a card.")]
    MissingCard,
    #[error("Please enter a merchant name.")]
    MissingMerchant,
}

/// Keystroke filter for monetary input: an optional integer part followed
/// by at most two decimal digits. `12`, `12.`, `.5` and the empty string
/// all pass; anything else must not reach the buffer.
pub fn amount_accepts(text: &str) -> bool {
    let (int_part, frac) = match text.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (text, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac {
        None => true,
        Some(frac) => frac.len() <= 2 && frac.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// Applies one keystroke to a monetary buffer. A character that would break
/// the filter shape leaves the buffer unchanged. Returns whether the
/// keystroke was accepted.
pub fn push_amount_char(buf: &mut String, ch: char) -> bool {
    buf.push(ch);
    if amount_accepts(buf) {
        true
    } else {
        buf.pop();
        false
    }
}

/// Submit-time parse of an accumulated amount string into integer cents.
///
/// Requires a finite value strictly greater than zero. Cents are the value
/// multiplied by 100 and rounded to the nearest integer, ties away from
/// zero (`f64::round`).
pub fn parse_amount_cents(raw: &str) -> Result<i64, ValidationError> {
    let value: f64 = if raw.is_empty() {
        0.0
    } else {
        raw.parse().map_err(|_| ValidationError::InvalidAmount)?
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok((value * 100.0).round() as i64)
}

/// Keystroke filter for the 4-digit category code: non-digits are dropped
/// and a fifth digit is ignored, so the buffer only ever holds up to four
/// digits.
pub fn push_mcc_char(buf: &mut String, ch: char) {
    if ch.is_ascii_digit() && buf.len() < 4 {
        buf.push(ch);
    }
}

/// Submit-time check that a category code is exactly 4 digits.
pub fn mcc_complete(raw: &str) -> Result<(), ValidationError> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCategoryCode)
    }
}

/// Shape check for `local@domain.tld`: no whitespace, a single `@` with a
/// non-empty local part, and at least one `.` inside the domain with
/// characters on both sides.
pub fn email(raw: &str) -> Result<(), ValidationError> {
    if raw.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, ch)| ch == '.' && i > 0 && i + 1 < domain.len());
    if has_inner_dot {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Trimmed, non-empty text.
pub fn required(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_filter_accepts_partial_input() {
        for ok in ["", "1", "12", "12.", "12.3", "12.34", ".", ".5", ".50", "0"] {
            assert!(amount_accepts(ok), "{ok:?} should pass the filter");
        }
        for bad in ["12.345", "a", "1a", "-1", "+1", "1.2.3", "1,5", " 1"] {
            assert!(!amount_accepts(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejected_keystrokes_leave_buffer_unchanged() {
        let mut buf = String::from("12.5");
        push_amount_char(&mut buf, 'x');
        assert_eq!(buf, "12.5");
        push_amount_char(&mut buf, '0');
        assert_eq!(buf, "12.50");
        push_amount_char(&mut buf, '1');
        assert_eq!(buf, "12.50");
    }

    #[test]
    fn amounts_convert_to_cents() {
        assert_eq!(parse_amount_cents("12.5"), Ok(1250));
        assert_eq!(parse_amount_cents("0.01"), Ok(1));
        assert_eq!(parse_amount_cents("7"), Ok(700));
        assert_eq!(parse_amount_cents("99.99"), Ok(9999));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for bad in ["", "0", "0.00", ".", "abc"] {
            assert_eq!(parse_amount_cents(bad), Err(ValidationError::InvalidAmount), "{bad:?}");
        }
    }

    #[test]
    fn mcc_filter_keeps_at_most_four_digits() {
        let mut buf = String::new();
        for ch in ['1', '2', 'a', '3', '4', '5'] {
            push_mcc_char(&mut buf, ch);
        }
        assert_eq!(buf, "1234");
    }

    #[test]
    fn mcc_submit_requires_exactly_four_digits() {
        assert!(mcc_complete("5912").is_ok());
        assert!(mcc_complete("0042").is_ok());
        assert_eq!(mcc_complete("591"), Err(ValidationError::InvalidCategoryCode));
        assert_eq!(mcc_complete(""), Err(ValidationError::InvalidCategoryCode));
    }

    #[test]
    fn email_requires_local_domain_and_tld() {
        for ok in ["a@b.c", "user@example.com", "x.y@mail.co.uk"] {
            assert!(email(ok).is_ok(), "{ok:?}");
        }
        for bad in ["", "plain", "a@b", "a@.c", "a@b.", "a b@c.d", "@b.c"] {
            assert_eq!(email(bad), Err(ValidationError::InvalidEmail), "{bad:?}");
        }
    }

    #[test]
    fn required_trims_whitespace() {
        assert_eq!(required("  Ada  "), Ok("Ada"));
        assert_eq!(required("   "), Err(ValidationError::MissingField));
    }
}
