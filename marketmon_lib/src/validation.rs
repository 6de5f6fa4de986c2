//! Input validation for user-supplied ticker lists.

use crate::error::MarketMonError;

pub const MAX_SYMBOL_LENGTH: usize = 12;

/// Validate a single ticker fragment: trim, uppercase, and restrict to the
/// character set real symbols use (letters, digits, `.` `^` `=` `-`).
pub fn validate_symbol(input: &str) -> Result<String, MarketMonError> {
    let upper = input.trim().to_uppercase();
    if upper.is_empty() {
        return Err(MarketMonError::InvalidInput(
            "ticker symbol is empty".to_string(),
        ));
    }
    if upper.len() > MAX_SYMBOL_LENGTH {
        return Err(MarketMonError::InvalidInput(format!(
            "ticker '{}' exceeds maximum length of {} characters",
            upper, MAX_SYMBOL_LENGTH
        )));
    }
    if !upper
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-'))
    {
        return Err(MarketMonError::InvalidInput(format!(
            "ticker '{}' contains invalid characters. Expected letters, digits, '.', '^', '=' or '-'",
            upper
        )));
    }
    Ok(upper)
}

/// Parse a free-text, comma-separated ticker list into normalized symbols.
///
/// Fragments are trimmed and uppercased; order is preserved and duplicates
/// are kept. Empty fragments (doubled or trailing commas) are dropped. An
/// input with no symbols at all is a configuration error: the caller must
/// not start per-ticker processing.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, MarketMonError> {
    let mut symbols = Vec::new();
    for fragment in input.split(',') {
        if fragment.trim().is_empty() {
            continue;
        }
        symbols.push(validate_symbol(fragment)?);
    }
    if symbols.is_empty() {
        return Err(MarketMonError::InvalidInput(
            "enter at least one ticker symbol".to_string(),
        ));
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Ticker list parsing --

    #[test]
    fn tickers_trimmed_and_uppercased() {
        assert_eq!(
            parse_tickers("aapl, MSFT ,  googl").unwrap(),
            vec!["AAPL", "MSFT", "GOOGL"]
        );
    }

    #[test]
    fn tickers_preserve_order_and_duplicates() {
        assert_eq!(
            parse_tickers("SPY,AAPL,SPY").unwrap(),
            vec!["SPY", "AAPL", "SPY"]
        );
    }

    #[test]
    fn tickers_single_symbol() {
        assert_eq!(parse_tickers("nvda").unwrap(), vec!["NVDA"]);
    }

    #[test]
    fn tickers_empty_fragments_dropped() {
        assert_eq!(parse_tickers("AAPL,,MSFT,").unwrap(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn tickers_empty_input_rejected() {
        assert!(parse_tickers("").is_err());
    }

    #[test]
    fn tickers_whitespace_only_rejected() {
        assert!(parse_tickers("   ").is_err());
    }

    #[test]
    fn tickers_separators_only_rejected() {
        assert!(parse_tickers(",, ,").is_err());
    }

    // -- Symbol validation --

    #[test]
    fn symbol_index_and_class_notation() {
        assert_eq!(validate_symbol("^gspc").unwrap(), "^GSPC");
        assert_eq!(validate_symbol("brk.b").unwrap(), "BRK.B");
        assert_eq!(validate_symbol("eurusd=x").unwrap(), "EURUSD=X");
    }

    #[test]
    fn symbol_control_chars_rejected() {
        assert!(validate_symbol("AA\x00PL").is_err());
    }

    #[test]
    fn symbol_spaces_inside_rejected() {
        assert!(validate_symbol("AA PL").is_err());
    }

    #[test]
    fn symbol_too_long_rejected() {
        let long = "A".repeat(MAX_SYMBOL_LENGTH + 1);
        assert!(validate_symbol(&long).is_err());
    }

    #[test]
    fn symbol_max_length_accepted() {
        let max = "A".repeat(MAX_SYMBOL_LENGTH);
        assert_eq!(validate_symbol(&max).unwrap(), max);
    }
}
