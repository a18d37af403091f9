//! Bloomberg ticker and field conventions.

/// Extracts the exchange code from a ticker shaped `<symbol> <exchange> Equity`.
///
/// ```rust
/// use peerscope_ext_file::extract_exchange_code;
///
/// assert_eq!(extract_exchange_code("HDFCB IN Equity"), Some("IN"));
/// assert_eq!(extract_exchange_code("USD Curncy"), None);
/// ```
#[must_use]
pub fn extract_exchange_code(ticker: &str) -> Option<&str> {
    let parts: Vec<&str> = ticker.split_whitespace().collect();
    match parts.as_slice() {
        [.., exchange, "Equity"] if parts.len() >= 3 => Some(*exchange),
        _ => None,
    }
}

/// True for currency lines (`... Curncy`).
#[must_use]
pub fn is_cash_ticker(ticker: &str) -> bool {
    ticker.contains("Curncy")
}

/// True for tickers Bloomberg could not resolve.
#[must_use]
pub fn is_unresolved(value: &str) -> bool {
    value.starts_with('#')
}

/// Parses a Bloomberg market cap string into USD millions.
///
/// Suffixes `T`, `B`, `M` and `K` scale to millions; a bare number is
/// already in millions. Error values such as `#N/A` give `None`.
///
/// ```rust
/// use peerscope_ext_file::parse_market_cap;
///
/// assert_eq!(parse_market_cap("21.22B"), Some(21_220.0));
/// assert_eq!(parse_market_cap("916.81M"), Some(916.81));
/// assert_eq!(parse_market_cap("#N/A Field Not Applicable"), None);
/// ```
#[must_use]
pub fn parse_market_cap(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || is_unresolved(raw) {
        return None;
    }
    let (number, scale) = match raw.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('T') => (&raw[..raw.len() - 1], 1_000_000.0),
        Some('B') => (&raw[..raw.len() - 1], 1_000.0),
        Some('M') => (&raw[..raw.len() - 1], 1.0),
        Some('K') => (&raw[..raw.len() - 1], 0.001),
        _ => (raw, 1.0),
    };
    number.trim().parse::<f64>().ok().map(|v| v * scale)
}

/// Parses a weight or percentage cell, tolerating a trailing `%`.
#[must_use]
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_suffix('%').unwrap_or(raw).trim();
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a flag cell: `1`, `true`, `yes` or `y` (any case) are true.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_exchange_code() {
        assert_eq!(extract_exchange_code("700 HK Equity"), Some("HK"));
        assert_eq!(extract_exchange_code("BRK/B US Equity"), Some("US"));
        assert_eq!(extract_exchange_code("HK Equity"), None);
        assert_eq!(extract_exchange_code("XYZ IN Index"), None);
    }

    #[test]
    fn test_parse_market_cap() {
        assert_eq!(parse_market_cap("1.5T"), Some(1_500_000.0));
        assert_eq!(parse_market_cap("2.5b"), Some(2_500.0));
        assert_eq!(parse_market_cap("500K"), Some(0.5));
        assert_eq!(parse_market_cap("1234.5"), Some(1234.5));
        assert_eq!(parse_market_cap(""), None);
        assert_eq!(parse_market_cap("abcB"), None);
    }

    #[test]
    fn test_parse_percentage_and_flag() {
        assert_eq!(parse_percentage(" 4.25% "), Some(4.25));
        assert_eq!(parse_percentage("-0.3"), Some(-0.3));
        assert_eq!(parse_percentage("n/a"), None);
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_cash() {
        assert!(is_cash_ticker("USD Curncy"));
        assert!(!is_cash_ticker("HDFCB IN Equity"));
    }
}
