//! Fund name normalization.
//!
//! Names scraped over several years arrive with a mix of dash characters,
//! non-breaking spaces and mojibake. Two spellings of the same fund must
//! compare equal before facts can be joined across snapshots.

/// Normalizes dash variants and stray encoding artifacts in a fund name.
///
/// ```rust
/// use peerscope_core::names::normalize_fund_name;
///
/// assert_eq!(normalize_fund_name("Alpha \u{2013} Asia"), "Alpha - Asia");
/// assert_eq!(normalize_fund_name("Alpha ? Asia"), "Alpha - Asia");
/// ```
#[must_use]
pub fn normalize_fund_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| match c {
            '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{FFFD}' => '-',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect();

    // en-dash stored through a lossy codepage
    if out.contains(" ? ") {
        out = out.replace(" ? ", " - ");
    }
    out
}
