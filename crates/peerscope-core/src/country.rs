//! Country resolution tables.
//!
//! Two sources feed the `country` field of an enriched holding:
//!
//! - the master-data country code (ISO 3166 alpha-2, as exported by Bloomberg)
//! - the exchange code embedded in a Bloomberg ticker (`"HDFCB IN Equity"` → `IN`)
//!
//! Exchange codes are not country codes: `CH` is China on Bloomberg but
//! Switzerland in ISO, and several exchanges share one country.

/// Resolves a Bloomberg exchange code to a display country name.
///
/// Returns `None` for unknown or empty codes.
#[must_use]
pub fn country_from_exchange(code: &str) -> Option<&'static str> {
    let name = match code.trim().to_ascii_uppercase().as_str() {
        "IN" | "IB" | "IS" => "India",
        "CH" | "C1" | "C2" | "CG" | "CS" => "China",
        "HK" => "Hong Kong",
        "KS" | "KQ" => "South Korea",
        "TT" | "TW" => "Taiwan",
        "SP" => "Singapore",
        "IJ" => "Indonesia",
        "MK" => "Malaysia",
        "TB" => "Thailand",
        "PM" => "Philippines",
        "VN" | "VH" => "Vietnam",
        "PA" => "Pakistan",
        "BD" => "Bangladesh",
        "SL" => "Sri Lanka",
        "JP" | "JT" => "Japan",
        "AU" | "AT" => "Australia",
        "NZ" => "New Zealand",
        "US" | "UN" | "UW" | "UQ" | "UA" | "UR" | "UF" | "UV" => "United States",
        "CN" | "CT" => "Canada",
        "BZ" | "BS" => "Brazil",
        "MM" | "MF" => "Mexico",
        "CI" => "Chile",
        "PE" => "Peru",
        "CB" => "Colombia",
        "AR" => "Argentina",
        "SJ" => "South Africa",
        "AB" => "Saudi Arabia",
        "UH" | "DU" | "DH" => "United Arab Emirates",
        "QD" => "Qatar",
        "KK" => "Kuwait",
        "EY" => "Egypt",
        "NL" => "Nigeria",
        "KN" => "Kenya",
        "PW" => "Poland",
        "TI" => "Turkey",
        "HB" => "Hungary",
        "CP" => "Czech Republic",
        "GA" => "Greece",
        "LN" => "United Kingdom",
        "GR" | "GY" => "Germany",
        "FP" => "France",
        "NA" => "Netherlands",
        "SW" | "SE" | "VX" => "Switzerland",
        "ID" => "Ireland",
        "IM" => "Italy",
        "SM" => "Spain",
        "SS" => "Sweden",
        "DC" => "Denmark",
        "NO" => "Norway",
        "FH" => "Finland",
        "BB" => "Belgium",
        "PL" => "Portugal",
        "AV" => "Austria",
        "LX" => "Luxembourg",
        _ => return None,
    };
    Some(name)
}

/// Resolves an ISO 3166 alpha-2 country code to a display country name.
///
/// Names match [`country_from_exchange`] so the two sources aggregate together.
#[must_use]
pub fn country_from_code(code: &str) -> Option<&'static str> {
    let name = match code.trim().to_ascii_uppercase().as_str() {
        "IN" => "India",
        "CN" => "China",
        "HK" => "Hong Kong",
        "KR" => "South Korea",
        "TW" => "Taiwan",
        "SG" => "Singapore",
        "ID" => "Indonesia",
        "MY" => "Malaysia",
        "TH" => "Thailand",
        "PH" => "Philippines",
        "VN" => "Vietnam",
        "PK" => "Pakistan",
        "BD" => "Bangladesh",
        "LK" => "Sri Lanka",
        "JP" => "Japan",
        "AU" => "Australia",
        "NZ" => "New Zealand",
        "US" => "United States",
        "CA" => "Canada",
        "BR" => "Brazil",
        "MX" => "Mexico",
        "CL" => "Chile",
        "PE" => "Peru",
        "CO" => "Colombia",
        "AR" => "Argentina",
        "ZA" => "South Africa",
        "SA" => "Saudi Arabia",
        "AE" => "United Arab Emirates",
        "QA" => "Qatar",
        "KW" => "Kuwait",
        "EG" => "Egypt",
        "NG" => "Nigeria",
        "KE" => "Kenya",
        "PL" => "Poland",
        "TR" => "Turkey",
        "HU" => "Hungary",
        "CZ" => "Czech Republic",
        "GR" => "Greece",
        "GB" => "United Kingdom",
        "DE" => "Germany",
        "FR" => "France",
        "NL" => "Netherlands",
        "CH" => "Switzerland",
        "IE" => "Ireland",
        "IT" => "Italy",
        "ES" => "Spain",
        "SE" => "Sweden",
        "DK" => "Denmark",
        "NO" => "Norway",
        "FI" => "Finland",
        "BE" => "Belgium",
        "PT" => "Portugal",
        "AT" => "Austria",
        "LU" => "Luxembourg",
        "KY" => "Cayman Islands",
        "BM" => "Bermuda",
        "MU" => "Mauritius",
        _ => return None,
    };
    Some(name)
}
