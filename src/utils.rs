//! Shared helpers for reading site workbooks

/// Returns true when a text cell stands for a missing value
///
/// Only the empty string and the exact data-frame NA spellings count, matched
/// case-sensitively. Whitespace, `-` and `_` are ordinary values.
///
/// # Examples
///
/// ```
/// use met_skill_stats::utils::is_missing_marker;
///
/// assert!(is_missing_marker(""));
/// assert!(is_missing_marker("N/A"));
/// assert!(is_missing_marker("#N/A"));
/// assert!(is_missing_marker("nan"));
/// assert!(!is_missing_marker("Nan"));
/// assert!(!is_missing_marker("-"));
/// assert!(!is_missing_marker("12.5"));
/// ```
pub fn is_missing_marker(value: &str) -> bool {
    const MARKERS: &[&str] = &[
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ];

    MARKERS.contains(&value)
}

/// Normalize a header cell for column lookup (trims surrounding whitespace)
///
/// ```
/// use met_skill_stats::utils::normalize_header;
///
/// assert_eq!(normalize_header(" Temp_Obs "), "Temp_Obs");
/// ```
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}
