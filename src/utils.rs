//! Common utility functions shared across the codebase.

/// Separator between namespace segments and message keys in catalog paths.
pub const PATH_SEPARATOR: char = '.';

/// Checks if a key parses fully as a number.
///
/// Numeric literals passed to translation functions are a known false-positive
/// class (`t("42")`), so such keys never make it into a catalog. Accepts decimal
/// and exponent notation as well as `0x`/`0o`/`0b` integers; surrounding
/// whitespace is ignored.
///
/// # Examples
///
/// ```
/// use next_intl_scanner::utils::is_numeric_key;
///
/// assert!(is_numeric_key("42"));
/// assert!(is_numeric_key("1.5"));
/// assert!(is_numeric_key(" 1e3 "));
/// assert!(is_numeric_key("0xff"));
/// assert!(!is_numeric_key("title"));
/// assert!(!is_numeric_key("42px"));
/// assert!(!is_numeric_key(""));
/// ```
pub fn is_numeric_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return false;
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        return !digits.is_empty() && u128::from_str_radix(digits, radix).is_ok();
    }

    // `f64::from_str` also accepts "inf"/"nan" spellings; only digits count here.
    let starts_like_number = trimmed
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    starts_like_number && trimmed.parse::<f64>().is_ok_and(|n| !n.is_nan())
}

/// Join a namespace and a message key into a leaf path.
///
/// An empty namespace addresses the catalog root.
pub fn leaf_path(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", namespace, PATH_SEPARATOR, key)
    }
}
