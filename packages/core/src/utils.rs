// ABOUTME: Shared utility functions for Jobtrack
// ABOUTME: Display-name splitting and comma-delimited list parsing

/// Split a display name into `(first_name, last_name)`.
///
/// The first whitespace-separated token becomes the first name and the
/// remaining tokens, joined by a single space, become the last name. A missing
/// or blank name yields two empty strings.
pub fn split_display_name(display_name: Option<&str>) -> (String, String) {
    let Some(name) = display_name else {
        return (String::new(), String::new());
    };

    let mut tokens = name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, rest)
}

/// Split a comma-delimited string into trimmed, non-empty entries
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
