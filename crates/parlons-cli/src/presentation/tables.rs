//! Table formatting utilities for CLI output.

/// Truncate to at most `max_chars` characters, adding "..." if cut.
///
/// ```rust
/// use parlons_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Bonjour", 10), "Bonjour");
/// assert_eq!(truncate_string("Où est la gare ?", 8), "Où es...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}
