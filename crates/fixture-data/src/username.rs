//! Username derivation from generated display names.

/// Derives a username from a display name.
///
/// Spaces and hyphens become underscores and the result is lowercased. The
/// mapping is pure, so the same display name always yields the same username.
/// No other characters are touched: apostrophes and dots in names such as
/// `"Mr. O'Hara"` survive as-is.
///
/// # Examples
///
/// ```
/// use fixture_data::snake_case;
///
/// assert_eq!(snake_case("Jane Doe"), "jane_doe");
/// assert_eq!(snake_case("Anne-Marie"), "anne_marie");
/// ```
#[must_use]
pub fn snake_case(display_name: &str) -> String {
    display_name
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}
