//! Constraints mirroring the backend's `Username` and `CheepText` types.
//!
//! Generated values must always be accepted by the backend, so the limits
//! here track `backend/src/domain/user.rs` and `backend/src/domain/cheep.rs`.
//! Usernames are additionally restricted to URL-safe characters because the
//! simulator API addresses users by name in the path.

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 64;

/// Maximum cheep length in characters.
pub const CHEEP_TEXT_MAX: usize = 160;

/// Whether `name` is a valid generated username.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_username;
///
/// assert!(is_valid_username("Ada_Lovelace"));
/// assert!(!is_valid_username("O'Brien"));
/// assert!(!is_valid_username(""));
/// ```
#[must_use]
pub fn is_valid_username(name: &str) -> bool {
    let length = name.chars().count();
    (1..=USERNAME_MAX).contains(&length) && name.chars().all(is_username_char)
}

const fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace characters that are not allowed in usernames with underscores.
pub(crate) fn sanitize_username(name: &str) -> String {
    name.chars()
        .map(|c| if is_username_char(c) { c } else { '_' })
        .take(USERNAME_MAX)
        .collect()
}

/// Trim `text` and cut it to at most [`CHEEP_TEXT_MAX`] characters.
///
/// Returns `None` when nothing visible remains.
///
/// # Examples
///
/// ```
/// use example_data::{CHEEP_TEXT_MAX, fit_cheep_text};
///
/// let long = "é".repeat(200);
/// let fitted = fit_cheep_text(&long).expect("non-empty");
/// assert_eq!(fitted.chars().count(), CHEEP_TEXT_MAX);
/// assert_eq!(fit_cheep_text("   "), None);
/// ```
#[must_use]
pub fn fit_cheep_text(text: &str) -> Option<String> {
    let truncated: String = text.trim().chars().take(CHEEP_TEXT_MAX).collect();
    let fitted = truncated.trim_end();
    if fitted.is_empty() {
        None
    } else {
        Some(fitted.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ada_Lovelace", true)]
    #[case("user123", true)]
    #[case("with space", false)]
    #[case("", false)]
    fn username_rules(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_username(name), expected);
    }

    #[rstest]
    fn long_usernames_are_rejected() {
        assert!(!is_valid_username(&"a".repeat(USERNAME_MAX + 1)));
        assert!(is_valid_username(&"a".repeat(USERNAME_MAX)));
    }

    #[rstest]
    #[case("Ada Lovelace", "Ada_Lovelace")]
    #[case("O'Brien", "O_Brien")]
    fn sanitizing_produces_valid_names(#[case] raw: &str, #[case] expected: &str) {
        let sanitized = sanitize_username(raw);
        assert_eq!(sanitized, expected);
        assert!(is_valid_username(&sanitized));
    }

    #[rstest]
    fn short_text_is_kept() {
        assert_eq!(fit_cheep_text(" hello "), Some("hello".to_owned()));
    }
}
