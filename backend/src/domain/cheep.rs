//! Cheeps: short authored messages with a set of likers.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{User, UserId};

/// Maximum length of a cheep, counted in Unicode scalar values.
pub const CHEEP_TEXT_MAX: usize = 160;

/// Validation errors raised by [`CheepText::new`] and [`CheepId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheepValidationError {
    /// Cheeps must contain visible text.
    #[error("cheep text must not be empty")]
    EmptyText,
    /// Cheeps are limited to [`CHEEP_TEXT_MAX`] characters.
    #[error("cheep text must be at most {max} characters, got {actual}")]
    TextTooLong { max: usize, actual: usize },
    /// Store-assigned identifiers start at 1.
    #[error("cheep id must be positive, got {0}")]
    NonPositiveId(i64),
}

/// Store-assigned, monotonically increasing cheep identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CheepId(i64);

impl CheepId {
    /// Validate and construct a [`CheepId`].
    pub fn new(id: i64) -> Result<Self, CheepValidationError> {
        if id < 1 {
            return Err(CheepValidationError::NonPositiveId(id));
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CheepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CheepId {
    type Error = CheepValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CheepId> for i64 {
    fn from(value: CheepId) -> Self {
        value.0
    }
}

/// Cheep body.
///
/// ## Invariants
/// - Non-blank.
/// - At most [`CHEEP_TEXT_MAX`] characters (not bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheepText(String);

impl CheepText {
    /// Validate and construct a [`CheepText`].
    ///
    /// ```
    /// use chirp::domain::{CheepText, CheepValidationError, CHEEP_TEXT_MAX};
    ///
    /// assert!(CheepText::new("é".repeat(CHEEP_TEXT_MAX)).is_ok());
    /// assert_eq!(
    ///     CheepText::new("x".repeat(CHEEP_TEXT_MAX + 1)),
    ///     Err(CheepValidationError::TextTooLong { max: 160, actual: 161 }),
    /// );
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, CheepValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CheepValidationError::EmptyText);
        }
        let actual = text.chars().count();
        if actual > CHEEP_TEXT_MAX {
            return Err(CheepValidationError::TextTooLong {
                max: CHEEP_TEXT_MAX,
                actual,
            });
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for CheepText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CheepText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for CheepText {
    type Error = CheepValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CheepText> for String {
    fn from(value: CheepText) -> Self {
        value.0
    }
}

/// A persisted cheep with its author resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cheep {
    pub id: CheepId,
    pub author: User,
    pub text: CheepText,
    pub timestamp: DateTime<Utc>,
    pub liked_by: BTreeSet<UserId>,
}

impl Cheep {
    /// Whether `user` is in the like-set.
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    /// Number of distinct likers.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    /// Sort key placing newer cheeps first; identifier breaks timestamp ties.
    pub fn recency_key(&self) -> (DateTime<Utc>, CheepId) {
        (self.timestamp, self.id)
    }
}

/// Sort cheeps newest first, breaking timestamp ties by highest id.
pub fn sort_newest_first(cheeps: &mut [Cheep]) {
    cheeps.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn author() -> User {
        User::try_from_strings("u1", "Helge", "ropf@itu.dk").expect("valid user")
    }

    fn cheep(id: i64, minute: u32) -> Cheep {
        Cheep {
            id: CheepId::new(id).expect("valid id"),
            author: author(),
            text: CheepText::new(format!("cheep {id}")).expect("valid text"),
            timestamp: Utc
                .with_ymd_and_hms(2023, 8, 1, 10, minute, 0)
                .single()
                .expect("valid timestamp"),
            liked_by: BTreeSet::new(),
        }
    }

    #[rstest]
    #[case(1)]
    #[case(CHEEP_TEXT_MAX - 1)]
    #[case(CHEEP_TEXT_MAX)]
    fn accepts_text_up_to_limit(#[case] len: usize) {
        let text = "a".repeat(len);
        assert_eq!(CheepText::new(text.clone()).map(String::from), Ok(text));
    }

    #[rstest]
    #[case(CHEEP_TEXT_MAX + 1)]
    #[case(CHEEP_TEXT_MAX * 2)]
    fn rejects_text_over_limit(#[case] len: usize) {
        let result = CheepText::new("a".repeat(len));
        assert_eq!(
            result,
            Err(CheepValidationError::TextTooLong {
                max: CHEEP_TEXT_MAX,
                actual: len,
            })
        );
    }

    #[rstest]
    fn counts_characters_not_bytes() {
        let text = "🐦".repeat(CHEEP_TEXT_MAX);
        assert!(text.len() > CHEEP_TEXT_MAX);
        assert!(CheepText::new(text).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_text(#[case] raw: &str) {
        assert_eq!(CheepText::new(raw), Err(CheepValidationError::EmptyText));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn rejects_non_positive_ids(#[case] raw: i64) {
        assert_eq!(
            CheepId::new(raw),
            Err(CheepValidationError::NonPositiveId(raw))
        );
    }

    #[rstest]
    fn sorts_newest_first_with_id_tie_break() {
        let mut cheeps = vec![cheep(1, 0), cheep(3, 5), cheep(2, 5)];
        sort_newest_first(&mut cheeps);
        let ids: Vec<i64> = cheeps.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[rstest]
    fn like_set_has_unique_membership() {
        let mut c = cheep(1, 0);
        let liker = UserId::new("liker").expect("valid id");
        c.liked_by.insert(liker.clone());
        c.liked_by.insert(liker.clone());
        assert_eq!(c.like_count(), 1);
        assert!(c.is_liked_by(&liker));
    }
}
