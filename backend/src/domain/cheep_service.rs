//! Cheep publishing and like handling.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::graph_service::map_user_error;
use crate::domain::ports::{CheepCommand, CheepRepository, CheepRepositoryError, UserRepository};
use crate::domain::{Cheep, CheepId, Error, LikeOutcome, Outcome, UnlikeOutcome, UserId};

/// Service implementing [`CheepCommand`].
#[derive(Clone)]
pub struct CheepService<U, C> {
    users: Arc<U>,
    cheeps: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<U, C> CheepService<U, C> {
    /// Build the service. Authors are checked against `users`; `clock`
    /// timestamps new cheeps.
    pub fn new(users: Arc<U>, cheeps: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            cheeps,
            clock,
        }
    }
}

pub(crate) fn map_cheep_error(error: CheepRepositoryError) -> Error {
    match error {
        CheepRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cheep repository unavailable: {message}"))
        }
        CheepRepositoryError::Query { message } => {
            Error::internal(format!("cheep repository error: {message}"))
        }
        CheepRepositoryError::TextTooLong { max, actual } => {
            Error::invalid_request(format!("cheep text must be at most {max} characters"))
                .with_details(json!({
                    "field": "text",
                    "max": max,
                    "actual": actual,
                    "code": "text_too_long",
                }))
        }
        CheepRepositoryError::EmptyText => Error::invalid_request("cheep text must not be empty")
            .with_details(json!({ "field": "text", "code": "empty_text" })),
        CheepRepositoryError::UnknownAuthor { author } => {
            Error::not_found(format!("user {author} not found"))
        }
    }
}

#[async_trait]
impl<U, C> CheepCommand for CheepService<U, C>
where
    U: UserRepository,
    C: CheepRepository,
{
    async fn post_cheep(&self, author: &UserId, text: &str) -> Result<Cheep, Error> {
        let known = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_error)?;
        if known.is_none() {
            return Err(Error::not_found(format!("user {author} not found")));
        }

        let cheep = self
            .cheeps
            .insert(author, text, self.clock.utc())
            .await
            .map_err(map_cheep_error)?;
        info!(author = %author, cheep_id = %cheep.id, "cheep posted");
        Ok(cheep)
    }

    async fn like(&self, user: &UserId, cheep: CheepId) -> Result<LikeOutcome, Error> {
        let outcome = self
            .cheeps
            .like(user, cheep)
            .await
            .map_err(map_cheep_error)?;
        info!(user = %user, cheep_id = %cheep, outcome = outcome.code(), "like processed");
        Ok(outcome)
    }

    async fn unlike(&self, user: &UserId, cheep: CheepId) -> Result<UnlikeOutcome, Error> {
        let outcome = self
            .cheeps
            .unlike(user, cheep)
            .await
            .map_err(map_cheep_error)?;
        info!(user = %user, cheep_id = %cheep, outcome = outcome.code(), "unlike processed");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockCheepRepository, MockUserRepository};
    use crate::domain::{CHEEP_TEXT_MAX, CheepText, ErrorCode, User};

    struct StoppedClock(DateTime<Utc>);

    impl Clock for StoppedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 8, 1, 12, 16, 48)
            .single()
            .expect("valid timestamp")
    }

    fn helge() -> User {
        User::try_from_strings("u1", "Helge", "ropf@itu.dk").expect("valid user")
    }

    fn service(
        users: MockUserRepository,
        cheeps: MockCheepRepository,
    ) -> CheepService<MockUserRepository, MockCheepRepository> {
        CheepService::new(
            Arc::new(users),
            Arc::new(cheeps),
            Arc::new(StoppedClock(now())),
        )
    }

    fn cheep_id(raw: i64) -> CheepId {
        CheepId::new(raw).expect("positive id")
    }

    #[tokio::test]
    async fn post_stamps_with_clock_time() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(helge())));
        let mut cheeps = MockCheepRepository::new();
        cheeps
            .expect_insert()
            .withf(|author, text, at| {
                author.as_ref() == "u1" && text == "Hello, BDSA students!" && *at == now()
            })
            .times(1)
            .return_once(|_, text, at| {
                Ok(Cheep {
                    id: cheep_id(1),
                    author: helge(),
                    text: CheepText::new(text).expect("valid text"),
                    timestamp: at,
                    liked_by: BTreeSet::new(),
                })
            });

        let cheep = service(users, cheeps)
            .post_cheep(helge().id(), "Hello, BDSA students!")
            .await
            .expect("post succeeds");
        assert_eq!(cheep.timestamp, now());
        assert_eq!(cheep.text.as_ref(), "Hello, BDSA students!");
    }

    #[tokio::test]
    async fn post_by_unknown_author_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let mut cheeps = MockCheepRepository::new();
        cheeps.expect_insert().never();

        let err = service(users, cheeps)
            .post_cheep(helge().id(), "hi")
            .await
            .expect_err("author missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn over_long_text_is_invalid_request() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(helge())));
        let mut cheeps = MockCheepRepository::new();
        cheeps.expect_insert().return_once(|_, _, _| {
            Err(CheepRepositoryError::text_too_long(
                CHEEP_TEXT_MAX,
                CHEEP_TEXT_MAX + 1,
            ))
        });

        let err = service(users, cheeps)
            .post_cheep(helge().id(), &"x".repeat(CHEEP_TEXT_MAX + 1))
            .await
            .expect_err("too long");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "text_too_long");
        assert_eq!(details["max"], CHEEP_TEXT_MAX);
    }

    #[rstest]
    #[case(LikeOutcome::Liked)]
    #[case(LikeOutcome::CheepNotFound)]
    #[tokio::test]
    async fn like_forwards_store_outcome(#[case] stored: LikeOutcome) {
        let mut cheeps = MockCheepRepository::new();
        cheeps
            .expect_like()
            .times(1)
            .return_once(move |_, _| Ok(stored));
        let outcome = service(MockUserRepository::new(), cheeps)
            .like(helge().id(), cheep_id(7))
            .await
            .expect("like runs");
        assert_eq!(outcome, stored);
    }

    #[rstest]
    #[case(UnlikeOutcome::Unliked)]
    #[case(UnlikeOutcome::NotLiked)]
    #[case(UnlikeOutcome::CheepNotFound)]
    #[tokio::test]
    async fn unlike_forwards_store_outcome(#[case] stored: UnlikeOutcome) {
        let mut cheeps = MockCheepRepository::new();
        cheeps
            .expect_unlike()
            .times(1)
            .return_once(move |_, _| Ok(stored));
        let outcome = service(MockUserRepository::new(), cheeps)
            .unlike(helge().id(), cheep_id(7))
            .await
            .expect("unlike runs");
        assert_eq!(outcome, stored);
    }

    #[rstest]
    fn store_failures_map_to_error_codes() {
        assert_eq!(
            map_cheep_error(CheepRepositoryError::connection("down")).code(),
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(
            map_cheep_error(CheepRepositoryError::query("boom")).code(),
            ErrorCode::InternalError
        );
        assert_eq!(
            map_cheep_error(CheepRepositoryError::empty_text()).code(),
            ErrorCode::InvalidRequest
        );
        assert_eq!(
            map_cheep_error(CheepRepositoryError::unknown_author("u9")).code(),
            ErrorCode::NotFound
        );
    }
}
