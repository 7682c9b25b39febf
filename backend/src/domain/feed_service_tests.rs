//! Tests for timeline composition.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use pagination::{PageNumber, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCheepRepository, MockSocialGraphRepository, MockUserRepository};
use crate::domain::{CheepId, CheepText, ErrorCode, User};

type Composer = FeedComposer<MockUserRepository, MockSocialGraphRepository, MockCheepRepository>;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 1, 12, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn user(id: &str) -> User {
    User::try_from_strings(id, id.to_uppercase(), format!("{id}@itu.dk")).expect("valid user")
}

fn uid(raw: &str) -> UserId {
    UserId::new(raw).expect("valid id")
}

fn cheep(id: i64, author: &str, minute: u32) -> Cheep {
    Cheep {
        id: CheepId::new(id).expect("positive id"),
        author: user(author),
        text: CheepText::new(format!("cheep {id}")).expect("valid text"),
        timestamp: at(minute),
        liked_by: BTreeSet::new(),
    }
}

/// Cheeps per author, newest first as the store returns them.
fn page_for(author: &UserId) -> Vec<Cheep> {
    match author.as_ref() {
        "alice" => vec![cheep(2, "alice", 5)],
        "bob" => vec![cheep(9, "bob", 50), cheep(3, "bob", 1)],
        "carol" => vec![cheep(7, "carol", 30)],
        _ => Vec::new(),
    }
}

#[fixture]
fn cheeps() -> MockCheepRepository {
    let mut cheeps = MockCheepRepository::new();
    cheeps
        .expect_page_by_author()
        .returning(|author, _| Ok(page_for(author)));
    cheeps
}

fn composer(
    users: MockUserRepository,
    graph: MockSocialGraphRepository,
    cheeps: MockCheepRepository,
) -> Composer {
    FeedComposer::new(Arc::new(users), Arc::new(graph), Arc::new(cheeps))
}

fn ids(feed: &[Cheep]) -> Vec<i64> {
    feed.iter().map(|c| c.id.get()).collect()
}

#[rstest]
#[tokio::test]
async fn home_feed_concatenates_own_then_followees_without_sorting(cheeps: MockCheepRepository) {
    let mut graph = MockSocialGraphRepository::new();
    graph
        .expect_followee_ids_of()
        .return_once(|_| Ok(BTreeSet::from([uid("bob"), uid("carol")])));
    let feed = composer(MockUserRepository::new(), graph, cheeps)
        .home_feed(&uid("alice"), PageRequest::default())
        .await
        .expect("feed builds");

    assert_eq!(ids(&feed), vec![2, 9, 3, 7]);
    let newest_first = feed
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp);
    assert!(!newest_first, "home feed must not be re-sorted");
}

#[rstest]
#[tokio::test]
async fn home_feed_without_followees_is_own_timeline(cheeps: MockCheepRepository) {
    let mut graph = MockSocialGraphRepository::new();
    graph
        .expect_followee_ids_of()
        .return_once(|_| Ok(BTreeSet::new()));
    let feed = composer(MockUserRepository::new(), graph, cheeps)
        .home_feed(&uid("alice"), PageRequest::default())
        .await
        .expect("feed builds");
    assert_eq!(ids(&feed), vec![2]);
}

#[tokio::test]
async fn page_request_is_forwarded_to_every_author() {
    let request = PageRequest::new(PageNumber::clamped(3));
    let mut cheeps = MockCheepRepository::new();
    cheeps
        .expect_page_by_author()
        .withf(move |_, req| *req == request)
        .times(2)
        .returning(|_, _| Ok(Vec::new()));
    let mut graph = MockSocialGraphRepository::new();
    graph
        .expect_followee_ids_of()
        .return_once(|_| Ok(BTreeSet::from([uid("bob")])));

    let feed = composer(MockUserRepository::new(), graph, cheeps)
        .home_feed(&uid("alice"), request)
        .await
        .expect("feed builds");
    assert!(feed.is_empty());
}

#[tokio::test]
async fn public_timeline_reads_the_global_page() {
    let mut cheeps = MockCheepRepository::new();
    cheeps
        .expect_page()
        .times(1)
        .return_once(|_| Ok(vec![cheep(9, "bob", 50), cheep(7, "carol", 30)]));
    let feed = composer(
        MockUserRepository::new(),
        MockSocialGraphRepository::new(),
        cheeps,
    )
    .public_timeline(PageRequest::default())
    .await
    .expect("timeline builds");
    assert_eq!(ids(&feed), vec![9, 7]);
}

#[rstest]
#[case(Some("bob"), vec![9, 3, 7])]
#[case(Some("alice"), vec![9, 3])]
#[case(None, vec![9, 3])]
#[tokio::test]
async fn user_timeline_shows_home_feed_only_to_the_author(
    #[case] viewer: Option<&str>,
    #[case] expected: Vec<i64>,
    cheeps: MockCheepRepository,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(user("bob"))));
    let mut graph = MockSocialGraphRepository::new();
    graph
        .expect_followee_ids_of()
        .returning(|_| Ok(BTreeSet::from([uid("carol")])));

    let feed = composer(users, graph, cheeps)
        .user_timeline(viewer.map(uid), &uid("bob"), PageRequest::default())
        .await
        .expect("timeline builds");
    assert_eq!(ids(&feed), expected);
}

#[rstest]
#[tokio::test]
async fn user_timeline_of_unknown_author_is_not_found(cheeps: MockCheepRepository) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let err = composer(users, MockSocialGraphRepository::new(), cheeps)
        .user_timeline(None, &uid("ghost"), PageRequest::default())
        .await
        .expect_err("author missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
