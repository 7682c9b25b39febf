//! Domain services composed over the in-memory store.
//!
//! These suites pin the observable contract of the driving ports: the order
//! in which follow requests are validated, the like/unlike asymmetry, cheep
//! length and paging, and how the home feed is assembled.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chirp::domain::ports::{
    CheepCommand, FeedQuery, FollowTarget, GraphCommand, GraphQuery, UserRepository,
};
use chirp::domain::{
    CheepService, ErrorCode, FeedComposer, FollowOutcome, GraphService, LikeOutcome,
    UnfollowOutcome, UnlikeOutcome, User, UserId,
};
use chirp::outbound::memory::InMemoryStore;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use pagination::PageRequest;
use rstest::{fixture, rstest};

/// Advances one second per reading so consecutive cheeps are strictly ordered.
struct SteppingClock {
    seconds: AtomicI64,
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let seconds = self.seconds.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(seconds, 0)
            .single()
            .expect("clock stays in range")
    }
}

type Graph = GraphService<InMemoryStore, InMemoryStore>;
type Cheeps = CheepService<InMemoryStore, InMemoryStore>;
type Feed = FeedComposer<InMemoryStore, InMemoryStore, InMemoryStore>;

struct Harness {
    store: Arc<InMemoryStore>,
    graph: Graph,
    cheeps: Cheeps,
    feed: Feed,
}

impl Harness {
    async fn register(&self, id: &str, name: &str) -> UserId {
        let user = User::try_from_strings(id, name, format!("{name}@itu.dk"))
            .expect("fixture user is valid");
        self.store.insert(&user).await.expect("insert user");
        user.id().clone()
    }

    async fn post(&self, author: &UserId, text: &str) -> i64 {
        self.cheeps
            .post_cheep(author, text)
            .await
            .expect("post cheep")
            .id
            .get()
    }
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock {
        seconds: AtomicI64::new(1_700_000_000),
    });
    Harness {
        graph: GraphService::new(store.clone(), store.clone(), clock.clone()),
        cheeps: CheepService::new(store.clone(), store.clone(), clock),
        feed: FeedComposer::new(store.clone(), store.clone(), store.clone()),
        store,
    }
}

fn by_id(raw: &str) -> FollowTarget {
    FollowTarget::Id(raw.to_owned())
}

#[rstest]
#[case(by_id(""), FollowOutcome::InvalidFollowee)]
#[case(by_id("  "), FollowOutcome::InvalidFollowee)]
#[case(by_id("alice"), FollowOutcome::SelfFollowRejected)]
#[case(by_id("nobody"), FollowOutcome::FolloweeNotFound)]
#[case(FollowTarget::Username("alice".to_owned()), FollowOutcome::SelfFollowRejected)]
#[case(FollowTarget::Username("bob".to_owned()), FollowOutcome::Followed)]
#[tokio::test]
async fn follow_checks_run_in_order(
    harness: Harness,
    #[case] target: FollowTarget,
    #[case] expected: FollowOutcome,
) {
    let alice = harness.register("alice", "alice").await;
    harness.register("bob", "bob").await;

    let outcome = harness.graph.follow(&alice, target).await.expect("follow");

    assert_eq!(outcome, expected);
}

#[rstest]
#[tokio::test]
async fn second_follow_is_already_following(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    harness.register("bob", "bob").await;

    let first = harness.graph.follow(&alice, by_id("bob")).await.expect("follow");
    let second = harness.graph.follow(&alice, by_id("bob")).await.expect("follow");

    assert_eq!(first, FollowOutcome::Followed);
    assert_eq!(second, FollowOutcome::AlreadyFollowing);
    assert_eq!(
        harness.graph.followee_ids(&alice).await.expect("ids").len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn unknown_follower_leaves_no_one_sided_edge(harness: Harness) {
    let bob = harness.register("bob", "bob").await;
    let ghost = UserId::new("ghost").expect("id");

    let err = harness
        .graph
        .follow(&ghost, by_id("bob"))
        .await
        .expect_err("follower must exist");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(harness.graph.followee_ids(&ghost).await.expect("ids").is_empty());
    assert!(harness.graph.followers(&bob).await.expect("followers").is_empty());
}

#[rstest]
#[tokio::test]
async fn unfollow_without_edge_is_reported(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    harness.register("bob", "bob").await;

    let missing = harness.graph.unfollow(&alice, by_id("bob")).await.expect("unfollow");
    harness.graph.follow(&alice, by_id("bob")).await.expect("follow");
    let removed = harness.graph.unfollow(&alice, by_id("bob")).await.expect("unfollow");

    assert_eq!(missing, UnfollowOutcome::EdgeNotFound);
    assert_eq!(removed, UnfollowOutcome::Unfollowed);
}

#[rstest]
#[tokio::test]
async fn followers_are_listed_for_the_followee(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let bob = harness.register("bob", "bob").await;
    harness.graph.follow(&alice, by_id("bob")).await.expect("follow");

    let followers = harness.graph.followers(&bob).await.expect("followers");

    assert_eq!(
        followers.iter().map(|user| user.id().clone()).collect::<Vec<_>>(),
        vec![alice]
    );
}

#[rstest]
#[case(160, true)]
#[case(161, false)]
#[tokio::test]
async fn cheeps_are_limited_to_160_characters(
    harness: Harness,
    #[case] length: usize,
    #[case] accepted: bool,
) {
    let alice = harness.register("alice", "alice").await;

    let result = harness.cheeps.post_cheep(&alice, &"é".repeat(length)).await;

    match result {
        Ok(cheep) => {
            assert!(accepted, "{length} characters should be rejected");
            assert_eq!(cheep.text.as_ref().chars().count(), length);
        }
        Err(err) => {
            assert!(!accepted, "{length} characters should be accepted");
            assert_eq!(err.code(), ErrorCode::InvalidRequest);
        }
    }
}

#[rstest]
#[tokio::test]
async fn unknown_author_cannot_post(harness: Harness) {
    let ghost = UserId::new("ghost").expect("id");
    let err = harness
        .cheeps
        .post_cheep(&ghost, "boo")
        .await
        .expect_err("author must exist");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn public_timeline_pages_hold_32_newest_first(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let mut posted = Vec::new();
    for n in 0..40 {
        posted.push(harness.post(&alice, &format!("cheep {n}")).await);
    }

    let first = harness
        .feed
        .public_timeline(PageRequest::default())
        .await
        .expect("page 1");
    let second = harness
        .feed
        .public_timeline(PageRequest::clamped(2))
        .await
        .expect("page 2");

    let beyond = harness
        .feed
        .public_timeline(PageRequest::clamped(3))
        .await
        .expect("page 3");
    let clamped = harness
        .feed
        .public_timeline(PageRequest::clamped(-5))
        .await
        .expect("clamped page");

    let ids: Vec<i64> = first.iter().chain(&second).map(|c| c.id.get()).collect();
    posted.reverse();
    assert_eq!(first.len(), 32);
    assert_eq!(second.len(), 8);
    assert_eq!(ids, posted);
    assert!(beyond.is_empty());
    assert_eq!(clamped, first);
}

#[rstest]
#[tokio::test]
async fn liking_twice_keeps_one_like(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let bob = harness.register("bob", "bob").await;
    let cheep = harness
        .cheeps
        .post_cheep(&alice, "like me")
        .await
        .expect("post");

    for _ in 0..2 {
        let outcome = harness.cheeps.like(&bob, cheep.id).await.expect("like");
        assert_eq!(outcome, LikeOutcome::Liked);
    }

    let timeline = harness
        .feed
        .public_timeline(PageRequest::default())
        .await
        .expect("timeline");
    let stored = timeline.first().expect("cheep is listed");
    assert_eq!(stored.like_count(), 1);
    assert!(stored.is_liked_by(&bob));
}

#[rstest]
#[tokio::test]
async fn unliking_reports_when_no_like_exists(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let bob = harness.register("bob", "bob").await;
    let cheep = harness
        .cheeps
        .post_cheep(&alice, "hello")
        .await
        .expect("post");

    let before = harness.cheeps.unlike(&bob, cheep.id).await.expect("unlike");
    harness.cheeps.like(&bob, cheep.id).await.expect("like");
    let after = harness.cheeps.unlike(&bob, cheep.id).await.expect("unlike");

    assert_eq!(before, UnlikeOutcome::NotLiked);
    assert_eq!(after, UnlikeOutcome::Unliked);
}

#[rstest]
#[tokio::test]
async fn home_feed_concatenates_pages_without_resorting(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let bob = harness.register("bob", "bob").await;
    let carol = harness.register("carol", "carol").await;
    harness.graph.follow(&alice, by_id("carol")).await.expect("follow");
    harness.graph.follow(&alice, by_id("bob")).await.expect("follow");

    let carol_old = harness.post(&carol, "carol old").await;
    let alice_mine = harness.post(&alice, "alice").await;
    let bob_only = harness.post(&bob, "bob").await;
    let carol_new = harness.post(&carol, "carol new").await;

    let feed = harness
        .feed
        .home_feed(&alice, PageRequest::default())
        .await
        .expect("feed");

    let ids: Vec<i64> = feed.iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![alice_mine, bob_only, carol_new, carol_old]);
}

#[rstest]
#[tokio::test]
async fn own_timeline_view_is_the_home_feed(harness: Harness) {
    let alice = harness.register("alice", "alice").await;
    let bob = harness.register("bob", "bob").await;
    harness.graph.follow(&alice, by_id("bob")).await.expect("follow");
    harness.post(&bob, "from bob").await;
    harness.post(&alice, "from alice").await;

    let as_owner = harness
        .feed
        .user_timeline(Some(alice.clone()), &alice, PageRequest::default())
        .await
        .expect("owner view");
    let as_visitor = harness
        .feed
        .user_timeline(Some(bob), &alice, PageRequest::default())
        .await
        .expect("visitor view");

    assert_eq!(as_owner.len(), 2);
    assert_eq!(as_visitor.len(), 1);
}
