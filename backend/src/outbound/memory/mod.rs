//! In-process adapter implementing every driven port.
//!
//! Used when no database URL is configured and by integration tests. All
//! state sits behind one mutex, so each port call is atomic with respect to
//! the others. Cheep identifiers are assigned monotonically from 1.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::ports::{
    CheepRepository, CheepRepositoryError, LATEST_UNSET, LatestRepository,
    LatestRepositoryError, SocialGraphRepository, SocialGraphRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AddEdgeOutcome, Cheep, CheepId, CheepText, Email, FollowEdge, LikeOutcome,
    RemoveEdgeOutcome, UnlikeOutcome, User, UserId, Username, sort_newest_first,
};

#[derive(Debug, Clone)]
struct StoredCheep {
    id: CheepId,
    author: UserId,
    text: CheepText,
    timestamp: DateTime<Utc>,
    liked_by: BTreeSet<UserId>,
}

#[derive(Debug)]
struct State {
    users: BTreeMap<UserId, User>,
    cheeps: BTreeMap<CheepId, StoredCheep>,
    next_cheep_id: i64,
    follows: BTreeMap<(UserId, UserId), DateTime<Utc>>,
    latest: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            cheeps: BTreeMap::new(),
            next_cheep_id: 1,
            follows: BTreeMap::new(),
            latest: LATEST_UNSET,
        }
    }
}

impl State {
    fn resolve(&self, stored: &StoredCheep) -> Option<Cheep> {
        let author = self.users.get(&stored.author)?.clone();
        Some(Cheep {
            id: stored.id,
            author,
            text: stored.text.clone(),
            timestamp: stored.timestamp,
            liked_by: stored.liked_by.clone(),
        })
    }

    fn page_where(&self, request: PageRequest, keep: impl Fn(&StoredCheep) -> bool) -> Vec<Cheep> {
        let mut cheeps: Vec<Cheep> = self
            .cheeps
            .values()
            .filter(|stored| keep(stored))
            .filter_map(|stored| self.resolve(stored))
            .collect();
        sort_newest_first(&mut cheeps);
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        cheeps
            .into_iter()
            .skip(offset)
            .take(request.limit())
            .collect()
    }
}

/// Mutex-guarded store for users, cheeps, follow edges and the latest counter.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// An empty store with `latest` unset.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the guard cannot leave `State` half-written:
        // every mutation is a single map operation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().users.get(id).cloned())
    }

    async fn find_by_name(&self, username: &Username) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.lock();
        let taken = state.users.contains_key(user.id())
            || state
                .users
                .values()
                .any(|existing| existing.username() == user.username());
        if taken {
            return Err(UserRepositoryError::duplicate_user(
                user.username().to_string(),
            ));
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl SocialGraphRepository for InMemoryStore {
    async fn add_edge(&self, edge: &FollowEdge) -> Result<AddEdgeOutcome, SocialGraphRepositoryError> {
        let key = (edge.follower().clone(), edge.followee().clone());
        let mut state = self.lock();
        if state.follows.contains_key(&key) {
            return Ok(AddEdgeOutcome::DuplicateEdge);
        }
        state.follows.insert(key, edge.followed_at());
        Ok(AddEdgeOutcome::Added)
    }

    async fn remove_edge(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<RemoveEdgeOutcome, SocialGraphRepositoryError> {
        let key = (follower.clone(), followee.clone());
        Ok(match self.lock().follows.remove(&key) {
            Some(_) => RemoveEdgeOutcome::Removed,
            None => RemoveEdgeOutcome::EdgeNotFound,
        })
    }

    async fn followers_of(&self, user: &UserId) -> Result<Vec<User>, SocialGraphRepositoryError> {
        let state = self.lock();
        Ok(state
            .follows
            .keys()
            .filter(|(_, followee)| followee == user)
            .filter_map(|(follower, _)| state.users.get(follower).cloned())
            .collect())
    }

    async fn followee_ids_of(
        &self,
        user: &UserId,
    ) -> Result<BTreeSet<UserId>, SocialGraphRepositoryError> {
        Ok(self
            .lock()
            .follows
            .keys()
            .filter(|(follower, _)| follower == user)
            .map(|(_, followee)| followee.clone())
            .collect())
    }
}

#[async_trait]
impl CheepRepository for InMemoryStore {
    async fn insert(
        &self,
        author: &UserId,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Cheep, CheepRepositoryError> {
        let text = CheepText::new(text)?;
        let mut state = self.lock();
        if !state.users.contains_key(author) {
            return Err(CheepRepositoryError::unknown_author(author.to_string()));
        }
        let id = CheepId::new(state.next_cheep_id)?;
        state.next_cheep_id += 1;
        let stored = StoredCheep {
            id,
            author: author.clone(),
            text,
            timestamp,
            liked_by: BTreeSet::new(),
        };
        let cheep = state
            .resolve(&stored)
            .ok_or_else(|| CheepRepositoryError::unknown_author(author.to_string()))?;
        state.cheeps.insert(id, stored);
        Ok(cheep)
    }

    async fn find_by_id(&self, id: CheepId) -> Result<Option<Cheep>, CheepRepositoryError> {
        let state = self.lock();
        Ok(state.cheeps.get(&id).and_then(|stored| state.resolve(stored)))
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<Cheep>, CheepRepositoryError> {
        Ok(self.lock().page_where(request, |_| true))
    }

    async fn page_by_author(
        &self,
        author: &UserId,
        request: PageRequest,
    ) -> Result<Vec<Cheep>, CheepRepositoryError> {
        Ok(self
            .lock()
            .page_where(request, |stored| &stored.author == author))
    }

    async fn like(&self, user: &UserId, cheep: CheepId) -> Result<LikeOutcome, CheepRepositoryError> {
        Ok(match self.lock().cheeps.get_mut(&cheep) {
            Some(stored) => {
                stored.liked_by.insert(user.clone());
                LikeOutcome::Liked
            }
            None => LikeOutcome::CheepNotFound,
        })
    }

    async fn unlike(
        &self,
        user: &UserId,
        cheep: CheepId,
    ) -> Result<UnlikeOutcome, CheepRepositoryError> {
        Ok(match self.lock().cheeps.get_mut(&cheep) {
            Some(stored) => {
                if stored.liked_by.remove(user) {
                    UnlikeOutcome::Unliked
                } else {
                    UnlikeOutcome::NotLiked
                }
            }
            None => UnlikeOutcome::CheepNotFound,
        })
    }
}

#[async_trait]
impl LatestRepository for InMemoryStore {
    async fn get_latest(&self) -> Result<i64, LatestRepositoryError> {
        Ok(self.lock().latest)
    }

    async fn update_latest(&self, latest: i64) -> Result<(), LatestRepositoryError> {
        self.lock().latest = latest;
        Ok(())
    }
}
