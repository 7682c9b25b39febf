//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{
    MockCheepCommand, MockFeedQuery, MockGraphCommand, MockGraphQuery, MockSimulatorCommand,
    MockUserQuery,
};
use crate::domain::{Cheep, CheepId, CheepText, User, UserId};
use crate::inbound::http::state::HttpState;

/// Port mocks for handler tests. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub graph: MockGraphCommand,
    pub graph_query: MockGraphQuery,
    pub cheeps: MockCheepCommand,
    pub feed: MockFeedQuery,
    pub users: MockUserQuery,
    pub simulator: MockSimulatorCommand,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            graph: Arc::new(self.graph),
            graph_query: Arc::new(self.graph_query),
            cheeps: Arc::new(self.cheeps),
            feed: Arc::new(self.feed),
            users: Arc::new(self.users),
            simulator: Arc::new(self.simulator),
        })
    }
}

pub fn user(name: &str) -> User {
    User::try_from_strings(name, name.to_uppercase(), format!("{name}@example.com"))
        .expect("fixture user")
}

pub fn user_id(name: &str) -> UserId {
    UserId::new(name).expect("fixture id")
}

pub fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, second)
        .single()
        .expect("fixture timestamp")
}

pub fn cheep(id: i64, author: &str, text: &str) -> Cheep {
    Cheep {
        id: CheepId::new(id).expect("fixture cheep id"),
        author: user(author),
        text: CheepText::new(text).expect("fixture text"),
        timestamp: at(u32::try_from(id).unwrap_or(0) % 60),
        liked_by: Default::default(),
    }
}
