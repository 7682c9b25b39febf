//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them into
//! domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{cheep_likes, cheeps, follows, latest, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
}

/// Row read from `cheeps`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cheeps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheepRow {
    pub id: i64,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cheeps)]
pub(crate) struct NewCheepRow<'a> {
    pub author_id: &'a str,
    pub text: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cheep_likes)]
pub(crate) struct NewCheepLikeRow<'a> {
    pub cheep_id: i64,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow<'a> {
    pub follower_id: &'a str,
    pub followee_id: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = latest)]
pub(crate) struct LatestRow {
    pub id: i32,
    pub value: i64,
}
