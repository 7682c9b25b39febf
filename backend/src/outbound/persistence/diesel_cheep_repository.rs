//! PostgreSQL-backed `CheepRepository`.
//!
//! Text length is validated before the insert is issued; the column CHECK
//! constraint is a second line. Likes live in `cheep_likes` and are attached
//! to each page with one extra query.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{CheepRepository, CheepRepositoryError};
use crate::domain::{Cheep, CheepId, CheepText, LikeOutcome, UnlikeOutcome, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_user_repository::row_to_user;
use super::models::{CheepRow, NewCheepLikeRow, NewCheepRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cheep_likes, cheeps, users};

#[derive(Clone)]
pub struct DieselCheepRepository {
    pool: DbPool,
}

impl DieselCheepRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CheepRepositoryError {
    map_basic_pool_error(error, CheepRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> CheepRepositoryError {
    map_basic_diesel_error(
        error,
        CheepRepositoryError::query,
        CheepRepositoryError::connection,
    )
}

fn to_sql_window(request: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(request.limit()).unwrap_or(i64::MAX);
    (offset, limit)
}

fn row_to_cheep(
    row: CheepRow,
    author: User,
    liked_by: BTreeSet<UserId>,
) -> Result<Cheep, CheepRepositoryError> {
    Ok(Cheep {
        id: CheepId::new(row.id)?,
        author,
        text: CheepText::new(row.text)?,
        timestamp: row.created_at,
        liked_by,
    })
}

async fn load_likes(
    conn: &mut AsyncPgConnection,
    ids: &[i64],
) -> Result<BTreeMap<i64, BTreeSet<UserId>>, CheepRepositoryError> {
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows: Vec<(i64, String)> = cheep_likes::table
        .filter(cheep_likes::cheep_id.eq_any(ids))
        .select((cheep_likes::cheep_id, cheep_likes::user_id))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let mut likes: BTreeMap<i64, BTreeSet<UserId>> = BTreeMap::new();
    for (cheep_id, user_id) in rows {
        let user = UserId::new(user_id.as_str()).map_err(|err| {
            CheepRepositoryError::query(format!("invalid liker id {user_id}: {err}"))
        })?;
        likes.entry(cheep_id).or_default().insert(user);
    }
    Ok(likes)
}

async fn assemble(
    conn: &mut AsyncPgConnection,
    rows: Vec<(CheepRow, UserRow)>,
) -> Result<Vec<Cheep>, CheepRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|(cheep, _)| cheep.id).collect();
    let mut likes = load_likes(conn, &ids).await?;
    rows.into_iter()
        .map(|(cheep, author)| {
            let author = row_to_user(author).map_err(CheepRepositoryError::query)?;
            let liked_by = likes.remove(&cheep.id).unwrap_or_default();
            row_to_cheep(cheep, author, liked_by)
        })
        .collect()
}

async fn cheep_exists(
    conn: &mut AsyncPgConnection,
    id: CheepId,
) -> Result<bool, CheepRepositoryError> {
    diesel::select(exists(cheeps::table.filter(cheeps::id.eq(id.get()))))
        .get_result(conn)
        .await
        .map_err(map_diesel_error)
}

#[async_trait]
impl CheepRepository for DieselCheepRepository {
    async fn insert(
        &self,
        author: &UserId,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Cheep, CheepRepositoryError> {
        let text = CheepText::new(text)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let author_row: Option<UserRow> = users::table
            .filter(users::id.eq(author.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(author_row) = author_row else {
            return Err(CheepRepositoryError::unknown_author(author.to_string()));
        };

        let row = NewCheepRow {
            author_id: author.as_ref(),
            text: text.as_ref(),
            created_at: timestamp,
        };
        let stored: CheepRow = diesel::insert_into(cheeps::table)
            .values(&row)
            .returning(CheepRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    CheepRepositoryError::unknown_author(author.to_string())
                }
                other => map_diesel_error(other),
            })?;

        let author = row_to_user(author_row).map_err(CheepRepositoryError::query)?;
        row_to_cheep(stored, author, BTreeSet::new())
    }

    async fn find_by_id(&self, id: CheepId) -> Result<Option<Cheep>, CheepRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(CheepRow, UserRow)> = cheeps::table
            .inner_join(users::table)
            .filter(cheeps::id.eq(id.get()))
            .select((CheepRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut cheeps = assemble(&mut conn, vec![row]).await?;
        Ok(cheeps.pop())
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<Cheep>, CheepRepositoryError> {
        let (offset, limit) = to_sql_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CheepRow, UserRow)> = cheeps::table
            .inner_join(users::table)
            .order((cheeps::created_at.desc(), cheeps::id.desc()))
            .offset(offset)
            .limit(limit)
            .select((CheepRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        assemble(&mut conn, rows).await
    }

    async fn page_by_author(
        &self,
        author: &UserId,
        request: PageRequest,
    ) -> Result<Vec<Cheep>, CheepRepositoryError> {
        let (offset, limit) = to_sql_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CheepRow, UserRow)> = cheeps::table
            .inner_join(users::table)
            .filter(cheeps::author_id.eq(author.as_ref()))
            .order((cheeps::created_at.desc(), cheeps::id.desc()))
            .offset(offset)
            .limit(limit)
            .select((CheepRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        assemble(&mut conn, rows).await
    }

    async fn like(&self, user: &UserId, cheep: CheepId) -> Result<LikeOutcome, CheepRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if !cheep_exists(&mut conn, cheep).await? {
            return Ok(LikeOutcome::CheepNotFound);
        }
        let row = NewCheepLikeRow {
            cheep_id: cheep.get(),
            user_id: user.as_ref(),
        };
        diesel::insert_into(cheep_likes::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(LikeOutcome::Liked)
    }

    async fn unlike(
        &self,
        user: &UserId,
        cheep: CheepId,
    ) -> Result<UnlikeOutcome, CheepRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            cheep_likes::table
                .filter(cheep_likes::cheep_id.eq(cheep.get()))
                .filter(cheep_likes::user_id.eq(user.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if deleted > 0 {
            return Ok(UnlikeOutcome::Unliked);
        }
        Ok(if cheep_exists(&mut conn, cheep).await? {
            UnlikeOutcome::NotLiked
        } else {
            UnlikeOutcome::CheepNotFound
        })
    }
}
