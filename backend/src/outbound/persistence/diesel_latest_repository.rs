//! PostgreSQL-backed `LatestRepository`, stored as a single row with id 1.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LATEST_UNSET, LatestRepository, LatestRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::LatestRow;
use super::pool::{DbPool, PoolError};
use super::schema::latest;

const LATEST_ROW_ID: i32 = 1;

#[derive(Clone)]
pub struct DieselLatestRepository {
    pool: DbPool,
}

impl DieselLatestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LatestRepositoryError {
    map_basic_pool_error(error, LatestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LatestRepositoryError {
    map_basic_diesel_error(
        error,
        LatestRepositoryError::query,
        LatestRepositoryError::connection,
    )
}

#[async_trait]
impl LatestRepository for DieselLatestRepository {
    async fn get_latest(&self) -> Result<i64, LatestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let value: Option<i64> = latest::table
            .filter(latest::id.eq(LATEST_ROW_ID))
            .select(latest::value)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(value.unwrap_or(LATEST_UNSET))
    }

    async fn update_latest(&self, value: i64) -> Result<(), LatestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = LatestRow {
            id: LATEST_ROW_ID,
            value,
        };
        diesel::insert_into(latest::table)
            .values(&row)
            .on_conflict(latest::id)
            .do_update()
            .set(latest::value.eq(excluded(latest::value)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
