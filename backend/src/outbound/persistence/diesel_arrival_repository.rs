//! PostgreSQL-backed [`ArrivalRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::arrival::{ArrivalRecord, TransportMode, UpsertArrival};
use crate::domain::ports::{ArrivalRepository, ArrivalRepositoryError};
use crate::domain::user::UserId;

use super::diesel_helpers::{DieselFailure, classify_diesel_error, collect_rows};
use super::models::{ArrivalRow, NewArrivalRow};
use super::pool::{DbPool, PoolError};
use super::schema::arrivals;

/// Diesel-backed implementation of the [`ArrivalRepository`] port.
#[derive(Clone)]
pub struct DieselArrivalRepository {
    pool: DbPool,
}

impl DieselArrivalRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to arrival repository errors.
fn map_pool_error(error: PoolError) -> ArrivalRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ArrivalRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to arrival repository errors.
///
/// The only unique constraint on the table is the per-user one, so a
/// violation means a racing first declaration by the same user.
fn map_diesel_error(error: diesel::result::Error) -> ArrivalRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => {
            ArrivalRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { message } => {
            ArrivalRepositoryError::already_declared(message)
        }
        DieselFailure::Query { message } => ArrivalRepositoryError::query(message),
    }
}

/// Convert a database row to a domain [`ArrivalRecord`].
fn row_to_record(row: ArrivalRow) -> Result<ArrivalRecord, String> {
    let transport = row
        .transport
        .parse::<TransportMode>()
        .map_err(|err| format!("arrival {} failed validation: {err}", row.id))?;
    Ok(ArrivalRecord {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        arrives_at: row.arrives_at,
        transport,
        notes: row.notes,
    })
}

#[async_trait]
impl ArrivalRepository for DieselArrivalRepository {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<ArrivalRecord>, ArrivalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArrivalRow> = arrivals::table
            .filter(arrivals::user_id.eq(user_id.as_uuid()))
            .select(ArrivalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record)
            .transpose()
            .map_err(ArrivalRepositoryError::query)
    }

    async fn insert(
        &self,
        user_id: UserId,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, ArrivalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let notes = arrival.notes_or_empty();
        let new_row = NewArrivalRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            arrives_at: arrival.arrives_at,
            transport: arrival.transport.as_str(),
            notes: notes.as_str(),
        };

        let row: ArrivalRow = diesel::insert_into(arrivals::table)
            .values(&new_row)
            .returning(ArrivalRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(row).map_err(ArrivalRepositoryError::query)
    }

    async fn update(
        &self,
        id: Uuid,
        arrival: UpsertArrival,
    ) -> Result<ArrivalRecord, ArrivalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ArrivalRow = diesel::update(arrivals::table.filter(arrivals::id.eq(id)))
            .set((
                arrivals::arrives_at.eq(arrival.arrives_at),
                arrivals::transport.eq(arrival.transport.as_str()),
                arrivals::notes.eq(arrival.notes_or_empty()),
            ))
            .returning(ArrivalRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(row).map_err(ArrivalRepositoryError::query)
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<bool, ArrivalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows =
            diesel::delete(arrivals::table.filter(arrivals::user_id.eq(user_id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }

    async fn list(&self) -> Result<Vec<ArrivalRecord>, ArrivalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArrivalRow> = arrivals::table
            .select(ArrivalRow::as_select())
            .order(arrivals::arrives_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(row_to_record),
            ArrivalRepositoryError::query,
        )
    }
}
