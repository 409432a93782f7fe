//! PostgreSQL-backed [`LinenReservationRepository`] implementation using
//! Diesel.
//!
//! The choice is stored as a single integer column: zero rented sets encodes
//! "bringing own linen". The encoding never leaves this adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::linen::{LinenChoice, LinenReservation};
use crate::domain::ports::{LinenRepositoryError, LinenReservationRepository};
use crate::domain::user::UserId;

use super::diesel_helpers::{DieselFailure, classify_diesel_error, collect_rows};
use super::models::{LinenReservationRow, NewLinenReservationRow};
use super::pool::{DbPool, PoolError};
use super::schema::linen_reservations;

/// Diesel-backed implementation of the [`LinenReservationRepository`] port.
#[derive(Clone)]
pub struct DieselLinenReservationRepository {
    pool: DbPool,
}

impl DieselLinenReservationRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to linen repository errors.
fn map_pool_error(error: PoolError) -> LinenRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LinenRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to linen repository errors.
///
/// The only unique constraint on the table is the per-user one, so a
/// violation means a racing first sign-up by the same user.
fn map_diesel_error(error: diesel::result::Error) -> LinenRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => LinenRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation { message } => {
            LinenRepositoryError::already_reserved(message)
        }
        DieselFailure::Query { message } => LinenRepositoryError::query(message),
    }
}

/// Encode a choice as the stored rental-set count.
///
/// Validated choices always fit; a count beyond `i32` can only come from a
/// directly constructed variant and is refused rather than stored mangled.
fn choice_to_rental_sets(choice: LinenChoice) -> Result<i32, String> {
    let sets = choice.rental_sets();
    i32::try_from(sets).map_err(|_| format!("rental count {sets} exceeds the stored column range"))
}

/// Convert a database row to a domain [`LinenReservation`].
fn row_to_reservation(row: LinenReservationRow) -> Result<LinenReservation, String> {
    let choice = match u32::try_from(row.rental_sets) {
        Ok(0) => LinenChoice::BringingOwn,
        Ok(sets) => LinenChoice::rent(sets)
            .map_err(|err| format!("linen reservation {} failed validation: {err}", row.id))?,
        Err(_) => {
            return Err(format!(
                "linen reservation {} has a negative rental count",
                row.id
            ));
        }
    };
    Ok(LinenReservation {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        choice,
    })
}

#[async_trait]
impl LinenReservationRepository for DieselLinenReservationRepository {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<LinenReservation>, LinenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<LinenReservationRow> = linen_reservations::table
            .filter(linen_reservations::user_id.eq(user_id.as_uuid()))
            .select(LinenReservationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_reservation)
            .transpose()
            .map_err(LinenRepositoryError::query)
    }

    async fn insert(
        &self,
        user_id: UserId,
        choice: LinenChoice,
    ) -> Result<LinenReservation, LinenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLinenReservationRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            rental_sets: choice_to_rental_sets(choice).map_err(LinenRepositoryError::query)?,
        };

        let row: LinenReservationRow = diesel::insert_into(linen_reservations::table)
            .values(&new_row)
            .returning(LinenReservationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_reservation(row).map_err(LinenRepositoryError::query)
    }

    async fn update(
        &self,
        id: Uuid,
        choice: LinenChoice,
    ) -> Result<LinenReservation, LinenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rental_sets = choice_to_rental_sets(choice).map_err(LinenRepositoryError::query)?;
        let row: LinenReservationRow =
            diesel::update(linen_reservations::table.filter(linen_reservations::id.eq(id)))
                .set(linen_reservations::rental_sets.eq(rental_sets))
                .returning(LinenReservationRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        row_to_reservation(row).map_err(LinenRepositoryError::query)
    }

    async fn list(&self) -> Result<Vec<LinenReservation>, LinenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<LinenReservationRow> = linen_reservations::table
            .select(LinenReservationRow::as_select())
            .order(linen_reservations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(row_to_reservation),
            LinenRepositoryError::query,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, LinenRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_already_reserved() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let violation = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        let err = map_diesel_error(violation);
        assert!(matches!(err, LinenRepositoryError::AlreadyReserved { .. }));
    }

    #[rstest]
    #[case(LinenChoice::BringingOwn, 0)]
    #[case(LinenChoice::Rent { sets: 3 }, 3)]
    fn choice_encodes_as_rental_sets(#[case] choice: LinenChoice, #[case] stored: i32) {
        assert_eq!(choice_to_rental_sets(choice), Ok(stored));
    }

    #[rstest]
    fn oversized_rental_count_is_refused_not_clamped() {
        let message = choice_to_rental_sets(LinenChoice::Rent { sets: u32::MAX })
            .expect_err("out-of-range count must fail");
        assert!(message.contains("exceeds the stored column range"));
    }

    #[rstest]
    #[case(0, LinenChoice::BringingOwn)]
    #[case(2, LinenChoice::Rent { sets: 2 })]
    fn row_decodes_rental_sets(#[case] rental_sets: i32, #[case] expected: LinenChoice) {
        let row = LinenReservationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rental_sets,
        };

        let reservation = row_to_reservation(row).expect("valid row");
        assert_eq!(reservation.choice, expected);
    }

    #[rstest]
    fn negative_rental_count_is_rejected() {
        let row = LinenReservationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rental_sets: -1,
        };

        let message = row_to_reservation(row).expect_err("negative count must fail");
        assert!(message.contains("negative rental count"));
    }
}
