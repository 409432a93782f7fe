//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. They exist solely to satisfy Diesel's type
//! requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{arrivals, ingredients, linen_reservations, meals, users};

/// Row struct for reading from the users table.
///
/// `username` is a lookup key only, so reads filter on the column without
/// selecting it.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub password_digest: String,
}

/// Row struct for reading from the meals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub menu_url: Option<String>,
}

/// Row struct for reading from the ingredients table.
///
/// `name_normalized` is a storage concern; reads reconstruct the normalized
/// form from `name` instead of selecting the column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub contributed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new ingredient rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: &'a str,
    pub name_normalized: &'a str,
    pub contributed_by: Uuid,
}

/// Row struct for reading from the linen_reservations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = linen_reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LinenReservationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rental_sets: i32,
}

/// Insertable struct for creating new linen reservation rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = linen_reservations)]
pub(crate) struct NewLinenReservationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rental_sets: i32,
}

/// Row struct for reading from the arrivals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = arrivals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArrivalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub arrives_at: DateTime<Utc>,
    pub transport: String,
    pub notes: String,
}

/// Insertable struct for creating new arrival rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = arrivals)]
pub(crate) struct NewArrivalRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub arrives_at: DateTime<Utc>,
    pub transport: &'a str,
    pub notes: &'a str,
}
