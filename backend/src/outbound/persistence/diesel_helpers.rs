//! Shared helpers for the Diesel adapters.
//!
//! Each adapter owns its port error enum, so error mapping happens in two
//! steps: this module classifies raw Diesel failures into a small shared
//! shape, and the adapter translates that shape into its own variants.

use tracing::debug;

/// Adapter-agnostic classification of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation {
        /// Constraint message reported by PostgreSQL.
        message: String,
    },
    /// Any other query or mutation failure.
    Query {
        /// Stable message safe to surface through the port error.
        message: &'static str,
    },
}

/// Classify a Diesel error, emitting debug context for diagnosis.
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query {
            message: "record not found",
        },
        DieselError::QueryBuilderError(_) => DieselFailure::Query {
            message: "database query error",
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                message: info.message().to_owned(),
            }
        }
        _ => DieselFailure::Query {
            message: "database error",
        },
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
///
/// Row conversions fail only when stored data no longer passes domain
/// validation, so the message names the offending row for diagnosis.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
