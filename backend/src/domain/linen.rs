//! Bed-linen rental reservations.
//!
//! Each user holds at most one reservation: either they bring their own
//! linen or they rent a number of sets at a fixed price. The rent quantity
//! lives inside the [`LinenChoice::Rent`] variant, so a "bringing own"
//! reservation cannot carry a stray quantity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Rental price per linen set for the entire stay, in SEK.
pub const LINEN_SET_PRICE_SEK: u32 = 200;

/// Upper bound on sets a single reservation may rent. Keeps the derived
/// cost arithmetic comfortably inside `u32` for any realistic roster.
pub const LINEN_RENT_MAX_SETS: u32 = 100;

/// Validation errors returned by the linen constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinenValidationError {
    /// A rent reservation must cover at least one set.
    ZeroRentSets,
    /// A rent reservation may cover at most [`LINEN_RENT_MAX_SETS`] sets.
    TooManyRentSets,
    /// Unrecognised choice label in inbound data.
    UnknownChoice,
}

impl fmt::Display for LinenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRentSets => write!(f, "rented sets must be at least 1"),
            Self::TooManyRentSets => {
                write!(f, "rented sets must be at most {LINEN_RENT_MAX_SETS}")
            }
            Self::UnknownChoice => write!(f, "linen choice must be bringing_own or rent"),
        }
    }
}

impl std::error::Error for LinenValidationError {}

/// A user's linen decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "choice", rename_all = "snake_case")]
pub enum LinenChoice {
    /// The user brings their own bed linen and towels.
    BringingOwn,
    /// The user rents `sets` sets at [`LINEN_SET_PRICE_SEK`] each.
    Rent {
        /// Number of rented sets, at least 1.
        sets: u32,
    },
}

impl LinenChoice {
    /// Construct a rent choice, rejecting a zero or outsized quantity.
    pub const fn rent(sets: u32) -> Result<Self, LinenValidationError> {
        if sets == 0 {
            return Err(LinenValidationError::ZeroRentSets);
        }
        if sets > LINEN_RENT_MAX_SETS {
            return Err(LinenValidationError::TooManyRentSets);
        }
        Ok(Self::Rent { sets })
    }

    /// Number of sets this choice adds to the rental order (0 for own linen).
    #[must_use]
    pub const fn rental_sets(&self) -> u32 {
        match self {
            Self::BringingOwn => 0,
            Self::Rent { sets } => *sets,
        }
    }
}

/// A user's singleton linen reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinenReservation {
    /// Ledger identifier, preserved across updates.
    pub id: Uuid,
    /// Owning user; unique across the ledger.
    pub user_id: UserId,
    /// Current decision.
    pub choice: LinenChoice,
}

/// Trip-wide rental totals, recomputed from the full reservation list on
/// every read rather than cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinenSummary {
    /// Total number of sets to order.
    pub total_rentals: u32,
    /// `total_rentals * LINEN_SET_PRICE_SEK`.
    pub total_cost_sek: u32,
}

impl LinenSummary {
    /// Derive the totals from the current reservations.
    #[must_use]
    pub fn from_reservations(reservations: &[LinenReservation]) -> Self {
        let total_rentals = reservations
            .iter()
            .map(|reservation| reservation.choice.rental_sets())
            .sum::<u32>();
        Self {
            total_rentals,
            total_cost_sek: total_rentals * LINEN_SET_PRICE_SEK,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn reservation(choice: LinenChoice) -> LinenReservation {
        LinenReservation {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            choice,
        }
    }

    #[test]
    fn rent_rejects_zero_sets() {
        assert_eq!(LinenChoice::rent(0), Err(LinenValidationError::ZeroRentSets));
    }

    #[test]
    fn rent_rejects_quantities_beyond_the_cap() {
        assert_eq!(
            LinenChoice::rent(LINEN_RENT_MAX_SETS + 1),
            Err(LinenValidationError::TooManyRentSets)
        );
        assert_eq!(
            LinenChoice::rent(30_000_000),
            Err(LinenValidationError::TooManyRentSets)
        );
    }

    #[test]
    fn rent_accepts_the_cap_itself() {
        let choice = LinenChoice::rent(LINEN_RENT_MAX_SETS).expect("cap is a valid quantity");
        assert_eq!(choice.rental_sets(), LINEN_RENT_MAX_SETS);
    }

    #[test]
    fn summary_cost_stays_within_range_at_the_cap() {
        let reservations = vec![
            reservation(LinenChoice::rent(LINEN_RENT_MAX_SETS).expect("valid quantity")),
            reservation(LinenChoice::rent(LINEN_RENT_MAX_SETS).expect("valid quantity")),
        ];
        let summary = LinenSummary::from_reservations(&reservations);
        assert_eq!(summary.total_rentals, 200);
        assert_eq!(summary.total_cost_sek, 40_000);
    }

    #[test]
    fn bringing_own_contributes_no_sets() {
        assert_eq!(LinenChoice::BringingOwn.rental_sets(), 0);
    }

    #[test]
    fn summary_counts_only_rentals() {
        let reservations = vec![
            reservation(LinenChoice::rent(2).expect("valid quantity")),
            reservation(LinenChoice::BringingOwn),
            reservation(LinenChoice::rent(1).expect("valid quantity")),
        ];
        let summary = LinenSummary::from_reservations(&reservations);
        assert_eq!(summary.total_rentals, 3);
        assert_eq!(summary.total_cost_sek, 600);
    }

    #[test]
    fn summary_of_empty_ledger_is_zero() {
        let summary = LinenSummary::from_reservations(&[]);
        assert_eq!(summary.total_rentals, 0);
        assert_eq!(summary.total_cost_sek, 0);
    }
}
