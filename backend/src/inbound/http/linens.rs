//! Bed-linen sign-up handlers.
//!
//! ```text
//! GET /api/v1/linens
//! GET /api/v1/linens/me
//! PUT /api/v1/linens/me {"choice":"rent","sets":2}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{LinenRoster, LinenRosterEntry};
use crate::domain::{Error, LINEN_SET_PRICE_SEK, LinenChoice, LinenReservation, LinenSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// Request body for `PUT /api/v1/linens/me`.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinenChoiceRequest {
    /// `bringing_own` or `rent`.
    pub choice: String,
    /// Number of sets; required for `rent`, must be between 1 and 100,
    /// ignored for `bringing_own`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
}

impl LinenChoiceRequest {
    fn into_choice(self) -> Result<LinenChoice, Error> {
        match self.choice.as_str() {
            "bringing_own" => Ok(LinenChoice::BringingOwn),
            "rent" => {
                let sets = self
                    .sets
                    .ok_or_else(|| field_error("sets", "sets is required when renting"))?;
                LinenChoice::rent(sets).map_err(|err| field_error("sets", err.to_string()))
            }
            _ => Err(field_error(
                "choice",
                "choice must be bringing_own or rent",
            )),
        }
    }
}

/// One reservation as rendered to clients.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    /// Ledger identifier, stable across updates.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// `bringing_own` or `rent`.
    pub choice: String,
    /// Rented sets; absent when bringing own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Cost in SEK for this reservation.
    pub cost_sek: u32,
}

impl ReservationDto {
    fn from_reservation(reservation: LinenReservation) -> Self {
        let (choice, sets) = match reservation.choice {
            LinenChoice::BringingOwn => ("bringing_own", None),
            LinenChoice::Rent { sets } => ("rent", Some(sets)),
        };
        Self {
            id: reservation.id.to_string(),
            user_id: reservation.user_id.to_string(),
            choice: choice.to_owned(),
            sets,
            cost_sek: reservation.choice.rental_sets() * LINEN_SET_PRICE_SEK,
        }
    }
}

/// One roster row: a reservation plus its owner's display name.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryDto {
    /// The reservation.
    #[serde(flatten)]
    pub reservation: ReservationDto,
    /// Owner's display name, `"Unknown"` when unresolvable.
    pub display_name: String,
}

/// Roster response: every sign-up plus derived totals.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterDto {
    /// All current sign-ups.
    pub entries: Vec<RosterEntryDto>,
    /// Derived rental totals.
    pub summary: LinenSummary,
}

impl RosterDto {
    fn from_roster(linen_roster: LinenRoster) -> Self {
        let LinenRoster { entries, summary } = linen_roster;
        Self {
            entries: entries
                .into_iter()
                .map(|entry| {
                    let LinenRosterEntry {
                        reservation,
                        display_name,
                    } = entry;
                    RosterEntryDto {
                        reservation: ReservationDto::from_reservation(reservation),
                        display_name: display_name.to_string(),
                    }
                })
                .collect(),
            summary,
        }
    }
}

/// Every sign-up with attribution plus the rental totals.
#[utoipa::path(
    get,
    path = "/api/v1/linens",
    responses(
        (status = 200, description = "Sign-up roster", body = RosterDto),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["linens"],
    operation_id = "linenRoster"
)]
#[get("/linens")]
pub async fn roster(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<RosterDto>> {
    session.require_user_id()?;
    let roster = state.linens.roster().await?;
    Ok(web::Json(RosterDto::from_roster(roster)))
}

/// The session user's own reservation.
#[utoipa::path(
    get,
    path = "/api/v1/linens/me",
    responses(
        (status = 200, description = "Own reservation", body = ReservationDto),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No reservation yet", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["linens"],
    operation_id = "myLinenReservation"
)]
#[get("/linens/me")]
pub async fn my_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ReservationDto>> {
    let user_id = session.require_user_id()?;
    let reservation = state
        .linens
        .reservation_for(user_id)
        .await?
        .ok_or_else(|| Error::not_found("no linen reservation yet"))?;
    Ok(web::Json(ReservationDto::from_reservation(reservation)))
}

/// Create or replace the session user's reservation.
#[utoipa::path(
    put,
    path = "/api/v1/linens/me",
    request_body = LinenChoiceRequest,
    responses(
        (status = 200, description = "Reservation stored", body = ReservationDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["linens"],
    operation_id = "upsertLinenReservation"
)]
#[put("/linens/me")]
pub async fn upsert_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LinenChoiceRequest>,
) -> ApiResult<web::Json<ReservationDto>> {
    let user_id = session.require_user_id()?;
    let choice = payload.into_inner().into_choice()?;
    let stored = state.linens.upsert(user_id, choice).await?;
    Ok(web::Json(ReservationDto::from_reservation(stored)))
}
