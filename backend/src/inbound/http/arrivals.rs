//! Arrival coordination handlers.
//!
//! ```text
//! GET    /api/v1/arrivals
//! GET    /api/v1/arrivals/me
//! PUT    /api/v1/arrivals/me {"arrivesAt":"2026-02-13T15:00:00Z","transport":"car","notes":"..."}
//! DELETE /api/v1/arrivals/me
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ArrivalRosterEntry;
use crate::domain::{ArrivalRecord, Error, TransportMode, UpsertArrival};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, parse_timestamp};

/// Request body for `PUT /api/v1/arrivals/me`.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertArrivalRequest {
    /// Estimated arrival, RFC 3339.
    pub arrives_at: String,
    /// `car` or `train`.
    pub transport: String,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpsertArrivalRequest {
    fn into_upsert(self) -> Result<UpsertArrival, Error> {
        let arrives_at = parse_timestamp("arrivesAt", &self.arrives_at)?;
        let transport = self
            .transport
            .parse::<TransportMode>()
            .map_err(|err| field_error("transport", err.to_string()))?;
        Ok(UpsertArrival {
            arrives_at,
            transport,
            notes: self.notes,
        })
    }
}

/// One declaration as rendered to clients.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalDto {
    /// Ledger identifier, stable across updates.
    pub id: String,
    /// Declaring user.
    pub user_id: String,
    /// Estimated arrival, RFC 3339.
    pub arrives_at: String,
    /// Transport mode label.
    pub transport: String,
    /// Notes; empty string when none were given.
    pub notes: String,
}

impl ArrivalDto {
    fn from_record(record: ArrivalRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            arrives_at: record.arrives_at.to_rfc3339(),
            transport: record.transport.to_string(),
            notes: record.notes,
        }
    }
}

/// One roster row: a declaration plus its owner's display name.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRosterEntryDto {
    /// The declaration.
    #[serde(flatten)]
    pub arrival: ArrivalDto,
    /// Owner's display name, `"Unknown"` when unresolvable.
    pub display_name: String,
}

/// Every declaration with attribution.
#[utoipa::path(
    get,
    path = "/api/v1/arrivals",
    responses(
        (status = 200, description = "Arrival roster", body = [ArrivalRosterEntryDto]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["arrivals"],
    operation_id = "arrivalRoster"
)]
#[get("/arrivals")]
pub async fn roster(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ArrivalRosterEntryDto>>> {
    session.require_user_id()?;
    let entries = state.arrivals.roster().await?;
    Ok(web::Json(
        entries
            .into_iter()
            .map(|entry| {
                let ArrivalRosterEntry {
                    record,
                    display_name,
                } = entry;
                ArrivalRosterEntryDto {
                    arrival: ArrivalDto::from_record(record),
                    display_name: display_name.to_string(),
                }
            })
            .collect(),
    ))
}

/// The session user's own declaration.
#[utoipa::path(
    get,
    path = "/api/v1/arrivals/me",
    responses(
        (status = 200, description = "Own declaration", body = ArrivalDto),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No declaration yet", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["arrivals"],
    operation_id = "myArrival"
)]
#[get("/arrivals/me")]
pub async fn my_arrival(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ArrivalDto>> {
    let user_id = session.require_user_id()?;
    let record = state
        .arrivals
        .arrival_for(user_id)
        .await?
        .ok_or_else(|| Error::not_found("no arrival declared yet"))?;
    Ok(web::Json(ArrivalDto::from_record(record)))
}

/// Create or replace the session user's declaration.
#[utoipa::path(
    put,
    path = "/api/v1/arrivals/me",
    request_body = UpsertArrivalRequest,
    responses(
        (status = 200, description = "Declaration stored", body = ArrivalDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["arrivals"],
    operation_id = "upsertArrival"
)]
#[put("/arrivals/me")]
pub async fn upsert_arrival(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpsertArrivalRequest>,
) -> ApiResult<web::Json<ArrivalDto>> {
    let user_id = session.require_user_id()?;
    let upsert = payload.into_inner().into_upsert()?;
    let stored = state.arrivals.upsert(user_id, upsert).await?;
    Ok(web::Json(ArrivalDto::from_record(stored)))
}

/// Withdraw the session user's declaration; succeeds even when none exists.
#[utoipa::path(
    delete,
    path = "/api/v1/arrivals/me",
    responses(
        (status = 204, description = "Declaration withdrawn (or none existed)"),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["arrivals"],
    operation_id = "withdrawArrival"
)]
#[delete("/arrivals/me")]
pub async fn withdraw_arrival(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.arrivals.withdraw(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::auth::{LoginRequest, login};
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixtures()))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(roster)
                    .service(my_arrival)
                    .service(upsert_arrival)
                    .service(withdraw_arrival),
            )
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&LoginRequest {
                username: "anna".into(),
                password: "cabintrip".into(),
            })
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert!(response.status().is_success());
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn roster_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/arrivals")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn own_arrival_is_not_found_before_declaring() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/arrivals/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn declaring_an_arrival_echoes_the_stored_record() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/arrivals/me")
                .cookie(cookie)
                .set_json(&UpsertArrivalRequest {
                    arrives_at: "2026-02-13T15:00:00Z".into(),
                    transport: "train".into(),
                    notes: Some("on the 16:05 from town".into()),
                })
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("arrival payload");
        assert_eq!(value.get("transport").and_then(Value::as_str), Some("train"));
        assert_eq!(
            value.get("notes").and_then(Value::as_str),
            Some("on the 16:05 from town")
        );
    }

    #[actix_web::test]
    async fn missing_notes_come_back_as_empty_string() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/arrivals/me")
                .cookie(cookie)
                .set_json(&UpsertArrivalRequest {
                    arrives_at: "2026-02-13T15:00:00Z".into(),
                    transport: "car".into(),
                    notes: None,
                })
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("arrival payload");
        assert_eq!(value.get("notes").and_then(Value::as_str), Some(""));
    }

    #[rstest]
    #[case("not-a-date", "car", "arrivesAt")]
    #[case("2026-02-13T15:00:00Z", "bus", "transport")]
    #[case("2026-02-13T15:00:00Z", "CAR", "transport")]
    #[actix_web::test]
    async fn invalid_declarations_are_rejected(
        #[case] arrives_at: &str,
        #[case] transport: &str,
        #[case] field: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/arrivals/me")
                .cookie(cookie)
                .set_json(&UpsertArrivalRequest {
                    arrives_at: arrives_at.into(),
                    transport: transport.into(),
                    notes: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value
                .get("details")
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some(field)
        );
    }

    #[actix_web::test]
    async fn withdrawing_without_a_declaration_still_returns_no_content() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/arrivals/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }
}
