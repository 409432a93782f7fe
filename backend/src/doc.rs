//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! REST API: every HTTP endpoint from the inbound layer, the request and
//! response schemas they reference, and the session cookie security scheme.
//! Swagger UI serves the generated document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::arrival::TransportMode;
use crate::domain::error::{Error, ErrorCode};
use crate::domain::linen::LinenSummary;
use crate::domain::meal::MealRef;
use crate::domain::shopping_list::ShoppingListEntry;
use crate::domain::user::DisplayName;
use crate::inbound::http::arrivals::{ArrivalDto, ArrivalRosterEntryDto, UpsertArrivalRequest};
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::linens::{LinenChoiceRequest, ReservationDto, RosterDto, RosterEntryDto};
use crate::inbound::http::meals::{AddIngredientRequest, IngredientDto, MealDto};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cabin trip backend API",
        description = "HTTP interface for shared grocery lists, bed-linen rental sign-up, \
                       and arrival scheduling."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::list_ingredients,
        crate::inbound::http::meals::add_ingredient,
        crate::inbound::http::meals::remove_ingredient,
        crate::inbound::http::meals::shopping_list,
        crate::inbound::http::linens::roster,
        crate::inbound::http::linens::my_reservation,
        crate::inbound::http::linens::upsert_reservation,
        crate::inbound::http::arrivals::roster,
        crate::inbound::http::arrivals::my_arrival,
        crate::inbound::http::arrivals::upsert_arrival,
        crate::inbound::http::arrivals::withdraw_arrival,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        DisplayName,
        LoginRequest,
        LoginResponse,
        MealDto,
        IngredientDto,
        AddIngredientRequest,
        ShoppingListEntry,
        MealRef,
        LinenChoiceRequest,
        ReservationDto,
        RosterEntryDto,
        RosterDto,
        LinenSummary,
        UpsertArrivalRequest,
        ArrivalDto,
        ArrivalRosterEntryDto,
        TransportMode,
    )),
    tags(
        (name = "auth", description = "Login and logout"),
        (name = "meals", description = "Meal catalog, ingredient ledgers, and the shopping list"),
        (name = "linens", description = "Bed-linen rental sign-up"),
        (name = "arrivals", description = "Arrival-time coordination"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_registers_every_surface_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/meals",
            "/api/v1/meals/{meal_id}/ingredients",
            "/api/v1/ingredients/{ingredient_id}",
            "/api/v1/shopping-list",
            "/api/v1/linens",
            "/api/v1/linens/me",
            "/api/v1/arrivals",
            "/api/v1/arrivals/me",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should describe {path}"
            );
        }
    }
}
