//! Meal, ingredient, and shopping-list handlers.
//!
//! ```text
//! GET    /api/v1/meals
//! GET    /api/v1/meals/{meal_id}/ingredients
//! POST   /api/v1/meals/{meal_id}/ingredients {"name":"Bread"}
//! DELETE /api/v1/ingredients/{ingredient_id}
//! GET    /api/v1/shopping-list
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AttributedIngredient, MealOverview};
use crate::domain::{
    Error, IngredientId, IngredientName, IngredientValidationError, MealId, ShoppingListEntry,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// One meal as rendered in the catalog listing.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealDto {
    /// Catalog identifier.
    pub id: String,
    /// Meal name.
    pub name: String,
    /// Scheduled time, RFC 3339, when the plan fixes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    /// External menu link for meals without a tracked list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_url: Option<String>,
    /// Whether this meal tracks an ingredient list.
    pub supports_tracking: bool,
    /// Number of tracked ingredients; absent for external-menu meals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_count: Option<u64>,
}

impl MealDto {
    fn from_overview(overview: MealOverview) -> Self {
        let MealOverview {
            meal,
            ingredient_count,
        } = overview;
        Self {
            id: meal.id().to_string(),
            name: meal.name().to_owned(),
            scheduled_for: meal.scheduled_for().map(|at| at.to_rfc3339()),
            menu_url: meal.menu_url().map(url::Url::to_string),
            supports_tracking: meal.supports_tracking(),
            ingredient_count,
        }
    }
}

/// One ingredient row with contributor attribution.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    /// Ledger identifier.
    pub id: String,
    /// Item name in the contributor's original casing.
    pub name: String,
    /// Meal the row belongs to.
    pub meal_id: String,
    /// Contributor's user id; deletion is allowed only for this user.
    pub contributed_by: String,
    /// Contributor's display name, `"Unknown"` when unresolvable.
    pub contributor_name: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl IngredientDto {
    fn from_attributed(entry: AttributedIngredient) -> Self {
        let AttributedIngredient {
            ingredient,
            contributor_name,
        } = entry;
        Self {
            id: ingredient.id.to_string(),
            name: ingredient.name.as_str().to_owned(),
            meal_id: ingredient.meal_id.to_string(),
            contributed_by: ingredient.contributed_by.to_string(),
            contributor_name: contributor_name.to_string(),
            created_at: ingredient.created_at.to_rfc3339(),
        }
    }
}

/// Request body for adding an ingredient.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddIngredientRequest {
    /// Item name; surrounding whitespace is trimmed before validation.
    pub name: String,
}

fn parse_meal_id(raw: &str) -> Result<MealId, Error> {
    MealId::new(raw).map_err(|_| field_error("mealId", "meal id must be a valid UUID"))
}

fn parse_ingredient_id(raw: &str) -> Result<IngredientId, Error> {
    IngredientId::new(raw)
        .map_err(|_| field_error("ingredientId", "ingredient id must be a valid UUID"))
}

fn map_name_validation_error(err: IngredientValidationError) -> Error {
    field_error("name", err.to_string())
}

/// The trip's meal catalog with per-meal ingredient counts.
#[utoipa::path(
    get,
    path = "/api/v1/meals",
    responses(
        (status = 200, description = "Meal catalog", body = [MealDto]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "listMeals"
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MealDto>>> {
    session.require_user_id()?;
    let overviews = state.meal_planning.list_meals().await?;
    Ok(web::Json(
        overviews.into_iter().map(MealDto::from_overview).collect(),
    ))
}

/// One meal's ingredient list; empty for external-menu meals.
#[utoipa::path(
    get,
    path = "/api/v1/meals/{meal_id}/ingredients",
    params(("meal_id" = String, Path, description = "Meal UUID")),
    responses(
        (status = 200, description = "Ingredients", body = [IngredientDto]),
        (status = 400, description = "Malformed meal id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown meal", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "listIngredients"
)]
#[get("/meals/{meal_id}/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<IngredientDto>>> {
    session.require_user_id()?;
    let meal_id = parse_meal_id(&path.into_inner())?;
    let rows = state.meal_planning.ingredients_for_meal(meal_id).await?;
    Ok(web::Json(
        rows.into_iter().map(IngredientDto::from_attributed).collect(),
    ))
}

/// Add an ingredient to a meal's list on behalf of the session user.
#[utoipa::path(
    post,
    path = "/api/v1/meals/{meal_id}/ingredients",
    params(("meal_id" = String, Path, description = "Meal UUID")),
    request_body = AddIngredientRequest,
    responses(
        (status = 201, description = "Ingredient added", body = IngredientDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown meal", body = Error),
        (status = 409, description = "Name already listed for this meal", body = Error),
        (status = 422, description = "Meal uses an external menu", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "addIngredient"
)]
#[post("/meals/{meal_id}/ingredients")]
pub async fn add_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let meal_id = parse_meal_id(&path.into_inner())?;
    let name =
        IngredientName::new(payload.into_inner().name).map_err(map_name_validation_error)?;

    let stored = state
        .meal_planning
        .add_ingredient(meal_id, name, user_id)
        .await?;
    Ok(HttpResponse::Created().json(IngredientDto::from_attributed(stored)))
}

/// Remove an ingredient; only its contributor may do so.
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{ingredient_id}",
    params(("ingredient_id" = String, Path, description = "Ingredient UUID")),
    responses(
        (status = 204, description = "Ingredient removed"),
        (status = 400, description = "Malformed ingredient id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not the contributor", body = Error),
        (status = 404, description = "Unknown ingredient", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "removeIngredient"
)]
#[delete("/ingredients/{ingredient_id}")]
pub async fn remove_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let ingredient_id = parse_ingredient_id(&path.into_inner())?;
    state
        .meal_planning
        .remove_ingredient(ingredient_id, user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The trip-wide deduplicated shopping list.
#[utoipa::path(
    get,
    path = "/api/v1/shopping-list",
    responses(
        (status = 200, description = "Aggregated shopping list", body = [ShoppingListEntry]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["meals"],
    operation_id = "shoppingList"
)]
#[get("/shopping-list")]
pub async fn shopping_list(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ShoppingListEntry>>> {
    session.require_user_id()?;
    let entries = state.meal_planning.shopping_list().await?;
    Ok(web::Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FIXTURE_MEAL_ID, FIXTURE_USER_ID};
    use crate::inbound::http::auth::{LoginRequest, login};
    use actix_web::{App, test as actix_test, web};
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
                    .service(list_meals)
                    .service(list_ingredients)
                    .service(add_ingredient)
                    .service(remove_ingredient)
                    .service(shopping_list),
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
    async fn meal_catalog_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/meals")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn meal_catalog_returns_camel_case_json() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/meals")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("meal payload");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first.get("name").and_then(Value::as_str), Some("Breakfast"));
        assert_eq!(
            first.get("supportsTracking").and_then(Value::as_bool),
            Some(true)
        );
        assert_eq!(
            first.get("ingredientCount").and_then(Value::as_u64),
            Some(1)
        );
    }

    #[actix_web::test]
    async fn ingredient_listing_includes_attribution() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let uri = format!("/api/v1/meals/{FIXTURE_MEAL_ID}/ingredients");
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&uri)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("ingredient payload");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first.get("name").and_then(Value::as_str), Some("Bread"));
        assert_eq!(
            first.get("contributorName").and_then(Value::as_str),
            Some("anna")
        );
        assert_eq!(
            first.get("contributedBy").and_then(Value::as_str),
            Some(FIXTURE_USER_ID)
        );
    }

    #[actix_web::test]
    async fn adding_an_ingredient_returns_created() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let uri = format!("/api/v1/meals/{FIXTURE_MEAL_ID}/ingredients");
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&uri)
                .cookie(cookie)
                .set_json(&AddIngredientRequest {
                    name: "  Milk  ".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("ingredient payload");
        // Name is trimmed but keeps its casing.
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Milk"));
    }

    #[actix_web::test]
    async fn blank_ingredient_names_are_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let uri = format!("/api/v1/meals/{FIXTURE_MEAL_ID}/ingredients");
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&uri)
                .cookie(cookie)
                .set_json(&AddIngredientRequest { name: "   ".into() })
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
            Some("name")
        );
    }

    #[actix_web::test]
    async fn malformed_meal_ids_are_bad_requests() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/meals/not-a-uuid/ingredients")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn removing_an_ingredient_returns_no_content() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/ingredients/b5c2a1d4-3e6f-4a7b-8c9d-0e1f2a3b4c5d")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn shopping_list_returns_aggregated_entries() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/shopping-list")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("list payload");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first.get("name").and_then(Value::as_str), Some("Bread"));
        let needed_by = first
            .get("neededBy")
            .and_then(Value::as_array)
            .expect("meal refs");
        assert_eq!(
            needed_by[0].get("name").and_then(Value::as_str),
            Some("Breakfast")
        );
    }
}
