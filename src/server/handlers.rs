//! HTTP handlers for list, detail, index and account pages

use crate::config::TaxiConfig;
use crate::core::auth::{AuthContext, SessionStore, cookie_value};
use crate::core::entity::EntityId;
use crate::core::error::{ConfigError, EntityError, RequestError, TaxiResult};
use crate::core::kind::EntityKind;
use crate::core::listing::ListQueryOrchestrator;
use crate::entities::{Car, Driver, Manufacturer};
use crate::server::render::{TemplateRenderer, base_context, list_context};
use crate::storage::stores::{StoredRecord, TaxiStores};
use axum::{
    Extension, Form, Json,
    extract::{Path, Query, State, rejection::FormRejection},
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared state of the page handlers
#[derive(Clone)]
pub struct AppState {
    pub stores: TaxiStores,
    pub sessions: Arc<dyn SessionStore>,
    pub renderer: Arc<TemplateRenderer>,
    pub orchestrator: ListQueryOrchestrator,
    pub config: Arc<TaxiConfig>,
}

/// True when the client prefers JSON over a page.
///
/// Only the first media type listed in `Accept` is considered.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .and_then(|accept| accept.split(',').next())
        .and_then(|media| media.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_id(raw: &str) -> TaxiResult<EntityId> {
    raw.parse::<EntityId>().map_err(|_| {
        RequestError::InvalidEntityId {
            id: raw.to_string(),
        }
        .into()
    })
}

/// 302 redirect, as issued by the login flow and the gate
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

// =============================================================================
// Lists
// =============================================================================

/// List one kind of record, filtered by the kind's search parameter
///
/// Responds with the rendered list page, or with a JSON page when the
/// request accepts `application/json`.
pub async fn list_records<T: StoredRecord>(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> TaxiResult<Response> {
    let kind = T::KIND;
    let service = T::service(&state.stores);

    let result = state
        .orchestrator
        .list(
            Arc::as_ref(service),
            params.get(kind.search_field()).map(String::as_str),
            params.get("page").map(String::as_str),
        )
        .await?;

    if wants_json(&headers) {
        return Ok(Json(result.into_response()).into_response());
    }

    let context = list_context(&auth, &result);
    Ok(state
        .renderer
        .render(kind.list_template(), &context)?
        .into_response())
}

// =============================================================================
// Details
// =============================================================================

pub async fn manufacturer_detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    let id = parse_id(&id)?;
    let manufacturer = state
        .stores
        .manufacturers
        .get(id)
        .await?
        .ok_or(EntityError::NotFound {
            kind: EntityKind::Manufacturer,
            id,
        })?;

    let cars: Vec<Car> = state
        .stores
        .cars
        .list()
        .await?
        .into_iter()
        .filter(|car| car.manufacturer_id == id)
        .collect();

    let mut context = base_context(&auth);
    context.insert("manufacturer", &manufacturer);
    context.insert("cars", &cars);
    Ok(state
        .renderer
        .render(EntityKind::Manufacturer.detail_template(), &context)?
        .into_response())
}

pub async fn car_detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    let id = parse_id(&id)?;
    let car = state
        .stores
        .cars
        .get(id)
        .await?
        .ok_or(EntityError::NotFound {
            kind: EntityKind::Car,
            id,
        })?;

    let manufacturer: Option<Manufacturer> =
        state.stores.manufacturers.get(car.manufacturer_id).await?;
    let drivers: Vec<Driver> = state
        .stores
        .drivers
        .list()
        .await?
        .into_iter()
        .filter(|driver| car.has_driver(driver.id))
        .collect();

    let mut context = base_context(&auth);
    context.insert("car", &car);
    context.insert("manufacturer", &manufacturer);
    context.insert("drivers", &drivers);
    Ok(state
        .renderer
        .render(EntityKind::Car.detail_template(), &context)?
        .into_response())
}

pub async fn driver_detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> TaxiResult<Response> {
    let id = parse_id(&id)?;
    let driver = state
        .stores
        .drivers
        .get(id)
        .await?
        .ok_or(EntityError::NotFound {
            kind: EntityKind::Driver,
            id,
        })?;

    let cars: Vec<Car> = state
        .stores
        .cars
        .list()
        .await?
        .into_iter()
        .filter(|car| car.has_driver(id))
        .collect();

    let mut context = base_context(&auth);
    context.insert("driver", &driver);
    context.insert("cars", &cars);
    Ok(state
        .renderer
        .render(EntityKind::Driver.detail_template(), &context)?
        .into_response())
}

// =============================================================================
// Index
// =============================================================================

pub async fn index(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> TaxiResult<Response> {
    let mut context = base_context(&auth);
    context.insert("num_manufacturers", &state.stores.manufacturers.count().await?);
    context.insert("num_cars", &state.stores.cars.count().await?);
    context.insert("num_drivers", &state.stores.drivers.count().await?);
    Ok(state
        .renderer
        .render("taxi/index.html", &context)?
        .into_response())
}

// =============================================================================
// Accounts
// =============================================================================

const LOGIN_TEMPLATE: &str = "taxi/login.html";
const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Only same-site absolute paths are followed after login
fn safe_next(next: &str) -> &str {
    let local = next.starts_with('/') && !next.starts_with("//") && !next.contains('\\');
    if local { next } else { "/" }
}

fn render_login(
    state: &AppState,
    username: &str,
    next: &str,
    error: Option<&str>,
) -> TaxiResult<Response> {
    let mut context = base_context(&AuthContext::Anonymous);
    context.insert("username", username);
    context.insert("next", next);
    context.insert("error", &error);
    Ok(state.renderer.render(LOGIN_TEMPLATE, &context)?.into_response())
}

pub async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> TaxiResult<Response> {
    render_login(&state, "", &query.next, None)
}

pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> TaxiResult<Response> {
    let Form(form) = form.map_err(|rejection| RequestError::InvalidBody {
        message: rejection.body_text(),
    })?;

    let driver = state
        .stores
        .drivers
        .list()
        .await?
        .into_iter()
        .find(|driver| driver.username == form.username);

    let Some(driver) = driver.filter(|driver| driver.check_password(&form.password)) else {
        tracing::warn!(username = %form.username, "failed login attempt");
        return render_login(&state, &form.username, &form.next, Some(INVALID_LOGIN));
    };

    let session = state.sessions.create(driver.id, &driver.username).await?;
    tracing::info!(user_id = driver.id, username = %driver.username, "user logged in");

    let auth = &state.config.auth;
    let max_age = auth
        .session_ttl_minutes
        .checked_mul(60)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "auth.session_ttl_minutes".to_string(),
            value: auth.session_ttl_minutes.to_string(),
            message: "session lifetime overflows the cookie Max-Age".to_string(),
        })?;
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        auth.session_cookie, session.token, max_age
    );

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, safe_next(&form.next).to_string()),
            (SET_COOKIE, cookie),
        ],
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> TaxiResult<Response> {
    let auth = &state.config.auth;
    if let Some(token) = cookie_value(&headers, &auth.session_cookie) {
        state.sessions.remove(&token).await?;
    }

    let cookie = format!(
        "{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0",
        auth.session_cookie
    );
    Ok((
        StatusCode::FOUND,
        [(LOCATION, auth.login_url.clone()), (SET_COOKIE, cookie)],
    )
        .into_response())
}
