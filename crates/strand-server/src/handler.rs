use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strand_crypto::ContentHasher;
use strand_query::{FilterOutcome, FilterParams, PredicateSet};
use strand_store::{Entry, StoreError};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub entries: usize,
    pub uptime_secs: u64,
}

/// Query string of `GET /strings/filter-by-natural-language`.
#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// How a natural-language query was understood.
#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: PredicateSet,
}

/// Body of `GET /strings/filter-by-natural-language`.
#[derive(Debug, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<Entry>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok".into(),
        entries: state.store.len()?,
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// Info handler.
pub async fn info() -> Json<Value> {
    Json(json!({
        "name": "strand-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /strings`: store a new string.
pub async fn create_string(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(body) = body.map_err(rejected_body)?;
    let value = requested_value(&body)?;
    let entry = state.store.create(value)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /strings/{value}`: look up a stored string.
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let entry = state
        .store
        .get(&value)?
        .ok_or_else(|| StoreError::NotFound(ContentHasher::digest(&value)))?;
    Ok(Json(entry))
}

/// `DELETE /strings/{value}`: remove a stored string.
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&value)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::NotFound(ContentHasher::digest(&value)).into())
    }
}

/// `GET /strings`: list stored strings matching structured filters.
pub async fn list_strings(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<FilterOutcome>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let outcome = strand_query::apply(&params, state.store.all()?)?;
    Ok(Json(outcome))
}

/// `GET /strings/filter-by-natural-language`: translate a free-text query
/// and list the strings it selects.
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let original = params
        .query
        .ok_or_else(|| ApiError::bad_request("missing \"query\" parameter"))?;
    let predicates = state.translator.translate(&original)?;
    let outcome = strand_query::evaluate(predicates, state.store.all()?);
    Ok(Json(NaturalLanguageResponse {
        data: outcome.data,
        count: outcome.count,
        interpreted_query: InterpretedQuery {
            original,
            parsed_filters: outcome.filters_applied,
        },
    }))
}

/// Oversized bodies keep their 413; every other unreadable body is a 400.
fn rejected_body(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            rejection.body_text(),
        )
    } else {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Pull the string out of a `POST /strings` body.
///
/// A missing or falsy `value` (null, false, 0, "") is a bad request; any
/// other non-string is the wrong type.
fn requested_value(body: &Value) -> Result<&str, ApiError> {
    let value = body.get("value").unwrap_or(&Value::Null);
    if is_falsy(value) {
        return Err(ApiError::bad_request(
            "invalid request body or missing \"value\" field",
        ));
    }
    value.as_str().ok_or_else(|| {
        StoreError::InvalidInput("\"value\" must be a string".into()).into()
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
