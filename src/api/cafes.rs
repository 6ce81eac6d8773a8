//! Cafe endpoints: list, random, search, create, price update, delete

use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
// rand 0.8 names; 0.9 renames these to rand::rng() / IndexedRandom.
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::cafes::{self, NewCafe};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /all
pub async fn all_cafes(State(state): State<AppState>) -> ApiResult<Value> {
    let cafes = cafes::list_all(&state.pool).await?;
    Ok(Json(json!({ "all_cafes": cafes })))
}

/// GET /random
pub async fn random_cafe(State(state): State<AppState>) -> ApiResult<Value> {
    let cafes = cafes::list_all(&state.pool).await?;
    let cafe = cafes.choose(&mut rand::thread_rng()).ok_or_else(|| {
        ApiError::NotFound("Sorry, there are no cafes in the database yet.".into())
    })?;
    Ok(Json(json!({ "cafe": cafe })))
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub location: Option<String>,
}

/// GET /search?location=<name>
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(params) = params.map_err(bad_request)?;
    let location = params
        .location
        .ok_or_else(|| ApiError::BadRequest("location query parameter is required".into()))?;

    let result = cafes::find_by_location(&state.pool, &location).await?;
    if result.is_empty() {
        return Err(ApiError::NotFound(
            "Sorry, didn't find anything at that location.".into(),
        ));
    }
    Ok(Json(json!({ "cafe": result })))
}

/// POST /add (form-encoded)
pub async fn add_cafe(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> ApiResult<Value> {
    let Form(form) = form.map_err(bad_request)?;
    let cafe = NewCafe {
        name: require(&form, "name")?.to_string(),
        map_url: require(&form, "map_url")?.to_string(),
        img_url: require(&form, "img_url")?.to_string(),
        location: require(&form, "location")?.to_string(),
        seats: require(&form, "seats")?.to_string(),
        has_toilet: truthy(require(&form, "has_toilet")?),
        has_wifi: truthy(require(&form, "has_wifi")?),
        has_sockets: truthy(require(&form, "has_sockets")?),
        can_take_calls: truthy(require(&form, "can_take_calls")?),
        coffee_price: Some(require(&form, "coffee_price")?.to_string()),
    };

    match cafes::insert(&state.pool, &cafe).await {
        Ok(_) => Ok(Json(
            json!({ "response": { "success": "Successfully added the new cafe." } }),
        )),
        Err(err)
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()) =>
        {
            Err(ApiError::Conflict(
                "A cafe with that name already exists.".into(),
            ))
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
pub struct UpdatePriceParams {
    pub new_price: Option<String>,
}

/// PATCH /update-price/{id}?new_price=<price>
pub async fn update_price(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    params: Result<Query<UpdatePriceParams>, QueryRejection>,
) -> ApiResult<Value> {
    let Path(id) = id.map_err(bad_request)?;
    let Query(params) = params.map_err(bad_request)?;
    let new_price = params
        .new_price
        .ok_or_else(|| ApiError::BadRequest("new_price query parameter is required".into()))?;

    if cafes::update_price(&state.pool, id, &new_price).await? {
        Ok(Json(
            json!({ "response": { "Success": "Successfully updated the price." } }),
        ))
    } else {
        Err(ApiError::NotFound(
            "Sorry, no cafe with that id was found in the database.".into(),
        ))
    }
}

/// DELETE /report-closed/{id}?api_key=<key>
///
/// The credential may arrive as a query parameter or a form-encoded body
/// field. The key is checked before the row lookup, so a bad key on an
/// unknown id is still a 403.
pub async fn report_closed(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> ApiResult<Value> {
    let Path(id) = id.map_err(bad_request)?;
    // Raw bytes, not a form extractor: a query-only delete arrives with an
    // empty body and no content-type, which must not be rejected.
    let api_key = query.get("api_key").cloned().or_else(|| {
        serde_urlencoded::from_bytes::<HashMap<String, String>>(&body)
            .ok()
            .and_then(|mut form| form.remove("api_key"))
    });

    if api_key.as_deref() != Some(state.api_key.as_str()) {
        return Err(ApiError::Forbidden(
            "Sorry, that's not allowed. Make sure you have the correct api_key.".into(),
        ));
    }

    if cafes::delete(&state.pool, id).await? {
        Ok(Json(json!(
            { "response": { "Success": "Successfully deleted that cafe from the database." } }
        )))
    } else {
        Err(ApiError::NotFound(
            "Sorry, a cafe with that id was not found in the database.".into(),
        ))
    }
}

/// Extractor rejections become the same structured 400 body as every other
/// client error, instead of axum's plain-text defaults.
fn bad_request<E: std::fmt::Display>(rejection: E) -> ApiError {
    ApiError::BadRequest(rejection.to_string())
}

fn require<'a>(form: &'a HashMap<String, String>, field: &str) -> Result<&'a str, ApiError> {
    form.get(field)
        .map(String::as_str)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {field}")))
}

/// Truthy-string coercion for the boolean form fields: any non-empty string
/// is true, only the empty string is false. Kept bug-for-bug compatible with
/// the original API, where the literal text "false" also reads as true.
fn truthy(value: &str) -> bool {
    !value.is_empty()
}
