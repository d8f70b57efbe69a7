use rota_core::RuleId;
use rota_schedule::AssignmentRule;
use rota_service::auth::get_caller_from_depot;
use rota_service::error::ServiceError;
use rota_service::schedule::{self, NewRule, RuleUpdate};
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, handler};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Creates an assignment rule from the JSON body and responds 201 with it.
///
/// ## Errors
/// Responds 400 for a malformed body or invalid rule, 403 when the caller may
/// not manage the employee, 404 for an unknown employee or shift type and 409
/// when the rule overlaps another.
#[handler]
pub async fn create_rule(
    req: &mut Request,
    depot: &Depot,
    res: &mut Response,
) -> AppResult<Json<AssignmentRule>> {
    let caller = get_caller_from_depot(depot)?;
    let new_rule: NewRule = json_body(req).await?;
    let store = get_store_from_depot(depot)?;

    let rule = schedule::create_rule(store.as_ref(), caller, new_rule)?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(rule))
}

/// ## Errors
/// Responds 404 for an unknown rule and 403 when it is not visible.
#[handler]
pub async fn get_rule(req: &mut Request, depot: &Depot) -> AppResult<Json<AssignmentRule>> {
    let caller = get_caller_from_depot(depot)?;
    let rule_id = rule_id_param(req)?;
    let store = get_store_from_depot(depot)?;

    Ok(Json(schedule::get_rule(store.as_ref(), caller, rule_id)?))
}

/// ## Summary
/// Applies a partial update and responds with the stored rule.
///
/// ## Errors
/// Same as [`create_rule`], plus 404 for an unknown rule.
#[handler]
pub async fn update_rule(req: &mut Request, depot: &Depot) -> AppResult<Json<AssignmentRule>> {
    let caller = get_caller_from_depot(depot)?;
    let rule_id = rule_id_param(req)?;
    let update: RuleUpdate = json_body(req).await?;
    let store = get_store_from_depot(depot)?;

    Ok(Json(schedule::update_rule(store.as_ref(), caller, rule_id, update)?))
}

/// ## Summary
/// Soft-deletes a rule.
///
/// ## Errors
/// Responds 404 for an unknown rule and 403 when the caller may not manage it.
#[handler]
pub async fn deactivate_rule(req: &mut Request, depot: &Depot) -> AppResult<Json<Value>> {
    let caller = get_caller_from_depot(depot)?;
    let rule_id = rule_id_param(req)?;
    let store = get_store_from_depot(depot)?;

    schedule::deactivate_rule(store.as_ref(), caller, rule_id)?;
    Ok(Json(json!({ "msg": "Schedule rule deactivated successfully." })))
}

/// Rule ids that are not UUIDs cannot name a stored rule.
fn rule_id_param(req: &Request) -> AppResult<RuleId> {
    let raw = req.param::<String>("rule_id").unwrap_or_default();
    raw.parse::<RuleId>()
        .map_err(|_err| ServiceError::NotFound(format!("schedule rule {raw}")).into())
}

async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid request body: {err}")))
}
