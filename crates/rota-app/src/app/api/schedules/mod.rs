//! Schedule endpoints.
//!
//! - `GET /api/schedules`: expanded occurrences over a date window
//! - `POST /api/schedules`: create an assignment rule
//! - `GET|PUT|DELETE /api/schedules/rules/{rule_id}`: read, update or
//!   deactivate one rule

mod query;
mod rules;


use rota_core::constants::{RULES_ROUTE_COMPONENT, SCHEDULES_ROUTE_COMPONENT};
use salvo::Router;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SCHEDULES_ROUTE_COMPONENT)
        .get(query::list_schedules)
        .post(rules::create_rule)
        .push(
            Router::with_path(RULES_ROUTE_COMPONENT).push(
                Router::with_path("{rule_id}")
                    .get(rules::get_rule)
                    .put(rules::update_rule)
                    .delete(rules::deactivate_rule),
            ),
        )
}
