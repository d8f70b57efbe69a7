mod app_specific;
mod schedules;
mod shift_types;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

pub use rota_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, RULES_ROUTE_PREFIX, SCHEDULES_ROUTE_PREFIX,
    SHIFT_TYPES_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: health and identity endpoints, schedules and
/// shift types, all behind the authentication middleware.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(app_specific::routes())
        .push(schedules::routes())
        .push(shift_types::routes())
}
