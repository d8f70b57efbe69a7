use rota_core::CallerContext;
use rota_service::auth::get_caller_from_depot;
use salvo::prelude::Json;
use salvo::{Depot, Router, handler};

use crate::error::AppResult;

/// ## Summary
/// Returns the caller resolved by the `AuthMiddleware`.
///
/// ## Errors
/// Responds 401 for anonymous requests.
#[handler]
async fn whoami(depot: &Depot) -> AppResult<Json<CallerContext>> {
    Ok(Json(get_caller_from_depot(depot)?.clone()))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
