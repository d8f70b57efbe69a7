use rota_core::constants::SHIFT_TYPES_ROUTE_COMPONENT;
use rota_schedule::ShiftType;
use rota_service::auth::get_caller_from_depot;
use salvo::prelude::Json;
use salvo::{Depot, Router, handler};

use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Lists shift types by name. Inactive types are listed only for callers
/// that manage them.
///
/// ## Errors
/// Responds 401 for anonymous callers.
#[handler]
async fn list_shift_types(depot: &Depot) -> AppResult<Json<Vec<ShiftType>>> {
    let caller = get_caller_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    Ok(Json(rota_service::shift_types::list_shift_types(
        store.as_ref(),
        caller,
    )?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SHIFT_TYPES_ROUTE_COMPONENT).get(list_shift_types)
}
