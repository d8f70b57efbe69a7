//! Depot helpers for the caller resolved by the authentication middleware.

use rota_core::CallerContext;

use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_CALLER: &str = "__authenticated_caller";
}

/// Caller stored in the depot for the rest of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepotCaller {
    Caller(CallerContext),
    Anonymous,
}

/// Get the authenticated caller from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no caller is stored or the request is anonymous.
pub fn get_caller_from_depot(depot: &salvo::Depot) -> ServiceResult<&CallerContext> {
    match depot.get::<DepotCaller>(depot_keys::AUTHENTICATED_CALLER) {
        Ok(DepotCaller::Caller(caller)) => Ok(caller),
        Ok(DepotCaller::Anonymous) | Err(_) => Err(ServiceError::NotAuthenticated),
    }
}
