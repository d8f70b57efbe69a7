use rota_service::auth::{DepotCaller, authenticate, depot_keys};
use rota_service::error::ServiceError;
use salvo::Depot;
use tracing::error;

use crate::config::get_config_from_depot;

/// ## Summary
/// Resolves the caller of every request and stores it in the depot.
///
/// Requests without a usable identity are stored as anonymous; handlers that
/// need a caller reject them with 401.
///
/// ## Side Effects
/// Inserts a [`DepotCaller`] under `depot_keys::AUTHENTICATED_CALLER`.
///
/// ## Errors
/// Responds 500 if the configuration is missing from the depot.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                e.render(res);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config) {
            Ok(caller) => {
                tracing::debug!(caller = %caller.id, role = %caller.role, "Caller authenticated");
                depot.insert(depot_keys::AUTHENTICATED_CALLER, DepotCaller::Caller(caller));
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::debug!("Request not authenticated, treating as anonymous");
                depot.insert(depot_keys::AUTHENTICATED_CALLER, DepotCaller::Anonymous);
            }
            Err(ServiceError::InvalidConfiguration(reason)) => {
                tracing::warn!(%reason, "Authentication misconfigured, treating request as anonymous");
                depot.insert(depot_keys::AUTHENTICATED_CALLER, DepotCaller::Anonymous);
            }
            Err(service_err) => {
                error!(error = ?service_err, "Authentication failed with error");
                crate::error::AppError::from(service_err).render(res);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Hoop it onto a router so its handlers can read the caller from the depot.
pub struct AuthMiddleware;
