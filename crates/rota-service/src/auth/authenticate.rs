use rota_core::CallerContext;
use rota_core::config::{AuthMethod, Settings};
use rota_core::constants::{CALLER_ID_HEADER, CALLER_ROLE_HEADER};

use crate::error::{ServiceError, ServiceResult};

fn authenticate_single_user(config: &Settings) -> ServiceResult<CallerContext> {
    tracing::trace!("Authenticating single user");

    config
        .auth
        .single_user
        .as_ref()
        .map(rota_core::config::SingleUserAuthConfig::caller)
        .ok_or_else(|| {
            ServiceError::InvalidConfiguration("Single user config is missing".to_string())
        })
}

/// Reads the caller from headers set by the trusted front proxy.
fn authenticate_proxy(req: &salvo::Request) -> ServiceResult<CallerContext> {
    let Some(employee_id) = header_value(req, CALLER_ID_HEADER) else {
        tracing::trace!("No caller id header present");
        return Err(ServiceError::NotAuthenticated);
    };
    let Some(role) = header_value(req, CALLER_ROLE_HEADER) else {
        tracing::debug!(employee_id, "Caller id present without a role header");
        return Err(ServiceError::NotAuthenticated);
    };

    let role = role.parse().map_err(|err| {
        tracing::warn!(employee_id, error = %err, "Proxy sent an unknown role");
        ServiceError::NotAuthenticated
    })?;

    Ok(CallerContext::new(employee_id, role))
}

fn header_value<'a>(req: &'a salvo::Request, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// ## Summary
/// Resolves the caller of a request using the configured authentication method.
///
/// ## Errors
/// Returns `NotAuthenticated` if the request carries no usable caller, or
/// `InvalidConfiguration` if single-user mode lacks its user.
#[tracing::instrument(skip(req, config))]
pub fn authenticate(req: &salvo::Request, config: &Settings) -> ServiceResult<CallerContext> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::Proxy => authenticate_proxy(req),
    }
}
