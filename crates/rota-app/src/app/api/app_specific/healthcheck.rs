use salvo::{Router, handler};

/// Liveness probe; served to anonymous callers too.
#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
