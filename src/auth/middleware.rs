use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::PrivateCookieJar;

use crate::app::AppState;
use crate::auth::session::{authorize, read_session};
use crate::error::AppError;

/// Superuser gate, layered onto admin routes at router construction.
///
/// Requests without a readable session, or whose session secret differs
/// from the configured `AuthSecret`, get a 401 and never reach the handler.
pub async fn require_superuser(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = read_session(&jar).inspect_err(|e| {
        tracing::debug!(uri = %request.uri(), "Rejected request without session: {e}");
    })?;
    authorize(&session, &state.config.auth_secret).inspect_err(|_| {
        tracing::warn!(uri = %request.uri(), "Rejected request with a stale or forged session");
    })?;

    Ok(next.run(request).await)
}
