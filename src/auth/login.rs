use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use serde::Serialize;

use crate::api::forms::FormFields;
use crate::app::AppState;
use crate::auth::session::{is_superuser, removal_cookie, session_cookie, AdminSession};
use crate::config::SiteConfig;
use crate::error::AppError;

/// Where the browser lands after logging out.
const LOGOUT_REDIRECT: &str = "/admin/";

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub result: &'static str,
    pub message: &'static str,
}

/// Check submitted credentials against the configured admin account.
pub fn authenticate_admin(
    config: &SiteConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<AdminSession, AppError> {
    match (username, password) {
        (Some(u), Some(p)) if u == config.admin_username && p == config.admin_password => {
            Ok(AdminSession {
                secret: config.auth_secret.clone(),
            })
        }
        _ => Err(AppError::Auth("Invalid login".into())),
    }
}

/// `POST /login/`: form fields `Username` and `Password`.
///
/// On success, stores the configured secret in the encrypted session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    body: Bytes,
) -> Result<(PrivateCookieJar, axum::Json<LoginResponse>), AppError> {
    let fields = FormFields::parse(&body);
    let session = authenticate_admin(
        &state.config,
        fields.get("Username"),
        fields.get("Password"),
    )
    .inspect_err(|_| tracing::warn!("Failed admin login attempt"))?;

    let jar = jar.add(session_cookie(&session)?);
    tracing::info!("Admin logged in");

    Ok((
        jar,
        axum::Json(LoginResponse {
            result: "ok",
            message: "User logged successfully",
        }),
    ))
}

/// `GET|POST /logout/`: clears the session and redirects to the admin home.
pub async fn logout_handler(jar: PrivateCookieJar) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        jar.remove(removal_cookie()),
        [(header::LOCATION, LOGOUT_REDIRECT)],
    )
}

/// `GET /api/is-superuser/`: plain `yes` or `no`.
pub async fn is_superuser_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> &'static str {
    if is_superuser(&jar, &state.config.auth_secret) {
        "yes"
    } else {
        "no"
    }
}
