// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP routes over the credential service.
//!
//! Handlers only translate JSON bodies and errors; store access and hashing run
//! on the blocking pool so the async workers stay responsive.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use login_common::{AccountSummary, LoginRequest, LoginResponse, RegisterRequest};
use tower_http::trace::TraceLayer;
use zeroize::Zeroize;

use crate::error::AppError;
use crate::validation;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/register", post(register))
        .route("/", post(login))
        .route("/login", post(login))
        .route("/success", get(success))
        .route("/fail", get(fail));

    if state.settings.debug {
        router = router.route("/contents", get(contents));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Register a new account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(mut form): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountSummary>), AppError> {
    let auth = Arc::clone(&state.auth);
    let account = tokio::task::spawn_blocking(move || {
        let result = auth.register(&form);
        form.password.zeroize();
        form.confirm.zeroize();
        result
    })
    .await??;

    Ok((StatusCode::CREATED, Json(AccountSummary::from(&account))))
}

/// Check a username and password
async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(mut form): Json<LoginRequest>,
) -> Result<Response, AppError> {
    validation::validate_login(&form)?;

    let ip = addr.ip();
    if !state.rate_limiter.try_begin_attempt(ip) {
        return Err(AppError::AuthRateLimited);
    }

    let auth = Arc::clone(&state.auth);
    let outcome = tokio::task::spawn_blocking(move || {
        let result = auth.authenticate(&form.username, &form.password);
        form.password.zeroize();
        result
    })
    .await?;

    // The attempt is already counted as a failure; only a match clears it
    match outcome {
        Ok(true) => {
            state.rate_limiter.record_success(ip);
            Ok((StatusCode::OK, Json(LoginResponse::success())).into_response())
        },
        Ok(false) => Ok(login_failed()),
        Err(AppError::NotFound(what)) if state.settings.auth.reveal_unknown_user => {
            Err(AppError::NotFound(what))
        },
        Err(AppError::NotFound(_)) => Ok(login_failed()),
        Err(e) => Err(e),
    }
}

fn login_failed() -> Response {
    (StatusCode::UNAUTHORIZED, Json(LoginResponse::failure())).into_response()
}

/// Landing route after a successful login.
///
/// Forwards to the account listing when it is mounted.
async fn success(State(state): State<Arc<AppState>>) -> Response {
    if state.settings.debug {
        Redirect::to("/contents").into_response()
    } else {
        (StatusCode::OK, Json(LoginResponse::success())).into_response()
    }
}

/// Landing route after a failed login
async fn fail() -> AppError {
    AppError::InvalidCredentials
}

/// Diagnostic listing of every account
async fn contents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AccountSummary>>, AppError> {
    let auth = Arc::clone(&state.auth);
    let accounts = tokio::task::spawn_blocking(move || auth.list_accounts()).await??;
    Ok(Json(accounts.iter().map(AccountSummary::from).collect()))
}
