//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod audit;
pub mod auth;
pub mod fine_types;
pub mod fines;
pub mod health;
pub mod members;
pub mod statistics;
pub mod users;

/// Creates the API router. Health and login stay public; everything
/// else sits behind the authentication middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(members::routes())
        .merge(fine_types::routes())
        .merge(fines::routes())
        .merge(statistics::routes())
        .merge(users::routes())
        .merge(audit::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
