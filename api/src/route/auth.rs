use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::auth::{login, logout, signup};

pub fn build_auth_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/signup/", post(signup))
        .route("/token/", post(login))
        .route("/auth/logout", post(logout))
}
