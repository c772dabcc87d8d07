use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    change_password, change_role, delete_organizer, get_current_user, get_my_enrollments,
    list_users,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
        .route("/me/enrollments", get(get_my_enrollments))
        .route("/:user_id/role", put(change_role));

    Router::new()
        .nest("/users", users_routers)
        .route("/admin/organizers/:user_id", delete(delete_organizer))
}
