use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    enrollment::{enroll, unenroll},
    event::{
        delete_event, register_event, show_event, show_event_enrollments, show_event_list,
        update_event,
    },
};

// 末尾のスラッシュの有無もパスの一部として扱われるため、nest せずに登録する
pub fn build_event_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/events/", post(register_event))
        .route("/events/", get(show_event_list))
        .route("/events/:event_id", get(show_event))
        .route("/events/:event_id", put(update_event))
        .route("/events/:event_id", delete(delete_event))
        .route("/events/:event_id/enrollments", get(show_event_enrollments))
        .route("/events/:event_id/enroll/", post(enroll))
        .route("/events/:event_id/unenroll", delete(unenroll))
}
