use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::{
    enrollment::event::{CreateEnrollment, DeleteEnrollment},
    id::EventId,
    permission::Operation,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::{AppPath, AuthorizedUser},
    model::enrollment::CreatedEnrollmentResponse,
};

pub async fn enroll(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<CreatedEnrollmentResponse>)> {
    user.authorize(Operation::Enroll)?;

    let create_enrollment = CreateEnrollment::new(event_id, user.id(), Utc::now());
    let enrolled_at = create_enrollment.enrolled_at;
    let enrollment_id = registry
        .enrollment_repository()
        .create(create_enrollment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedEnrollmentResponse {
            enrollment_id,
            event_id,
            user_id: user.id(),
            enrolled_at,
        }),
    ))
}

pub async fn unenroll(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.authorize(Operation::Unenroll)?;

    registry
        .enrollment_repository()
        .delete(DeleteEnrollment::new(event_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}
