use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, permission::Operation, user::event::DeleteOrganizer};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::{
        enrollment::EnrollmentsResponse,
        user::{
            UpdateUserPasswordRequest, UpdateUserPasswordRequestWithUserId,
            UpdateUserRoleRequest, UpdateUserRoleRequestWithUserId, UserResponse, UsersResponse,
        },
    },
};

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_password(UpdateUserPasswordRequestWithUserId::new(user.id(), req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn get_my_enrollments(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EnrollmentsResponse>> {
    registry
        .enrollment_repository()
        .find_by_user_id(user.id())
        .await
        .map(EnrollmentsResponse::from)
        .map(Json)
}

pub async fn list_users(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    user.authorize(Operation::ManageUsers)?;

    let items = registry
        .user_repository()
        .find_all()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(UsersResponse { items }))
}

pub async fn change_role(
    user: AuthorizedUser,
    AppPath(user_id): AppPath<UserId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserRoleRequest>,
) -> AppResult<StatusCode> {
    user.authorize(Operation::ManageUsers)?;

    registry
        .user_repository()
        .update_role(UpdateUserRoleRequestWithUserId::new(user_id, req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_organizer(
    user: AuthorizedUser,
    AppPath(user_id): AppPath<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.authorize(Operation::DeleteOrganizer)?;

    registry
        .user_repository()
        .delete_organizer(DeleteOrganizer::new(user_id))
        .await
        .map(|_| StatusCode::OK)
}
