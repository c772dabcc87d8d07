use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppForm, AppJson, AuthorizedUser},
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        user::{RoleName, SignupRequest, UserResponse},
    },
};

pub async fn signup(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;

    // 管理者は自己登録できない
    if req.role() == RoleName::Admin {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .user_repository()
        .create(req.into())
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    AppForm(req): AppForm<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .verify_user(&req.username, &req.password)
        .await?;
    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;

    registry
        .auth_repository()
        .create_token(CreateToken::new(user.user_id, user.email, user.role))
        .await
        .map(AccessTokenResponse::from)
        .map(Json)
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(&user.identity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
