use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{
    auth::{AccessToken, TokenIdentity},
    id::UserId,
    permission::Operation,
    user::User,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// axum 標準の抽出に失敗したときも AppError として 400 を返すためのラッパー
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

// リクエストの前処理を実行後、handler に渡す構造体
pub struct AuthorizedUser {
    pub identity: TokenIdentity,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn authorize(&self, operation: Operation) -> AppResult<()> {
        self.user.authorize(operation)
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // handler メソッドの引数に AuthorizedUser を追加したときはこのメソッドが呼ばれる
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // HTTP ヘッダからアクセストークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // 署名と有効期限を検証し、失効済みでないことを確かめる
        let identity = registry
            .auth_repository()
            .fetch_identity_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        // トークン発行後に削除されたユーザーは認証しない
        let user = registry
            .user_repository()
            .find_current_user(identity.user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self {
            identity,
            user,
        })
    }
}
