use crate::model::{
    auth::{event::CreateToken, AccessToken, IssuedToken, TokenIdentity},
    id::UserId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    // メールアドレスとパスワードを照合し、ユーザー ID を返す
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId>;
    // 署名付きのアクセストークンを発行する
    async fn create_token(&self, event: CreateToken) -> AppResult<IssuedToken>;
    // トークンを検証する。失効済みなら None を返す
    async fn fetch_identity_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<TokenIdentity>>;
    // トークンを失効させる
    async fn delete_token(&self, identity: &TokenIdentity) -> AppResult<()>;
}
