use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken, IssuedToken, TokenIdentity},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

use crate::{
    database::{model::user::UserCredentialRow, ConnectionPool},
    jwt::TokenCodec,
    redis::{
        model::{RedisKey, RedisValue},
        RedisClient,
    },
    repository::user::verify_password,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    codec: TokenCodec,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users
                WHERE email = $1;
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or(AppError::UnauthenticatedError)?;

        verify_password(password, &user_item.password_hash)?;

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<IssuedToken> {
        self.codec.encode(&event)
    }

    async fn fetch_identity_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<TokenIdentity>> {
        // 署名と有効期限の検証は Redis に問い合わせる前に済ませる
        let identity = self.codec.decode(access_token)?;
        let key = RevokedTokenKey::from(&identity);
        if self.kv.get(&key).await?.is_some() {
            return Ok(None);
        }
        Ok(Some(identity))
    }

    async fn delete_token(&self, identity: &TokenIdentity) -> AppResult<()> {
        // 失効リストはトークン本来の有効期限まで保持すれば十分
        let remaining = (identity.expires_at - Utc::now()).num_seconds();
        if remaining <= 0 {
            return Ok(());
        }
        let key = RevokedTokenKey::from(identity);
        self.kv
            .set_ex(&key, &RevokedTokenValue(identity.user_id), remaining as u64)
            .await
    }
}

pub struct RevokedTokenKey(String);

impl From<&TokenIdentity> for RevokedTokenKey {
    fn from(identity: &TokenIdentity) -> Self {
        Self(identity.token_id.clone())
    }
}

impl RedisKey for RevokedTokenKey {
    type Value = RevokedTokenValue;

    fn inner(&self) -> String {
        format!("revoked-token:{}", self.0)
    }
}

pub struct RevokedTokenValue(UserId);

impl RedisValue for RevokedTokenValue {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for RevokedTokenValue {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(value.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kernel::model::role::Role;

    #[test]
    fn revoked_token_key_is_namespaced_by_token_id() {
        let identity = TokenIdentity {
            user_id: UserId::new(),
            role: Role::User,
            token_id: "3f1c".into(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert_eq!(RevokedTokenKey::from(&identity).inner(), "revoked-token:3f1c");
    }

    #[test]
    fn revoked_token_value_round_trips_the_user_id() -> anyhow::Result<()> {
        let user_id = UserId::new();
        let value = RevokedTokenValue::try_from(RevokedTokenValue(user_id).inner())?;
        assert_eq!(value.0, user_id);
        Ok(())
    }
}
