use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use kernel::model::{
    auth::{event::CreateToken, AccessToken, IssuedToken, TokenIdentity},
    id::UserId,
    role::Role,
};
use serde::{Deserialize, Serialize};
use shared::{
    config::AuthConfig,
    error::{AppError, AppResult},
};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

// HS256 でアクセストークンを署名・検証する
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: u64,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.ttl,
        }
    }

    pub fn encode(&self, event: &CreateToken) -> AppResult<IssuedToken> {
        self.encode_at(event, Utc::now())
    }

    fn encode_at(&self, event: &CreateToken, issued_at: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = i64::try_from(self.ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::ConversionEntityError(format!("token lifetime {} is out of range", self.ttl))
            })?;
        let claims = Claims {
            sub: event.user_id.to_string(),
            email: event.email.clone(),
            role: event.role.as_ref().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(IssuedToken {
            access_token: AccessToken(token),
            expires_in: self.ttl,
        })
    }

    pub fn decode(&self, access_token: &AccessToken) -> AppResult<TokenIdentity> {
        let claims = decode::<Claims>(&access_token.0, &self.decoding_key, &self.validation)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("access token has expired"),
                    kind => tracing::debug!(?kind, "rejected access token"),
                }
                AppError::UnauthenticatedError
            })?
            .claims;

        let user_id =
            UserId::from_str(&claims.sub).map_err(|_| AppError::UnauthenticatedError)?;
        let role = Role::from_str(&claims.role).map_err(|_| AppError::UnauthenticatedError)?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(TokenIdentity {
            user_id,
            role,
            token_id: claims.jti,
            expires_at,
        })
    }
}
