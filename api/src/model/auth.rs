use garde::Validate;
use kernel::model::auth::IssuedToken;
use serde::{Deserialize, Serialize};

// OAuth2 のパスワードフローに合わせてフォームで受け取る
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl From<IssuedToken> for AccessTokenResponse {
    fn from(value: IssuedToken) -> Self {
        let IssuedToken {
            access_token,
            expires_in,
        } = value;
        Self {
            access_token: access_token.0,
            token_type: "bearer",
            expires_in,
        }
    }
}
