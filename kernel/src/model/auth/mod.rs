use crate::model::{id::UserId, role::Role};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

// 検証済みのアクセストークンから読み取った内容
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub role: Role,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: AccessToken,
    pub expires_in: u64,
}
