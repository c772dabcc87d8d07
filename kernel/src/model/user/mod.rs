use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOrganizer {
    pub organizer_id: UserId,
    pub organizer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledUser {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}
