pub mod auth;
pub mod enrollment;
pub mod event;
pub mod id;
pub mod list;
pub mod permission;
pub mod role;
pub mod schedule;
pub mod user;
