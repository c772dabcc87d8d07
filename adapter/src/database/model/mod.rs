pub mod enrollment;
pub mod event;
pub mod user;
