pub mod database;
pub mod jwt;
pub mod redis;
pub mod repository;
