use std::sync::Arc;

use adapter::jwt::TokenCodec;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, enrollment::EnrollmentRepositoryImpl, event::EventRepositoryImpl,
    health::HealthCheckRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    auth::AuthRepository, enrollment::EnrollmentRepository, event::EventRepository,
    health::HealthCheckRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    event_repository: Arc<dyn EventRepository>,
    enrollment_repository: Arc<dyn EnrollmentRepository>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: &AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            TokenCodec::new(&app_config.auth),
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let enrollment_repository = Arc::new(EnrollmentRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            event_repository,
            enrollment_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn enrollment_repository(&self) -> Arc<dyn EnrollmentRepository> {
        self.enrollment_repository.clone()
    }
}
