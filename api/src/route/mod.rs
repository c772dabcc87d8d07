pub mod auth;
pub mod event;
pub mod health;
pub mod user;

use axum::Router;
use registry::AppRegistry;

use self::{
    auth::build_auth_routers, event::build_event_routers, health::build_health_check_routers,
    user::build_user_routers,
};

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_routers())
        .merge(build_event_routers())
}

// ここでのテストは DB や Redis へ問い合わせる前に応答が決まるものだけを扱う
#[cfg(test)]
mod tests {
    use super::*;
    use adapter::{database::connect_database_with, redis::RedisClient};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use shared::config::AppConfig;
    use std::{collections::HashMap, sync::Arc};
    use tower::ServiceExt;

    fn app() -> anyhow::Result<Router> {
        let env = HashMap::from([
            ("DATABASE_HOST", "localhost"),
            ("DATABASE_PORT", "5432"),
            ("DATABASE_USERNAME", "app"),
            ("DATABASE_PASSWORD", "passwd"),
            ("DATABASE_NAME", "app"),
            ("REDIS_HOST", "localhost"),
            ("REDIS_PORT", "6379"),
            ("JWT_SECRET", "test-secret"),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))?;
        let pool = connect_database_with(&config.database);
        let kv = Arc::new(RedisClient::new(&config.redis)?);
        let registry = AppRegistry::new(pool, kv, &config);
        Ok(routes().with_state(registry))
    }

    async fn body_json(response: Response) -> anyhow::Result<serde_json::Value> {
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    #[tokio::test]
    async fn liveness_needs_no_backend() -> anyhow::Result<()> {
        let response = app()?
            .oneshot(Request::get("/health").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn missing_bearer_token_is_unauthorized() -> anyhow::Result<()> {
        let response = app()?
            .oneshot(Request::get("/events/").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await?;
        assert_eq!(json["error"], "authentication_error");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_bearer_token_is_unauthorized() -> anyhow::Result<()> {
        let response = app()?
            .oneshot(
                Request::post("/events/abc/enroll/")
                    .header(header::AUTHORIZATION, "Bearer invalidtoken")
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn admin_cannot_sign_up() -> anyhow::Result<()> {
        let body = serde_json::json!({
            "userName": "Mallory",
            "email": "mallory@example.com",
            "password": "securepassword",
            "role": "admin",
        });
        let response = app()?
            .oneshot(
                Request::post("/signup/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        Ok(())
    }

    #[tokio::test]
    async fn signup_with_malformed_email_is_a_bad_request() -> anyhow::Result<()> {
        let body = serde_json::json!({
            "userName": "Alice",
            "email": "not-an-email",
            "password": "securepassword",
        });
        let response = app()?
            .oneshot(
                Request::post("/signup/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await?;
        assert_eq!(json["error"], "validation_error");
        Ok(())
    }

    #[tokio::test]
    async fn signup_with_a_missing_field_is_a_json_validation_error() -> anyhow::Result<()> {
        let response = app()?
            .oneshot(
                Request::post("/signup/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"userName":"Alice","password":"pw"}"#))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let json = body_json(response).await?;
        assert_eq!(json["error"], "validation_error");
        Ok(())
    }

    #[tokio::test]
    async fn login_with_empty_password_is_a_bad_request() -> anyhow::Result<()> {
        let response = app()?
            .oneshot(
                Request::post("/token/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=alice%40example.com&password="))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}

// こちらは DB と Redis を実際に使う。Redis の接続先は REDIS_HOST / REDIS_PORT で変えられる
#[cfg(test)]
mod backend_tests {
    use super::*;
    use adapter::{database::ConnectionPool, redis::RedisClient};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use kernel::model::{
        event::event::CreateEvent,
        id::{EventId, UserId},
        role::Role,
        user::event::CreateUser,
    };
    use shared::config::AppConfig;
    use std::{collections::HashMap, sync::Arc};
    use tower::ServiceExt;

    fn registry(pool: sqlx::PgPool) -> anyhow::Result<AppRegistry> {
        let redis_host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".into());
        let redis_port = std::env::var("REDIS_PORT").unwrap_or_else(|_| "6379".into());
        let env = HashMap::from([
            ("DATABASE_HOST", "localhost".to_string()),
            ("DATABASE_PORT", "5432".into()),
            ("DATABASE_USERNAME", "app".into()),
            ("DATABASE_PASSWORD", "passwd".into()),
            ("DATABASE_NAME", "app".into()),
            ("REDIS_HOST", redis_host),
            ("REDIS_PORT", redis_port),
            ("JWT_SECRET", "test-secret".into()),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).cloned())?;
        let kv = Arc::new(RedisClient::new(&config.redis)?);
        Ok(AppRegistry::new(ConnectionPool::new(pool), kv, &config))
    }

    async fn user(registry: &AppRegistry, email: &str, role: Role) -> anyhow::Result<UserId> {
        let user = registry
            .user_repository()
            .create(CreateUser::new(
                email.into(),
                email.into(),
                "securepassword".into(),
                role,
            ))
            .await?;
        Ok(user.user_id)
    }

    async fn login(registry: &AppRegistry, email: &str) -> anyhow::Result<String> {
        let response = routes()
            .with_state(registry.clone())
            .oneshot(
                Request::post("/token/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!(
                        "username={}&password=securepassword",
                        email.replace('@', "%40")
                    )))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        let token = json["access_token"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("access_token is missing"))?;
        Ok(token.to_string())
    }

    async fn event(registry: &AppRegistry, organizer_id: UserId) -> anyhow::Result<EventId> {
        let event_id = registry
            .event_repository()
            .create(
                CreateEvent::new(
                    "Rust Meetup".into(),
                    Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2025, 12, 1, 11, 0, 0).unwrap(),
                    "Main Hall".into(),
                    "Room A".into(),
                    None,
                    None,
                    10,
                ),
                organizer_id,
            )
            .await?;
        Ok(event_id)
    }

    #[sqlx::test(migrations = "../adapter/migrations")]
    async fn only_the_owner_can_update_an_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = registry(pool)?;
        let owner = user(&registry, "owner@example.com", Role::Organizer).await?;
        user(&registry, "other@example.com", Role::Organizer).await?;
        let event_id = event(&registry, owner).await?;

        let body = serde_json::json!({
            "eventName": "Taken Over",
            "startsAt": "2025-12-01T10:00:00Z",
            "endsAt": "2025-12-01T11:00:00Z",
            "venue": "Main Hall",
            "room": "Room A",
            "capacity": 10,
        });
        let update = |token: String| -> anyhow::Result<Request<Body>> {
            Ok(Request::put(format!("/events/{event_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?)
        };

        let token = login(&registry, "other@example.com").await?;
        let response = routes()
            .with_state(registry.clone())
            .oneshot(update(token)?)
            .await?;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let token = login(&registry, "owner@example.com").await?;
        let response = routes()
            .with_state(registry.clone())
            .oneshot(update(token)?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[sqlx::test(migrations = "../adapter/migrations")]
    async fn organizers_cannot_delete_organizers(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = registry(pool)?;
        user(&registry, "organizer@example.com", Role::Organizer).await?;
        let target = user(&registry, "target@example.com", Role::Organizer).await?;

        let token = login(&registry, "organizer@example.com").await?;
        let response = routes()
            .with_state(registry.clone())
            .oneshot(
                Request::delete(format!("/admin/organizers/{target}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        Ok(())
    }

    #[sqlx::test(migrations = "../adapter/migrations")]
    async fn a_token_stops_working_after_logout(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let registry = registry(pool)?;
        user(&registry, "alice@example.com", Role::User).await?;
        let token = login(&registry, "alice@example.com").await?;

        let me = || -> anyhow::Result<Request<Body>> {
            Ok(Request::get("/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?)
        };

        let response = routes().with_state(registry.clone()).oneshot(me()?).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let response = routes()
            .with_state(registry.clone())
            .oneshot(
                Request::post("/auth/logout")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = routes().with_state(registry.clone()).oneshot(me()?).await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
