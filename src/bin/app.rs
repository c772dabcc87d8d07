use adapter::{
    database::{connect_database_with, migrate},
    redis::RedisClient,
};
use anyhow::{Context, Result};
use api::route::routes;
use kernel::model::{role::Role, user::event::CreateUser};
use registry::AppRegistry;
use shared::{
    config::{AppConfig, BootstrapAdminConfig},
    env::{which, Environment},
};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // .env がなければ環境変数だけを使う
    dotenv::dotenv().ok();
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    migrate(&pool)
        .await
        .context("Failed to run database migrations")?;
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);

    let registry = AppRegistry::new(pool, kv, &app_config);

    if let Some(admin) = &app_config.bootstrap_admin {
        ensure_admin(&registry, admin).await?;
    }

    let app = routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let host = match which() {
        Environment::Development => Ipv4Addr::LOCALHOST,
        Environment::Production => Ipv4Addr::UNSPECIFIED,
    };
    let addr = SocketAddr::new(host.into(), app_config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}

// 管理者は自己登録できないため、最初の一人は環境変数から作成する
async fn ensure_admin(registry: &AppRegistry, admin: &BootstrapAdminConfig) -> Result<()> {
    let users = registry.user_repository();
    if users.find_by_email(&admin.email).await?.is_some() {
        return Ok(());
    }

    users
        .create(CreateUser::new(
            "Administrator".into(),
            admin.email.clone(),
            admin.password.clone(),
            Role::Admin,
        ))
        .await?;
    tracing::info!(email = %admin.email, "Created the bootstrap admin user");

    Ok(())
}
