use std::net::SocketAddr;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use blog_service::config::Config;
use blog_service::domain::auth::service::AuthService;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::inbound::http::router::RouterSettings;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        access_ttl_hours = config.jwt.access_ttl_hours,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        refresh_cookie_ttl_hours = config.jwt.refresh_cookie_ttl_hours,
        cors_allowed_origins = %config.cors.allowed_origins,
        rate_limit_max_requests = config.rate_limit.max_requests,
        rate_limit_window_seconds = config.rate_limit.window_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost((&config.password).into())?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())?
            .with_password_hasher(password_hasher)
            .with_lifetimes(config.jwt.session_lifetimes()),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            authenticator,
        )),
        user_service: Arc::new(UserService::new(user_repository)),
        post_service: Arc::new(PostService::new(post_repository)),
        refresh_cookie_lifetime: config.jwt.refresh_cookie_lifetime(),
    };

    let http_application = create_router(state, RouterSettings::from(&config));

    let http_address = format!("{}:{}", config.server.host, config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
