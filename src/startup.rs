use crate::configuration::{Configuration, DatabaseConfigs};
use crate::repository::{CommentStore, PgCommentStore};
use crate::routes::{comment_routes, health_check};
use crate::utils;
use actix_session::SessionMiddleware;
use actix_session::storage::RedisSessionStore;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Configuration) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&config.database);

        if config.database.migrate_on_startup {
            sqlx::migrate!("./migrations")
                .run(&connection_pool)
                .await
                .context("Failed to migrate the database")?;
        }

        let store: Arc<dyn CommentStore> = Arc::new(PgCommentStore::new(connection_pool));

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| "Failed to bind TCP listener for application")?;
        let port = listener
            .local_addr()
            .with_context(|| "Failed to read local address of TCP listener")?
            .port();
        let server = run(
            listener,
            store,
            config.application.hmac_secret,
            config.application.redis_uri,
        )
        .await
        .context("Failed to run Actix web server")?;

        tracing::info!(port, "Comment service listening");
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.server.await.context("Server stopped with an error")
    }
}

pub fn get_connection_pool(config: &DatabaseConfigs) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(config.connect_options())
}

async fn run(
    tcp_listener: TcpListener,
    store: Arc<dyn CommentStore>,
    hmac_secret: Secret<String>,
    redis_uri: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let store = web::Data::from(store);

    let secret_key = actix_web::cookie::Key::from(hmac_secret.expose_secret().as_bytes());

    let redis_store = RedisSessionStore::new(redis_uri.expose_secret())
        .await
        .context("Failed to connect to Redis session store")?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(SessionMiddleware::new(
                redis_store.clone(),
                secret_key.clone(),
            ))
            .configure(configure_routes)
            // trait object; the API tests register an in-memory store here
            .app_data(store.clone())
    })
    .listen(tcp_listener)
    .with_context(|| "Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

/// Route table shared by the server and the API tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(utils::json_config())
        .app_data(utils::query_config())
        .route("/health_check", web::get().to(health_check))
        .service(web::scope("/v1/comments").configure(comment_routes));
}
