use std::sync::Arc;

use salvo::{listener::TcpListener, Server};

use user_crud::{
    config::env_var,
    domain::service::UserService,
    error::BoxedError,
    infra::{
        database::connection,
        router,
        service::user::{InMemoryUserService, PgUserService},
        view::TemplateRenderer,
    },
};

async fn user_service(env: &env_var::EnvVar) -> Result<Arc<dyn UserService>, BoxedError> {
    match &env.database {
        Some(database) => {
            let pool = connection::create_sqlx_pool(database).await?;
            connection::apply_schema(&pool).await?;
            tracing::info!(host = %database.host, name = %database.name, "using PostgreSQL user storage");
            Ok(Arc::new(PgUserService::new(pool)))
        }
        None => {
            tracing::info!("using in-memory user storage");
            Ok(Arc::new(InMemoryUserService::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    let env = env_var::load()?;
    tracing_subscriber::fmt().with_max_level(env.log_level).init();

    let service = user_service(&env).await?;
    let views = Arc::new(TemplateRenderer::new()?);

    let address = env.address();
    tracing::info!(%address, "listening");
    let listener = TcpListener::bind(&address);
    Server::new(listener)
        .serve_with_graceful_shutdown(router::app(service, views), shutdown_signal())
        .await;

    Ok(())
}
