//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] freightline_web::db::RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] freightline_web::services::auth::AuthError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Connect to the database named by `FREIGHTLINE_DATABASE_URL`
/// (or `DATABASE_URL`).
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("FREIGHTLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("FREIGHTLINE_DATABASE_URL"))?;

    Ok(PgPool::connect(&database_url).await?)
}
