//! User management command.
//!
//! The CLI is the only way to provision admin accounts; self-service
//! registration on the site always creates customers.

use freightline_core::Role;
use freightline_web::services::auth::AuthService;

use super::{CommandError, connect};

/// Create a user with the given role.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for an unknown role and
/// `CommandError::Auth` if validation or persistence fails.
pub async fn create(
    email: &str,
    name: Option<&str>,
    role: &str,
    password: &str,
) -> Result<(), CommandError> {
    let role: Role = role
        .parse()
        .map_err(|e: String| CommandError::InvalidArgument(e))?;

    let pool = connect().await?;
    let auth = AuthService::new(&pool);

    let user = auth.register(email, name, password, role).await?;

    tracing::info!(
        "Created {} user {} ({})",
        user.role,
        user.email,
        user.id
    );
    Ok(())
}
