/// Session authentication
///
/// Validates a username/password pair against the collaborators table and
/// produces an [`AuthContext`], the identity object every service call
/// receives. Unknown usernames and wrong passwords yield the same
/// `InvalidCredentials` error so login failures don't leak which part was
/// wrong.

use sqlx::PgPool;
use uuid::Uuid;

use super::password::{self, PasswordError};
use crate::models::collaborator::{Collaborator, Role};

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Wrong username or password
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Stored hash could not be processed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authenticated identity, passed explicitly through each service call
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated collaborator
    pub collaborator_id: Uuid,

    /// Login name
    pub username: String,

    /// Display name (full name, or username when no name is set)
    pub full_name: String,

    /// Role driving the authorization gate
    pub role: Role,
}

impl AuthContext {
    /// Builds a context from a collaborator record
    pub fn from_collaborator(collaborator: &Collaborator) -> Self {
        Self {
            collaborator_id: collaborator.id,
            username: collaborator.username.clone(),
            full_name: collaborator.full_name(),
            role: collaborator.role,
        }
    }
}

/// Authenticates a collaborator by username and password
///
/// On success the collaborator's `last_login_at` is bumped and an
/// [`AuthContext`] is returned. A wrong username and a wrong password both
/// produce [`AuthError::InvalidCredentials`]; no session is ever
/// established from bad credentials.
///
/// # Errors
///
/// - `AuthError::InvalidCredentials` on a bad username/password pair
/// - `AuthError::Password` if the stored hash is malformed
/// - `AuthError::Database` if the lookup fails
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<AuthContext, AuthError> {
    let collaborator = Collaborator::find_by_username(pool, username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(password, &collaborator.password_hash)? {
        tracing::warn!(username, "login failed: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    Collaborator::update_last_login(pool, collaborator.id).await?;

    tracing::info!(
        username,
        role = collaborator.role.as_str(),
        "collaborator logged in"
    );

    Ok(AuthContext::from_collaborator(&collaborator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_collaborator(role: Role) -> Collaborator {
        Collaborator {
            id: Uuid::new_v4(),
            username: "alexj".to_string(),
            email: "alex.johnson@example.net".to_string(),
            password_hash: password::hash_password("Sales123*").unwrap(),
            first_name: "Alex".to_string(),
            last_name: "Johnson".to_string(),
            employee_number: "9474".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_auth_context_from_collaborator() {
        let collaborator = sample_collaborator(Role::Sales);
        let ctx = AuthContext::from_collaborator(&collaborator);

        assert_eq!(ctx.collaborator_id, collaborator.id);
        assert_eq!(ctx.username, "alexj");
        assert_eq!(ctx.full_name, "Alex Johnson");
        assert_eq!(ctx.role, Role::Sales);
    }

    #[test]
    fn test_wrong_password_never_verifies() {
        // The credential check behind `authenticate`: a wrong password must
        // come back false, so no session can be established from it.
        let collaborator = sample_collaborator(Role::Support);

        assert!(!password::verify_password("wrong-password", &collaborator.password_hash).unwrap());
        assert!(password::verify_password("Sales123*", &collaborator.password_hash).unwrap());
    }

    // `authenticate` itself is covered in tests/service_integration.rs
}
