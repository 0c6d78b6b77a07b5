/// Collaborator model and database operations
///
/// A collaborator is an employee user of the CRM. Each collaborator holds
/// exactly one role at a time; the role determines which operations the
/// authorization gate allows.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE collaborator_role AS ENUM ('management', 'sales', 'support');
///
/// CREATE TABLE collaborators (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(150) NOT NULL UNIQUE,
///     email VARCHAR(254) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     first_name VARCHAR(150) NOT NULL,
///     last_name VARCHAR(150) NOT NULL,
///     employee_number VARCHAR(50) NOT NULL UNIQUE,
///     role collaborator_role NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a collaborator, one of the three teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "collaborator_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages collaborators, creates and modifies all contracts,
    /// assigns support contacts to events
    Management,

    /// Creates clients and updates their own clients, contracts, and events
    Sales,

    /// Works the events they are assigned to
    Support,
}

impl Role {
    /// Converts role to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Management => "management",
            Role::Sales => "sales",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "management" => Ok(Role::Management),
            "sales" => Ok(Role::Sales),
            "support" => Ok(Role::Support),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Collaborator model representing an employee account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collaborator {
    /// Unique collaborator ID (UUID v4)
    pub id: Uuid,

    /// Login name, unique across all collaborators
    pub username: String,

    /// Email address, unique across all collaborators
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Internal employee number, unique across all collaborators
    pub employee_number: String,

    /// Team the collaborator belongs to
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the collaborator last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollaborator {
    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Internal employee number
    pub employee_number: String,

    /// Team to assign
    pub role: Role,
}

/// Input for updating an existing collaborator
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCollaborator {
    /// New login name
    pub username: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New password hash
    pub password_hash: Option<String>,

    /// New given name
    pub first_name: Option<String>,

    /// New family name
    pub last_name: Option<String>,

    /// New employee number
    pub employee_number: Option<String>,

    /// New role
    pub role: Option<Role>,
}

impl Collaborator {
    /// Full display name, falling back to the username when names are empty
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        if name.trim().is_empty() {
            self.username.clone()
        } else {
            name.trim().to_string()
        }
    }

    /// Creates a new collaborator in the database
    ///
    /// # Errors
    ///
    /// Returns an error if a unique constraint (username, email, employee
    /// number) is violated or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateCollaborator) -> Result<Self, sqlx::Error> {
        let collaborator = sqlx::query_as::<_, Collaborator>(
            r#"
            INSERT INTO collaborators
                (username, email, password_hash, first_name, last_name, employee_number, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, first_name, last_name,
                      employee_number, role, created_at, updated_at, last_login_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.employee_number)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(collaborator)
    }

    /// Finds a collaborator by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let collaborator = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   employee_number, role, created_at, updated_at, last_login_at
            FROM collaborators
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(collaborator)
    }

    /// Finds a collaborator by username
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let collaborator = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   employee_number, role, created_at, updated_at, last_login_at
            FROM collaborators
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(collaborator)
    }

    /// Lists all collaborators, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let collaborators = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   employee_number, role, created_at, updated_at, last_login_at
            FROM collaborators
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(collaborators)
    }

    /// Lists collaborators holding a given role, oldest first
    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<Self>, sqlx::Error> {
        let collaborators = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   employee_number, role, created_at, updated_at, last_login_at
            FROM collaborators
            WHERE role = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(role)
        .fetch_all(pool)
        .await?;

        Ok(collaborators)
    }

    /// Checks whether a username is taken, optionally excluding one record
    ///
    /// The exclusion allows update flows to keep the current value.
    pub async fn username_taken(
        pool: &PgPool,
        username: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM collaborators
                WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(username)
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Checks whether an email is taken, optionally excluding one record
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM collaborators
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Checks whether an employee number is taken, optionally excluding one record
    pub async fn employee_number_taken(
        pool: &PgPool,
        employee_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM collaborators
                WHERE employee_number = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(employee_number)
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Updates an existing collaborator
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is set to the current time.
    ///
    /// # Returns
    ///
    /// The updated collaborator if found, None if the record doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCollaborator,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE collaborators SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.username.is_some() {
            bind_count += 1;
            query.push_str(&format!(", username = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.password_hash.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password_hash = ${}", bind_count));
        }
        if data.first_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", first_name = ${}", bind_count));
        }
        if data.last_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", last_name = ${}", bind_count));
        }
        if data.employee_number.is_some() {
            bind_count += 1;
            query.push_str(&format!(", employee_number = ${}", bind_count));
        }
        if data.role.is_some() {
            bind_count += 1;
            query.push_str(&format!(", role = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, username, email, password_hash, first_name, \
             last_name, employee_number, role, created_at, updated_at, last_login_at",
        );

        let mut q = sqlx::query_as::<_, Collaborator>(&query).bind(id);

        if let Some(username) = data.username {
            q = q.bind(username);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(first_name) = data.first_name {
            q = q.bind(first_name);
        }
        if let Some(last_name) = data.last_name {
            q = q.bind(last_name);
        }
        if let Some(employee_number) = data.employee_number {
            q = q.bind(employee_number);
        }
        if let Some(role) = data.role {
            q = q.bind(role);
        }

        let collaborator = q.fetch_optional(pool).await?;

        Ok(collaborator)
    }

    /// Deletes a collaborator by ID
    ///
    /// Clients, contracts, and events referencing the collaborator keep
    /// their rows; the contact column is set to NULL by the schema.
    ///
    /// # Returns
    ///
    /// True if the collaborator was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collaborators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Updates the last login timestamp, typically after successful
    /// authentication
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE collaborators
            SET last_login_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Management.as_str(), "management");
        assert_eq!(Role::Sales.as_str(), "sales");
        assert_eq!(Role::Support.as_str(), "support");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("management".parse::<Role>().unwrap(), Role::Management);
        assert_eq!(" Sales ".parse::<Role>().unwrap(), Role::Sales);
        assert_eq!("SUPPORT".parse::<Role>().unwrap(), Role::Support);
        assert!("marketing".parse::<Role>().is_err());
    }

    #[test]
    fn test_full_name() {
        let collaborator = Collaborator {
            id: Uuid::new_v4(),
            username: "thomasg".to_string(),
            email: "thomas.girard@example.net".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Thomas".to_string(),
            last_name: "Girard".to_string(),
            employee_number: "9473".to_string(),
            role: Role::Management,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        assert_eq!(collaborator.full_name(), "Thomas Girard");

        let nameless = Collaborator {
            first_name: String::new(),
            last_name: String::new(),
            ..collaborator
        };
        assert_eq!(nameless.full_name(), "thomasg");
    }

    #[test]
    fn test_update_collaborator_default() {
        let update = UpdateCollaborator::default();
        assert!(update.username.is_none());
        assert!(update.email.is_none());
        assert!(update.password_hash.is_none());
        assert!(update.role.is_none());
    }

    // Integration tests for database operations are in tests/service_integration.rs
}
