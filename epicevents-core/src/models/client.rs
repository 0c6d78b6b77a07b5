/// Client model and database operations
///
/// A client is a company/contact record owned by the sales collaborator who
/// created it. The owning collaborator is the `sales_contact`; contracts
/// created for the client inherit it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE clients (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     full_name VARCHAR(100) NOT NULL,
///     email VARCHAR(254) NOT NULL UNIQUE,
///     phone VARCHAR(20) NOT NULL,
///     company_name VARCHAR(100) NOT NULL,
///     sales_contact_id UUID REFERENCES collaborators(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Client record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    /// Unique client ID (UUID v4)
    pub id: Uuid,

    /// Contact person's full name
    pub full_name: String,

    /// Contact email, unique across all clients
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Name of the client's company
    pub company_name: String,

    /// Sales collaborator responsible for the client
    ///
    /// None when the collaborator account was deleted
    pub sales_contact_id: Option<Uuid>,

    /// When the client was added
    pub created_at: DateTime<Utc>,

    /// When the client's details were last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    /// Contact person's full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Name of the client's company
    pub company_name: String,

    /// Sales collaborator who owns the client
    pub sales_contact_id: Option<Uuid>,
}

/// Input for updating an existing client
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClient {
    /// New full name
    pub full_name: Option<String>,

    /// New email
    pub email: Option<String>,

    /// New phone number
    pub phone: Option<String>,

    /// New company name
    pub company_name: Option<String>,
}

impl Client {
    /// Creates a new client in the database
    pub async fn create(pool: &PgPool, data: CreateClient) -> Result<Self, sqlx::Error> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (full_name, email, phone, company_name, sales_contact_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, phone, company_name, sales_contact_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.company_name)
        .bind(data.sales_contact_id)
        .fetch_one(pool)
        .await?;

        Ok(client)
    }

    /// Finds a client by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, full_name, email, phone, company_name, sales_contact_id,
                   created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(client)
    }

    /// Lists all clients, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, full_name, email, phone, company_name, sales_contact_id,
                   created_at, updated_at
            FROM clients
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(clients)
    }

    /// Lists the clients owned by a sales collaborator
    pub async fn list_for_sales_contact(
        pool: &PgPool,
        sales_contact_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, full_name, email, phone, company_name, sales_contact_id,
                   created_at, updated_at
            FROM clients
            WHERE sales_contact_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(sales_contact_id)
        .fetch_all(pool)
        .await?;

        Ok(clients)
    }

    /// Checks whether a client email is taken, optionally excluding one record
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM clients
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

    /// Updates an existing client
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is set to the current time.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateClient,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE clients SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.full_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", full_name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.phone.is_some() {
            bind_count += 1;
            query.push_str(&format!(", phone = ${}", bind_count));
        }
        if data.company_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", company_name = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, full_name, email, phone, company_name, \
             sales_contact_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Client>(&query).bind(id);

        if let Some(full_name) = data.full_name {
            q = q.bind(full_name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(phone) = data.phone {
            q = q.bind(phone);
        }
        if let Some(company_name) = data.company_name {
            q = q.bind(company_name);
        }

        let client = q.fetch_optional(pool).await?;

        Ok(client)
    }

    /// Deletes a client by ID
    ///
    /// Contracts (and their events) belonging to the client are removed by
    /// the schema's ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
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
    fn test_update_client_default() {
        let update = UpdateClient::default();
        assert!(update.full_name.is_none());
        assert!(update.email.is_none());
        assert!(update.phone.is_none());
        assert!(update.company_name.is_none());
    }

    // Integration tests for database operations are in tests/service_integration.rs
}
