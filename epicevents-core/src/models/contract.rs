/// Contract model and database operations
///
/// A contract is a financial agreement tied to exactly one client. Amounts
/// are stored as integer cents. Events can only be created against a signed
/// contract.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE contract_status AS ENUM ('signed', 'not_signed');
///
/// CREATE TABLE contracts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
///     sales_contact_id UUID REFERENCES collaborators(id) ON DELETE SET NULL,
///     total_amount_cents BIGINT NOT NULL CHECK (total_amount_cents >= 0),
///     amount_remaining_cents BIGINT NOT NULL CHECK (amount_remaining_cents >= 0),
///     status contract_status NOT NULL DEFAULT 'not_signed',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Signed/unsigned status of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// The client has signed; dependent events may be created
    Signed,

    /// Not signed yet; no events allowed
    NotSigned,
}

impl ContractStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Signed => "signed",
            ContractStatus::NotSigned => "not signed",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" => Ok(ContractStatus::Signed),
            "not_signed" | "not signed" => Ok(ContractStatus::NotSigned),
            other => Err(format!("unknown contract status: {other}")),
        }
    }
}

/// Listing filter for contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFilter {
    /// Only signed contracts
    Signed,

    /// Only unsigned contracts
    NotSigned,

    /// Contracts with a remaining amount greater than zero
    Unpaid,
}

/// Contract record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contract {
    /// Unique contract ID (UUID v4)
    pub id: Uuid,

    /// Client the contract belongs to
    pub client_id: Uuid,

    /// Sales collaborator responsible for the contract
    ///
    /// Inherited from the client at creation time; None when the
    /// collaborator account was deleted
    pub sales_contact_id: Option<Uuid>,

    /// Total contract amount, in cents
    pub total_amount_cents: i64,

    /// Amount still to be paid, in cents
    pub amount_remaining_cents: i64,

    /// Current status
    pub status: ContractStatus,

    /// When the contract was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContract {
    /// Client the contract belongs to
    pub client_id: Uuid,

    /// Sales collaborator responsible for the contract
    pub sales_contact_id: Option<Uuid>,

    /// Total contract amount, in cents
    pub total_amount_cents: i64,

    /// Amount still to be paid, in cents
    pub amount_remaining_cents: i64,

    /// Initial status
    pub status: ContractStatus,
}

/// Input for updating an existing contract
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContract {
    /// New total amount, in cents
    pub total_amount_cents: Option<i64>,

    /// New remaining amount, in cents
    pub amount_remaining_cents: Option<i64>,

    /// New status
    pub status: Option<ContractStatus>,
}

impl Contract {
    /// Whether dependent events may be created
    pub fn is_signed(&self) -> bool {
        self.status == ContractStatus::Signed
    }

    /// Creates a new contract in the database
    pub async fn create(pool: &PgPool, data: CreateContract) -> Result<Self, sqlx::Error> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts
                (client_id, sales_contact_id, total_amount_cents, amount_remaining_cents, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, sales_contact_id, total_amount_cents,
                      amount_remaining_cents, status, created_at
            "#,
        )
        .bind(data.client_id)
        .bind(data.sales_contact_id)
        .bind(data.total_amount_cents)
        .bind(data.amount_remaining_cents)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(contract)
    }

    /// Finds a contract by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            SELECT id, client_id, sales_contact_id, total_amount_cents,
                   amount_remaining_cents, status, created_at
            FROM contracts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(contract)
    }

    /// Lists contracts, optionally filtered, oldest first
    pub async fn list(
        pool: &PgPool,
        filter: Option<ContractFilter>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            "SELECT id, client_id, sales_contact_id, total_amount_cents, \
             amount_remaining_cents, status, created_at FROM contracts",
        );
        query.push_str(filter_clause(filter));
        query.push_str(" ORDER BY created_at ASC");

        let mut q = sqlx::query_as::<_, Contract>(&query);
        if let Some(status) = filter_status(filter) {
            q = q.bind(status);
        }

        let contracts = q.fetch_all(pool).await?;

        Ok(contracts)
    }

    /// Lists the contracts attached to a sales collaborator's clients,
    /// optionally filtered, oldest first
    pub async fn list_for_sales_contact(
        pool: &PgPool,
        sales_contact_id: Uuid,
        filter: Option<ContractFilter>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            "SELECT id, client_id, sales_contact_id, total_amount_cents, \
             amount_remaining_cents, status, created_at FROM contracts \
             WHERE sales_contact_id = $1",
        );
        match filter {
            Some(ContractFilter::Signed) | Some(ContractFilter::NotSigned) => {
                query.push_str(" AND status = $2");
            }
            Some(ContractFilter::Unpaid) => {
                query.push_str(" AND amount_remaining_cents > 0");
            }
            None => {}
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut q = sqlx::query_as::<_, Contract>(&query).bind(sales_contact_id);
        if let Some(status) = filter_status(filter) {
            q = q.bind(status);
        }

        let contracts = q.fetch_all(pool).await?;

        Ok(contracts)
    }

    /// Updates an existing contract
    ///
    /// Only non-None fields in `data` will be updated.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateContract,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE contracts SET id = id");
        let mut bind_count = 1;

        if data.total_amount_cents.is_some() {
            bind_count += 1;
            query.push_str(&format!(", total_amount_cents = ${}", bind_count));
        }
        if data.amount_remaining_cents.is_some() {
            bind_count += 1;
            query.push_str(&format!(", amount_remaining_cents = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, client_id, sales_contact_id, total_amount_cents, \
             amount_remaining_cents, status, created_at",
        );

        let mut q = sqlx::query_as::<_, Contract>(&query).bind(id);

        if let Some(total) = data.total_amount_cents {
            q = q.bind(total);
        }
        if let Some(remaining) = data.amount_remaining_cents {
            q = q.bind(remaining);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let contract = q.fetch_optional(pool).await?;

        Ok(contract)
    }

    /// Deletes a contract by ID
    ///
    /// Events attached to the contract are removed by ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn filter_clause(filter: Option<ContractFilter>) -> &'static str {
    match filter {
        Some(ContractFilter::Signed) | Some(ContractFilter::NotSigned) => " WHERE status = $1",
        Some(ContractFilter::Unpaid) => " WHERE amount_remaining_cents > 0",
        None => "",
    }
}

fn filter_status(filter: Option<ContractFilter>) -> Option<ContractStatus> {
    match filter {
        Some(ContractFilter::Signed) => Some(ContractStatus::Signed),
        Some(ContractFilter::NotSigned) => Some(ContractStatus::NotSigned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_status_as_str() {
        assert_eq!(ContractStatus::Signed.as_str(), "signed");
        assert_eq!(ContractStatus::NotSigned.as_str(), "not signed");
    }

    #[test]
    fn test_contract_status_from_str() {
        assert_eq!(
            "signed".parse::<ContractStatus>().unwrap(),
            ContractStatus::Signed
        );
        assert_eq!(
            "not_signed".parse::<ContractStatus>().unwrap(),
            ContractStatus::NotSigned
        );
        assert_eq!(
            "Not Signed".parse::<ContractStatus>().unwrap(),
            ContractStatus::NotSigned
        );
        assert!("pending".parse::<ContractStatus>().is_err());
    }

    #[test]
    fn test_is_signed() {
        let contract = Contract {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            sales_contact_id: None,
            total_amount_cents: 150_000,
            amount_remaining_cents: 50_000,
            status: ContractStatus::Signed,
            created_at: Utc::now(),
        };
        assert!(contract.is_signed());

        let unsigned = Contract {
            status: ContractStatus::NotSigned,
            ..contract
        };
        assert!(!unsigned.is_signed());
    }

    #[test]
    fn test_filter_clause() {
        assert_eq!(filter_clause(None), "");
        assert_eq!(filter_clause(Some(ContractFilter::Signed)), " WHERE status = $1");
        assert_eq!(filter_clause(Some(ContractFilter::NotSigned)), " WHERE status = $1");
        assert_eq!(
            filter_clause(Some(ContractFilter::Unpaid)),
            " WHERE amount_remaining_cents > 0"
        );
    }

    #[test]
    fn test_filter_status() {
        assert_eq!(filter_status(None), None);
        assert_eq!(filter_status(Some(ContractFilter::Unpaid)), None);
        assert_eq!(
            filter_status(Some(ContractFilter::Signed)),
            Some(ContractStatus::Signed)
        );
        assert_eq!(
            filter_status(Some(ContractFilter::NotSigned)),
            Some(ContractStatus::NotSigned)
        );
    }

    // Integration tests for database operations are in tests/service_integration.rs
}
