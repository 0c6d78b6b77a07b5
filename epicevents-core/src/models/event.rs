/// Event model and database operations
///
/// An event is a scheduled occasion tied to exactly one signed contract and
/// worked by an assigned support collaborator. The signed-contract rule is
/// enforced by the service layer, not the schema.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     contract_id UUID NOT NULL REFERENCES contracts(id) ON DELETE CASCADE,
///     name VARCHAR(100) NOT NULL,
///     client_name VARCHAR(100) NOT NULL,
///     client_contact TEXT,
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     support_contact_id UUID REFERENCES collaborators(id) ON DELETE SET NULL,
///     location VARCHAR(300) NOT NULL,
///     attendees INTEGER NOT NULL CHECK (attendees >= 0),
///     notes TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    /// Unique event ID (UUID v4)
    pub id: Uuid,

    /// Contract the event belongs to
    pub contract_id: Uuid,

    /// Event name
    pub name: String,

    /// Name of the client the event is held for, denormalized at creation
    pub client_name: String,

    /// Free-form contact details for the client
    pub client_contact: Option<String>,

    /// Start of the event
    pub start_date: DateTime<Utc>,

    /// End of the event
    pub end_date: DateTime<Utc>,

    /// Support collaborator assigned to run the event
    ///
    /// None until management assigns one, or after the collaborator
    /// account was deleted
    pub support_contact_id: Option<Uuid>,

    /// Venue
    pub location: String,

    /// Expected number of attendees
    pub attendees: i32,

    /// Additional notes
    pub notes: Option<String>,

    /// When the event was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Contract the event belongs to
    pub contract_id: Uuid,

    /// Event name
    pub name: String,

    /// Client name, denormalized from the client record
    pub client_name: String,

    /// Free-form client contact details
    pub client_contact: Option<String>,

    /// Start of the event
    pub start_date: DateTime<Utc>,

    /// End of the event
    pub end_date: DateTime<Utc>,

    /// Venue
    pub location: String,

    /// Expected number of attendees
    pub attendees: i32,

    /// Additional notes
    pub notes: Option<String>,
}

/// Input for updating an existing event
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// New event name
    pub name: Option<String>,

    /// New client contact details (use Some(None) to clear)
    pub client_contact: Option<Option<String>>,

    /// New start
    pub start_date: Option<DateTime<Utc>>,

    /// New end
    pub end_date: Option<DateTime<Utc>>,

    /// New venue
    pub location: Option<String>,

    /// New attendee count
    pub attendees: Option<i32>,

    /// New notes (use Some(None) to clear)
    pub notes: Option<Option<String>>,
}

impl Event {
    /// Creates a new event in the database
    pub async fn create(pool: &PgPool, data: CreateEvent) -> Result<Self, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (contract_id, name, client_name, client_contact, start_date, end_date,
                 location, attendees, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, contract_id, name, client_name, client_contact, start_date,
                      end_date, support_contact_id, location, attendees, notes, created_at
            "#,
        )
        .bind(data.contract_id)
        .bind(data.name)
        .bind(data.client_name)
        .bind(data.client_contact)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.location)
        .bind(data.attendees)
        .bind(data.notes)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Finds an event by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, contract_id, name, client_name, client_contact, start_date,
                   end_date, support_contact_id, location, attendees, notes, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Lists all events, soonest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, contract_id, name, client_name, client_contact, start_date,
                   end_date, support_contact_id, location, attendees, notes, created_at
            FROM events
            ORDER BY start_date ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Lists the events assigned to a support collaborator, soonest first
    pub async fn list_for_support_contact(
        pool: &PgPool,
        support_contact_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, contract_id, name, client_name, client_contact, start_date,
                   end_date, support_contact_id, location, attendees, notes, created_at
            FROM events
            WHERE support_contact_id = $1
            ORDER BY start_date ASC
            "#,
        )
        .bind(support_contact_id)
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Lists events that have no support contact assigned, soonest first
    pub async fn list_unassigned(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, contract_id, name, client_name, client_contact, start_date,
                   end_date, support_contact_id, location, attendees, notes, created_at
            FROM events
            WHERE support_contact_id IS NULL
            ORDER BY start_date ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Sets or replaces the support collaborator assigned to an event
    ///
    /// # Returns
    ///
    /// The updated event if found, None if the event doesn't exist
    pub async fn assign_support(
        pool: &PgPool,
        id: Uuid,
        support_contact_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET support_contact_id = $2
            WHERE id = $1
            RETURNING id, contract_id, name, client_name, client_contact, start_date,
                      end_date, support_contact_id, location, attendees, notes, created_at
            "#,
        )
        .bind(id)
        .bind(support_contact_id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Updates an existing event
    ///
    /// Only non-None fields in `data` will be updated.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateEvent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE events SET id = id");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.client_contact.is_some() {
            bind_count += 1;
            query.push_str(&format!(", client_contact = ${}", bind_count));
        }
        if data.start_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", start_date = ${}", bind_count));
        }
        if data.end_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", end_date = ${}", bind_count));
        }
        if data.location.is_some() {
            bind_count += 1;
            query.push_str(&format!(", location = ${}", bind_count));
        }
        if data.attendees.is_some() {
            bind_count += 1;
            query.push_str(&format!(", attendees = ${}", bind_count));
        }
        if data.notes.is_some() {
            bind_count += 1;
            query.push_str(&format!(", notes = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, contract_id, name, client_name, client_contact, \
             start_date, end_date, support_contact_id, location, attendees, notes, created_at",
        );

        let mut q = sqlx::query_as::<_, Event>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(client_contact) = data.client_contact {
            q = q.bind(client_contact);
        }
        if let Some(start_date) = data.start_date {
            q = q.bind(start_date);
        }
        if let Some(end_date) = data.end_date {
            q = q.bind(end_date);
        }
        if let Some(location) = data.location {
            q = q.bind(location);
        }
        if let Some(attendees) = data.attendees {
            q = q.bind(attendees);
        }
        if let Some(notes) = data.notes {
            q = q.bind(notes);
        }

        let event = q.fetch_optional(pool).await?;

        Ok(event)
    }

    /// Deletes an event by ID
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
    fn test_update_event_default() {
        let update = UpdateEvent::default();
        assert!(update.name.is_none());
        assert!(update.client_contact.is_none());
        assert!(update.start_date.is_none());
        assert!(update.end_date.is_none());
        assert!(update.location.is_none());
        assert!(update.attendees.is_none());
        assert!(update.notes.is_none());
    }

    // Integration tests for database operations are in tests/service_integration.rs
}
