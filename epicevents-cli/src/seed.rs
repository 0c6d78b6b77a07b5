/// Database provisioning: `epicevents seed`
///
/// Ensures the database exists, applies migrations, and creates one demo
/// collaborator per role so a fresh installation can be logged into.
/// Existing usernames are left untouched, so the command is idempotent.
/// This is a provisioning tool; it writes through the models directly
/// rather than the gated services.

use anyhow::Context;

use epicevents_core::auth::password;
use epicevents_core::db::{create_pool, ensure_database_exists, run_migrations};
use epicevents_core::models::{Collaborator, CreateCollaborator, Role};

use crate::config::Config;
use crate::views;

struct DemoCollaborator {
    first_name: &'static str,
    last_name: &'static str,
    username: &'static str,
    email: &'static str,
    role: Role,
    employee_number: &'static str,
    password: &'static str,
}

const DEMO_COLLABORATORS: &[DemoCollaborator] = &[
    DemoCollaborator {
        first_name: "Thomas",
        last_name: "Girard",
        username: "thomasg",
        email: "thomas.girard@example.net",
        role: Role::Management,
        employee_number: "9473",
        password: "Manage123*",
    },
    DemoCollaborator {
        first_name: "Alex",
        last_name: "Johnson",
        username: "alexj",
        email: "alex.johnson@example.net",
        role: Role::Sales,
        employee_number: "9474",
        password: "Sales123*",
    },
    DemoCollaborator {
        first_name: "Emma",
        last_name: "Smith",
        username: "emmas",
        email: "emma.smith@example.net",
        role: Role::Support,
        employee_number: "9475",
        password: "Support123*",
    },
];

/// Provisions the database and the demo collaborators
pub async fn run(config: &Config) -> anyhow::Result<()> {
    ensure_database_exists(&config.database.url)
        .await
        .context("Failed to create the database")?;

    let pool = create_pool(config.database_config())
        .await
        .context("Failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    for demo in DEMO_COLLABORATORS {
        if Collaborator::find_by_username(&pool, demo.username)
            .await?
            .is_some()
        {
            views::display_info_message(&format!(
                "Collaborator '{}' already exists, skipping",
                demo.username
            ));
            continue;
        }

        let password_hash = password::hash_password(demo.password)
            .map_err(|e| anyhow::anyhow!("Failed to hash demo password: {e}"))?;

        Collaborator::create(
            &pool,
            CreateCollaborator {
                username: demo.username.to_string(),
                email: demo.email.to_string(),
                password_hash,
                first_name: demo.first_name.to_string(),
                last_name: demo.last_name.to_string(),
                employee_number: demo.employee_number.to_string(),
                role: demo.role,
            },
        )
        .await
        .with_context(|| format!("Failed to create demo collaborator '{}'", demo.username))?;

        views::display_info_message(&format!(
            "Collaborator '{} {}' ({}) created successfully",
            demo.first_name,
            demo.last_name,
            demo.role.as_str()
        ));
    }

    views::display_info_message("Seeding complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_covers_every_role() {
        let roles: Vec<Role> = DEMO_COLLABORATORS.iter().map(|d| d.role).collect();
        assert!(roles.contains(&Role::Management));
        assert!(roles.contains(&Role::Sales));
        assert!(roles.contains(&Role::Support));
    }

    #[test]
    fn test_demo_passwords_meet_strength_rules() {
        for demo in DEMO_COLLABORATORS {
            assert!(
                password::validate_password_strength(demo.password).is_ok(),
                "demo password for '{}' would be rejected by the service layer",
                demo.username
            );
        }
    }

    #[test]
    fn test_demo_identifiers_are_unique() {
        let mut usernames: Vec<_> = DEMO_COLLABORATORS.iter().map(|d| d.username).collect();
        usernames.sort_unstable();
        usernames.dedup();
        assert_eq!(usernames.len(), DEMO_COLLABORATORS.len());

        let mut numbers: Vec<_> = DEMO_COLLABORATORS
            .iter()
            .map(|d| d.employee_number)
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), DEMO_COLLABORATORS.len());
    }
}
