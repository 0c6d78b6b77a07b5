/// Authorization gate: the static role→permission table
///
/// Permissions are reproduced from the three team permission lists of the
/// operational material:
///
/// - **management**: `view_client`, `manage_collaborators`,
///   `manage_contracts`, `view_contract`, `view_event`
/// - **sales**: `add_client`, `view_client`, `view_contract`, `view_event`
/// - **support**: `view_client`, `view_contract`, `view_event`
///
/// Ownership rules that the table cannot express (a sales collaborator may
/// only touch their own clients' records, a support collaborator only their
/// own events) are checked with [`require_sales_contact`] and
/// [`require_support_contact`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::session::AuthContext;
use crate::models::collaborator::Role;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Role does not hold the required permission
    #[error("Insufficient permission: the {role} role cannot {permission}")]
    Denied {
        /// Role of the denied collaborator
        role: Role,
        /// Permission that was required
        permission: Permission,
    },

    /// Record belongs to another collaborator
    #[error("Insufficient permission: this record is assigned to another collaborator")]
    NotOwner,
}

/// Actions gated by the role→permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View client records
    ViewClient,

    /// Create client records
    AddClient,

    /// View contract records
    ViewContract,

    /// Create and modify any contract
    ManageContracts,

    /// View event records
    ViewEvent,

    /// Create, update, and delete collaborator accounts
    ManageCollaborators,
}

impl Permission {
    /// Permission codename, as used in the telemetry envelopes
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewClient => "view_client",
            Permission::AddClient => "add_client",
            Permission::ViewContract => "view_contract",
            Permission::ManageContracts => "manage_contracts",
            Permission::ViewEvent => "view_event",
            Permission::ManageCollaborators => "manage_collaborators",
        }
    }

    /// Human-readable verb phrase for denial messages
    fn describe(&self) -> &'static str {
        match self {
            Permission::ViewClient => "view clients",
            Permission::AddClient => "add clients",
            Permission::ViewContract => "view contracts",
            Permission::ManageContracts => "manage contracts",
            Permission::ViewEvent => "view events",
            Permission::ManageCollaborators => "manage collaborators",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl Role {
    /// The static permission list of this role
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Management => &[
                Permission::ViewClient,
                Permission::ManageCollaborators,
                Permission::ManageContracts,
                Permission::ViewContract,
                Permission::ViewEvent,
            ],
            Role::Sales => &[
                Permission::AddClient,
                Permission::ViewClient,
                Permission::ViewContract,
                Permission::ViewEvent,
            ],
            Role::Support => &[
                Permission::ViewClient,
                Permission::ViewContract,
                Permission::ViewEvent,
            ],
        }
    }

    /// Checks the permission table
    pub fn has_perm(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// The authorization gate
///
/// Every service operation calls this before touching the database.
///
/// # Errors
///
/// Returns `AuthzError::Denied` when the collaborator's role does not hold
/// the permission. The caller surfaces the denial to the user and forwards
/// it to the telemetry collector.
pub fn require_permission(auth: &AuthContext, permission: Permission) -> Result<(), AuthzError> {
    if !auth.role.has_perm(permission) {
        return Err(AuthzError::Denied {
            role: auth.role,
            permission,
        });
    }

    Ok(())
}

/// Checks that the collaborator is the sales contact of a record
///
/// A NULL contact (the owning account was deleted) denies too; only the
/// recorded owner may pass.
pub fn require_sales_contact(
    auth: &AuthContext,
    sales_contact_id: Option<Uuid>,
) -> Result<(), AuthzError> {
    if sales_contact_id != Some(auth.collaborator_id) {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

/// Checks that the collaborator is the support contact of an event
pub fn require_support_contact(
    auth: &AuthContext,
    support_contact_id: Option<Uuid>,
) -> Result<(), AuthzError> {
    if support_contact_id != Some(auth.collaborator_id) {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            collaborator_id: Uuid::new_v4(),
            username: "test".to_string(),
            full_name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn test_permission_table_management() {
        let role = Role::Management;
        assert!(role.has_perm(Permission::ViewClient));
        assert!(role.has_perm(Permission::ManageCollaborators));
        assert!(role.has_perm(Permission::ManageContracts));
        assert!(role.has_perm(Permission::ViewContract));
        assert!(role.has_perm(Permission::ViewEvent));
        assert!(!role.has_perm(Permission::AddClient));
    }

    #[test]
    fn test_permission_table_sales() {
        let role = Role::Sales;
        assert!(role.has_perm(Permission::AddClient));
        assert!(role.has_perm(Permission::ViewClient));
        assert!(role.has_perm(Permission::ViewContract));
        assert!(role.has_perm(Permission::ViewEvent));
        assert!(!role.has_perm(Permission::ManageCollaborators));
        assert!(!role.has_perm(Permission::ManageContracts));
    }

    #[test]
    fn test_permission_table_support() {
        let role = Role::Support;
        assert!(role.has_perm(Permission::ViewClient));
        assert!(role.has_perm(Permission::ViewContract));
        assert!(role.has_perm(Permission::ViewEvent));
        assert!(!role.has_perm(Permission::AddClient));
        assert!(!role.has_perm(Permission::ManageCollaborators));
        assert!(!role.has_perm(Permission::ManageContracts));
    }

    #[test]
    fn test_sales_cannot_manage_collaborators() {
        let err = require_permission(&ctx(Role::Sales), Permission::ManageCollaborators)
            .expect_err("sales must be denied");

        match err {
            AuthzError::Denied { role, permission } => {
                assert_eq!(role, Role::Sales);
                assert_eq!(permission, Permission::ManageCollaborators);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_denied_message_is_user_readable() {
        let err = require_permission(&ctx(Role::Support), Permission::AddClient).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient permission: the support role cannot add clients"
        );
    }

    #[test]
    fn test_require_sales_contact() {
        let auth = ctx(Role::Sales);

        assert!(require_sales_contact(&auth, Some(auth.collaborator_id)).is_ok());
        assert!(require_sales_contact(&auth, Some(Uuid::new_v4())).is_err());
        assert!(require_sales_contact(&auth, None).is_err());
    }

    #[test]
    fn test_require_support_contact() {
        let auth = ctx(Role::Support);

        assert!(require_support_contact(&auth, Some(auth.collaborator_id)).is_ok());
        assert!(require_support_contact(&auth, Some(Uuid::new_v4())).is_err());
        assert!(require_support_contact(&auth, None).is_err());
    }

    #[test]
    fn test_permission_codenames() {
        assert_eq!(Permission::ViewClient.as_str(), "view_client");
        assert_eq!(Permission::AddClient.as_str(), "add_client");
        assert_eq!(Permission::ViewContract.as_str(), "view_contract");
        assert_eq!(Permission::ManageContracts.as_str(), "manage_contracts");
        assert_eq!(Permission::ViewEvent.as_str(), "view_event");
        assert_eq!(
            Permission::ManageCollaborators.as_str(),
            "manage_collaborators"
        );
    }
}
