/// Unified error type for the service layer
///
/// Every service operation returns `Result<T, ServiceError>`. The CLI
/// renders the error as a short message; permission denials and database
/// errors are additionally forwarded to the telemetry collector.

use crate::auth::authorization::AuthzError;
use crate::auth::password::PasswordError;
use crate::auth::session::AuthError;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// One failed field in a validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Unified service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Authorization gate denied the operation
    #[error(transparent)]
    Authz(#[from] AuthzError),

    /// Authentication failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Input validation failed
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Referenced record does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Entity name shown to the user
        entity: &'static str,
    },

    /// Unique value already in use, or another state conflict
    #[error("{0}")]
    Conflict(String),

    /// Events require a signed contract
    #[error("The contract is not signed; events can only be created for signed contracts")]
    UnsignedContract,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ServiceError {
    /// Builds a validation error from a single field failure
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    /// Maps `validator` derive output to field errors
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        ServiceError::Validation(details)
    }

    /// Whether this error is a permission denial (telemetry-notable)
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ServiceError::Authz(_))
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authorization::Permission;
    use crate::models::collaborator::Role;

    #[test]
    fn test_invalid_builds_single_field_error() {
        let err = ServiceError::invalid("email", "Invalid email format");
        assert_eq!(
            err.to_string(),
            "Validation failed: email: Invalid email format"
        );
    }

    #[test]
    fn test_validation_display_joins_fields() {
        let err = ServiceError::Validation(vec![
            FieldError {
                field: "full_name".to_string(),
                message: "Full name is required".to_string(),
            },
            FieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: full_name: Full name is required; email: Invalid email format"
        );
    }

    #[test]
    fn test_is_permission_denied() {
        let denied = ServiceError::Authz(AuthzError::Denied {
            role: Role::Sales,
            permission: Permission::ManageCollaborators,
        });
        assert!(denied.is_permission_denied());

        let not_found = ServiceError::NotFound { entity: "Client" };
        assert!(!not_found.is_permission_denied());
    }

    #[test]
    fn test_unsigned_contract_message() {
        let err = ServiceError::UnsignedContract;
        assert!(err.to_string().contains("not signed"));
    }
}
