/// Telemetry collector client
///
/// Permission denials and data-layer errors are notable events: they are
/// shown to the user as a short message and also forwarded to an external
/// collector identified by a DSN from the settings file. Envelopes are
/// JSON documents POSTed with reqwest, fire-and-forget; a send failure is
/// logged at debug level and never surfaces to the user.
///
/// When no DSN is configured the client is disabled and every capture is a
/// no-op.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::authorization::AuthzError;
use crate::auth::session::AuthContext;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct Inner {
    client: reqwest::Client,
    dsn: String,
}

/// Handle to the telemetry collector, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    inner: Option<Arc<Inner>>,
}

impl Telemetry {
    /// Creates a telemetry client for the given DSN
    ///
    /// An absent or empty DSN yields a disabled client.
    pub fn new(dsn: Option<String>) -> Self {
        let dsn = match dsn {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                tracing::debug!("no telemetry DSN configured, collector disabled");
                return Self::disabled();
            }
        };

        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            inner: Some(Arc::new(Inner { client, dsn })),
        }
    }

    /// A client that drops every capture
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether captures will actually be sent
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Reports a permission denial
    pub fn capture_permission_denied(&self, auth: &AuthContext, err: &AuthzError) {
        let mut extra = json!({
            "username": auth.username,
            "role": auth.role.as_str(),
        });
        if let AuthzError::Denied { permission, .. } = err {
            extra["permission"] = json!(permission.as_str());
        }

        self.send("warning", &err.to_string(), extra);
    }

    /// Reports a data-layer or other unexpected error
    pub fn capture_error(&self, context: &str, message: &str) {
        self.send("error", message, json!({ "context": context }));
    }

    fn send(&self, level: &str, message: &str, extra: serde_json::Value) {
        let Some(inner) = &self.inner else {
            return;
        };

        let envelope = json!({
            "logger": "epicevents",
            "level": level,
            "message": message,
            "extra": extra,
            "timestamp": Utc::now().to_rfc3339(),
        });

        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            let result = inner
                .client
                .post(&inner.dsn)
                .json(&envelope)
                .send()
                .await;

            if let Err(e) = result {
                tracing::debug!("telemetry send failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_dsn() {
        assert!(!Telemetry::new(None).is_enabled());
        assert!(!Telemetry::new(Some(String::new())).is_enabled());
        assert!(!Telemetry::new(Some("   ".to_string())).is_enabled());
        assert!(!Telemetry::disabled().is_enabled());
    }

    #[test]
    fn test_enabled_with_dsn() {
        let telemetry = Telemetry::new(Some("https://collector.example/ingest".to_string()));
        assert!(telemetry.is_enabled());
    }

    #[tokio::test]
    async fn test_capture_on_disabled_client_is_noop() {
        use crate::auth::authorization::Permission;
        use crate::models::collaborator::Role;

        let telemetry = Telemetry::disabled();
        let auth = AuthContext {
            collaborator_id: uuid::Uuid::new_v4(),
            username: "alexj".to_string(),
            full_name: "Alex Johnson".to_string(),
            role: Role::Sales,
        };
        let err = AuthzError::Denied {
            role: Role::Sales,
            permission: Permission::ManageCollaborators,
        };

        // Must not panic and must not spawn anything
        telemetry.capture_permission_denied(&auth, &err);
        telemetry.capture_error("tests", "boom");
    }
}
