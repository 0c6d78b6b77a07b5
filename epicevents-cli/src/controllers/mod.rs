/// Interactive session: login flow and role dispatch
///
/// The login prompt produces an `AuthContext`; the matching role controller
/// then owns the menu loop. Service errors are rendered as one short
/// message, and permission denials and database errors are additionally
/// forwarded to the telemetry collector.

use epicevents_core::auth::session::{authenticate, AuthContext, AuthError};
use epicevents_core::error::ServiceError;
use epicevents_core::models::Role;

use crate::app::AppState;
use crate::views;

pub mod management;
pub mod sales;
pub mod support;

/// Runs one interactive session: login, then the role-keyed menu loop
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    views::clear_screen();
    println!("Epic Events CRM");
    println!();

    let Some(auth) = login(state).await? else {
        exit_message();
        return Ok(());
    };

    views::display_info_message("Logged in successfully!");

    match auth.role {
        Role::Management => management::start(state, &auth).await,
        Role::Sales => sales::start(state, &auth).await,
        Role::Support => support::start(state, &auth).await,
    }
}

/// Prompts for credentials until a session is established or the user
/// gives up
async fn login(state: &AppState) -> anyhow::Result<Option<AuthContext>> {
    loop {
        let username = views::prompt_nonempty("Username");
        let password = views::prompt_nonempty("Password");

        match authenticate(&state.db, &username, &password).await {
            Ok(auth) => return Ok(Some(auth)),
            Err(AuthError::InvalidCredentials) => {
                views::display_error_message("Login failed: Incorrect username or password");
                if !views::confirm("Do you want to try again?") {
                    return Ok(None);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Renders a service error and forwards notable ones to telemetry
pub(crate) fn report_error(state: &AppState, auth: &AuthContext, err: &ServiceError) {
    match err {
        ServiceError::Authz(authz) => {
            state.telemetry.capture_permission_denied(auth, authz);
            views::display_error_message(&err.to_string());
        }
        ServiceError::Database(db) => {
            tracing::error!("database error: {}", db);
            state.telemetry.capture_error("database", &db.to_string());
            views::display_error_message(
                "I encountered a problem with the database, please try again later",
            );
        }
        other => views::display_error_message(&other.to_string()),
    }
}

/// "Another operation?" between menu rounds
pub(crate) fn ask_continue() -> bool {
    views::confirm("Do you want to perform another operation?")
}

/// Farewell line on the way out
pub(crate) fn exit_message() {
    views::display_info_message("Thank you for using Epic Events CRM, until next time!");
}
