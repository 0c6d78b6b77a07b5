/// Support menu: read-only listings plus the collaborator's own events
///
/// Support holds the three view permissions; the only write path is
/// updating an event the collaborator is assigned to.

use epicevents_core::auth::session::AuthContext;
use epicevents_core::services::events::EventChanges;
use epicevents_core::services::{clients, contracts, events};

use super::{ask_continue, exit_message, report_error};
use crate::app::AppState;
use crate::views::{self, render};

const MAIN_MENU: &[&str] = &[
    "1 - View the list of all clients",
    "2 - View the list of all contracts",
    "3 - View the list of all events",
    "4 - View your assigned events",
    "5 - Update one of your assigned events",
    "6 - Exit the CRM system",
];

/// Support menu loop
pub async fn start(state: &AppState, auth: &AuthContext) -> anyhow::Result<()> {
    loop {
        views::clear_screen();
        views::show_menu(&auth.full_name, MAIN_MENU);

        match views::menu_choice(MAIN_MENU.len()) {
            1 => show_all_clients(state, auth).await,
            2 => show_all_contracts(state, auth).await,
            3 => show_all_events(state, auth).await,
            4 => show_my_events(state, auth).await,
            5 => update_my_event(state, auth).await,
            _ => {
                exit_message();
                return Ok(());
            }
        }

        if !ask_continue() {
            exit_message();
            return Ok(());
        }
    }
}

async fn show_all_clients(state: &AppState, auth: &AuthContext) {
    match clients::list(&state.db, auth).await {
        Ok(list) if list.is_empty() => views::display_info_message("No clients available"),
        Ok(list) => render::display_list_of_clients(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

async fn show_all_contracts(state: &AppState, auth: &AuthContext) {
    match contracts::list(&state.db, auth, None).await {
        Ok(list) if list.is_empty() => views::display_info_message("No contracts available"),
        Ok(list) => render::display_list_of_contracts(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

async fn show_all_events(state: &AppState, auth: &AuthContext) {
    match events::list(&state.db, auth).await {
        Ok(list) if list.is_empty() => views::display_info_message("No events available"),
        Ok(list) => render::display_list_of_events(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

async fn show_my_events(state: &AppState, auth: &AuthContext) {
    match events::list_mine(&state.db, auth).await {
        Ok(list) if list.is_empty() => views::display_info_message("You have no assigned events"),
        Ok(list) => render::display_list_of_events(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

async fn update_my_event(state: &AppState, auth: &AuthContext) {
    let mine = match events::list_mine(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if mine.is_empty() {
        views::display_info_message("You have no assigned events");
        return;
    }

    render::display_list_of_events(&mine);
    let Some(index) = views::select_record(mine.len(), "event") else {
        views::display_warning_message("Modification cancelled");
        return;
    };
    let selected = &mine[index];
    render::display_event_details(selected);

    let changes = EventChanges {
        name: views::prompt_optional("New event name"),
        client_contact: views::prompt_optional("New client contact").map(Some),
        start_date: views::prompt_optional_datetime("New start date"),
        end_date: views::prompt_optional_datetime("New end date"),
        location: views::prompt_optional("New location"),
        attendees: views::prompt_optional_count("New attendee count"),
        notes: views::prompt_optional("New notes").map(Some),
    };

    if changes.is_empty() {
        views::display_info_message("No modifications were made");
        return;
    }

    match events::update(&state.db, auth, selected.id, changes).await {
        Ok(updated) => {
            render::display_event_details(&updated);
            views::display_info_message("The event has been updated successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}
