/// Sales menu: clients, their contracts, and event creation
///
/// Sales holds `add_client`; updates are limited by the service layer to
/// the collaborator's own clients and those clients' contracts. Events can
/// only be created for signed contracts.

use epicevents_core::auth::session::AuthContext;
use epicevents_core::models::ContractFilter;
use epicevents_core::services::clients::{ClientChanges, NewClient};
use epicevents_core::services::contracts::ContractChanges;
use epicevents_core::services::events::NewEvent;
use epicevents_core::services::{clients, contracts, events};

use super::{ask_continue, exit_message, report_error};
use crate::app::AppState;
use crate::views::{self, render};

const MAIN_MENU: &[&str] = &[
    "1 - Create a new client",
    "2 - Update one of your clients",
    "3 - Modify a contract of one of your clients",
    "4 - Filter your contracts (signed, not signed, or not fully paid)",
    "5 - Create an event for a signed contract",
    "6 - View the list of all clients",
    "7 - View the list of all contracts",
    "8 - View the list of all events",
    "9 - Exit the CRM system",
];

const FILTER_MENU: &[&str] = &[
    "1 - Signed contracts",
    "2 - Contracts not signed yet",
    "3 - Contracts not fully paid",
    "4 - All your contracts",
];

/// Sales menu loop
pub async fn start(state: &AppState, auth: &AuthContext) -> anyhow::Result<()> {
    loop {
        views::clear_screen();
        views::show_menu(&auth.full_name, MAIN_MENU);

        match views::menu_choice(MAIN_MENU.len()) {
            1 => create_new_client(state, auth).await,
            2 => update_client(state, auth).await,
            3 => modify_contract(state, auth).await,
            4 => filter_contracts(state, auth).await,
            5 => create_event(state, auth).await,
            6 => show_all_clients(state, auth).await,
            7 => show_all_contracts(state, auth).await,
            8 => show_all_events(state, auth).await,
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

// ============================== 1 - Create a new client ==============================

async fn create_new_client(state: &AppState, auth: &AuthContext) {
    views::display_info_message("Adding a new client...");

    let input = NewClient {
        full_name: views::prompt_nonempty("Full name"),
        email: views::prompt_nonempty("Email"),
        phone: views::prompt_nonempty("Phone"),
        company_name: views::prompt_nonempty("Company name"),
    };

    match clients::create(&state.db, auth, input).await {
        Ok(client) => {
            render::display_client_details(&client);
            views::display_info_message(&format!(
                "Client {} created successfully",
                client.full_name
            ));
        }
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 2 - Update one of your clients ==============================

async fn update_client(state: &AppState, auth: &AuthContext) {
    let mine = match clients::list_mine(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if mine.is_empty() {
        views::display_info_message("No clients assigned to you");
        return;
    }

    render::display_list_of_clients(&mine);
    let Some(index) = views::select_record(mine.len(), "client") else {
        views::display_warning_message("Modification cancelled");
        return;
    };
    let selected = &mine[index];
    render::display_client_details(selected);

    let changes = ClientChanges {
        full_name: views::prompt_optional("New full name"),
        email: views::prompt_optional("New email"),
        phone: views::prompt_optional("New phone"),
        company_name: views::prompt_optional("New company name"),
    };

    if changes.is_empty() {
        views::display_info_message("No modifications were made");
        return;
    }

    match clients::update(&state.db, auth, selected.id, changes).await {
        Ok(updated) => {
            render::display_client_details(&updated);
            views::display_info_message("Client updated successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 3 - Modify a contract ==============================

async fn modify_contract(state: &AppState, auth: &AuthContext) {
    let mine = match contracts::list_mine(&state.db, auth, None).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if mine.is_empty() {
        views::display_info_message("None of your clients has a contract yet");
        return;
    }

    render::display_list_of_contracts(&mine);
    let Some(index) = views::select_record(mine.len(), "contract") else {
        views::display_warning_message("Modification cancelled");
        return;
    };
    let selected = &mine[index];
    render::display_contract_details(selected);

    let changes = ContractChanges {
        total_amount_cents: views::prompt_optional_amount("New total amount"),
        amount_remaining_cents: views::prompt_optional_amount("New amount remaining"),
        status: views::prompt_optional_status("New status"),
    };

    if changes.is_empty() {
        views::display_info_message("No modifications were made");
        return;
    }

    match contracts::update(&state.db, auth, selected.id, changes).await {
        Ok(updated) => {
            render::display_contract_details(&updated);
            views::display_info_message("The contract has been modified successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 4 - Filter your contracts ==============================

async fn filter_contracts(state: &AppState, auth: &AuthContext) {
    views::show_menu(&auth.full_name, FILTER_MENU);

    let filter = match views::menu_choice(FILTER_MENU.len()) {
        1 => Some(ContractFilter::Signed),
        2 => Some(ContractFilter::NotSigned),
        3 => Some(ContractFilter::Unpaid),
        _ => None,
    };

    match contracts::list_mine(&state.db, auth, filter).await {
        Ok(list) if list.is_empty() => {
            views::display_info_message("No contracts match this filter")
        }
        Ok(list) => render::display_list_of_contracts(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 5 - Create an event ==============================

async fn create_event(state: &AppState, auth: &AuthContext) {
    let signed = match contracts::list_mine(&state.db, auth, Some(ContractFilter::Signed)).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if signed.is_empty() {
        views::display_info_message(
            "You have no signed contracts; a contract must be signed before an event is created",
        );
        return;
    }

    render::display_list_of_contracts(&signed);
    let Some(index) = views::select_record(signed.len(), "contract") else {
        views::display_warning_message("Event creation cancelled");
        return;
    };

    let input = NewEvent {
        contract_id: signed[index].id,
        name: views::prompt_nonempty("Event name"),
        client_contact: views::prompt_optional("Client contact"),
        start_date: views::prompt_datetime("Start date"),
        end_date: views::prompt_datetime("End date"),
        location: views::prompt_nonempty("Location"),
        attendees: views::prompt_count("Attendees"),
        notes: views::prompt_optional("Notes"),
    };

    match events::create(&state.db, auth, input).await {
        Ok(event) => {
            render::display_event_details(&event);
            views::display_info_message("Event created successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 6/7/8 - Listings ==============================

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
