/// Management menu: collaborators, contracts, and event assignment
///
/// Management holds `manage_collaborators` and `manage_contracts`, so this
/// controller carries the collaborator CRUD submenu, the contract submenu,
/// the unassigned-events report, and support assignment.

use epicevents_core::auth::session::AuthContext;
use epicevents_core::models::{ContractFilter, Role};
use epicevents_core::services::collaborators::{CollaboratorChanges, RegisterCollaborator};
use epicevents_core::services::contracts::{ContractChanges, NewContract};
use epicevents_core::services::{clients, collaborators, contracts, events};

use super::{ask_continue, exit_message, report_error};
use crate::app::AppState;
use crate::views::{self, render};

const MAIN_MENU: &[&str] = &[
    "1 - Create, update, and delete collaborators",
    "2 - Create and modify contracts",
    "3 - Show events without an assigned support contact",
    "4 - Assign or change the support contact of an event",
    "5 - View the list of all clients",
    "6 - View the list of all contracts",
    "7 - View the list of all events",
    "8 - Exit the CRM system",
];

const COLLABORATOR_MENU: &[&str] = &[
    "1 - Create a collaborator",
    "2 - Update a collaborator",
    "3 - Delete a collaborator",
    "4 - Return to main menu",
];

const CONTRACT_MENU: &[&str] = &[
    "1 - Create a contract",
    "2 - Modify a contract",
    "3 - Sign a contract",
    "4 - Delete a contract",
    "5 - Return to main menu",
];

/// Management menu loop
pub async fn start(state: &AppState, auth: &AuthContext) -> anyhow::Result<()> {
    loop {
        views::clear_screen();
        views::show_menu(&auth.full_name, MAIN_MENU);

        match views::menu_choice(MAIN_MENU.len()) {
            1 => manage_collaborators(state, auth).await,
            2 => manage_contracts(state, auth).await,
            3 => show_unassigned_events(state, auth).await,
            4 => assign_support_contact(state, auth).await,
            5 => show_all_clients(state, auth).await,
            6 => show_all_contracts(state, auth).await,
            7 => show_all_events(state, auth).await,
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

// ============================== 1 - Manage collaborators ==============================

async fn manage_collaborators(state: &AppState, auth: &AuthContext) {
    views::clear_screen();
    views::show_menu(&auth.full_name, COLLABORATOR_MENU);

    match views::menu_choice(COLLABORATOR_MENU.len()) {
        1 => create_collaborator(state, auth).await,
        2 => update_collaborator(state, auth).await,
        3 => delete_collaborator(state, auth).await,
        _ => {}
    }
}

async fn create_collaborator(state: &AppState, auth: &AuthContext) {
    views::display_info_message("Registering a new collaborator...");

    loop {
        let input = RegisterCollaborator {
            username: views::prompt_nonempty("Username"),
            email: views::prompt_nonempty("Email"),
            password: views::prompt_nonempty("Password"),
            first_name: views::prompt_nonempty("First name"),
            last_name: views::prompt_nonempty("Last name"),
            employee_number: views::prompt_nonempty("Employee number"),
            role: prompt_role(),
        };

        match collaborators::register(&state.db, auth, input).await {
            Ok(collaborator) => {
                render::display_collaborator_details(&collaborator);
                views::display_info_message("Collaborator registered successfully!");
                return;
            }
            Err(err) => {
                report_error(state, auth, &err);
                if err.is_permission_denied() || !views::confirm("Do you want to try again?") {
                    return;
                }
            }
        }
    }
}

async fn update_collaborator(state: &AppState, auth: &AuthContext) {
    let list = match collaborators::list(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if list.is_empty() {
        views::display_info_message("There are no collaborators to display");
        return;
    }

    render::display_list_of_collaborators(&list);
    let Some(index) = views::select_record(list.len(), "collaborator") else {
        views::display_warning_message("Modification cancelled");
        return;
    };
    let selected = &list[index];
    render::display_collaborator_details(selected);

    let changes = CollaboratorChanges {
        username: views::prompt_optional("New username"),
        email: views::prompt_optional("New email"),
        password: views::prompt_optional("New password"),
        first_name: views::prompt_optional("New first name"),
        last_name: views::prompt_optional("New last name"),
        employee_number: views::prompt_optional("New employee number"),
        role: prompt_optional_role(),
    };

    if changes.is_empty() {
        views::display_info_message("No modifications were made");
        return;
    }

    match collaborators::update(&state.db, auth, selected.id, changes).await {
        Ok(updated) => {
            render::display_collaborator_details(&updated);
            views::display_info_message("The collaborator has been modified successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

async fn delete_collaborator(state: &AppState, auth: &AuthContext) {
    let list = match collaborators::list(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if list.is_empty() {
        views::display_info_message("There are no collaborators to display");
        return;
    }

    render::display_list_of_collaborators(&list);
    let Some(index) = views::select_record(list.len(), "collaborator") else {
        views::display_warning_message("Deletion cancelled");
        return;
    };
    let selected = &list[index];

    let question = format!(
        "Are you sure you want to delete {}? This cannot be undone",
        selected.username
    );
    if !views::confirm(&question) {
        views::display_warning_message("Deletion cancelled");
        return;
    }

    match collaborators::remove(&state.db, auth, selected.id).await {
        Ok(()) => views::display_info_message("The collaborator has been deleted"),
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 2 - Manage contracts ==============================

async fn manage_contracts(state: &AppState, auth: &AuthContext) {
    views::clear_screen();
    views::show_menu(&auth.full_name, CONTRACT_MENU);

    match views::menu_choice(CONTRACT_MENU.len()) {
        1 => create_contract(state, auth).await,
        2 => modify_contract(state, auth).await,
        3 => sign_contract(state, auth).await,
        4 => delete_contract(state, auth).await,
        _ => {}
    }
}

async fn create_contract(state: &AppState, auth: &AuthContext) {
    let client_list = match clients::list(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if client_list.is_empty() {
        views::display_info_message("There are no clients yet; a contract needs a client");
        return;
    }

    render::display_list_of_clients(&client_list);
    let Some(index) = views::select_record(client_list.len(), "client") else {
        views::display_warning_message("Contract creation cancelled");
        return;
    };

    let input = NewContract {
        client_id: client_list[index].id,
        total_amount_cents: views::prompt_amount("Total amount"),
        amount_remaining_cents: views::prompt_amount("Amount remaining"),
        signed: views::confirm("Is the contract already signed?"),
    };

    match contracts::create(&state.db, auth, input).await {
        Ok(contract) => {
            render::display_contract_details(&contract);
            views::display_info_message("Contract created successfully");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

async fn modify_contract(state: &AppState, auth: &AuthContext) {
    let list = match contracts::list(&state.db, auth, None).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if list.is_empty() {
        views::display_info_message("There are no contracts to display");
        return;
    }

    render::display_list_of_contracts(&list);
    let Some(index) = views::select_record(list.len(), "contract") else {
        views::display_warning_message("Modification cancelled");
        return;
    };
    let selected = &list[index];
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

async fn sign_contract(state: &AppState, auth: &AuthContext) {
    let unsigned = match contracts::list(&state.db, auth, Some(ContractFilter::NotSigned)).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if unsigned.is_empty() {
        views::display_info_message("Every contract is already signed");
        return;
    }

    render::display_list_of_contracts(&unsigned);
    let Some(index) = views::select_record(unsigned.len(), "contract") else {
        views::display_warning_message("Signing cancelled");
        return;
    };

    match contracts::sign(&state.db, auth, unsigned[index].id).await {
        Ok(signed) => {
            render::display_contract_details(&signed);
            views::display_info_message("The contract has been signed");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

async fn delete_contract(state: &AppState, auth: &AuthContext) {
    let list = match contracts::list(&state.db, auth, None).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if list.is_empty() {
        views::display_info_message("There are no contracts to display");
        return;
    }

    render::display_list_of_contracts(&list);
    let Some(index) = views::select_record(list.len(), "contract") else {
        views::display_warning_message("Deletion cancelled");
        return;
    };

    if !views::confirm("Are you sure? The contract and its events will be deleted") {
        views::display_warning_message("Deletion cancelled");
        return;
    }

    match contracts::remove(&state.db, auth, list[index].id).await {
        Ok(()) => views::display_info_message("The contract has been deleted"),
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 3/4 - Events ==============================

async fn show_unassigned_events(state: &AppState, auth: &AuthContext) {
    match events::list_unassigned(&state.db, auth).await {
        Ok(list) if list.is_empty() => {
            views::display_info_message("Every event has a support contact assigned")
        }
        Ok(list) => render::display_list_of_events(&list),
        Err(err) => report_error(state, auth, &err),
    }
}

async fn assign_support_contact(state: &AppState, auth: &AuthContext) {
    let event_list = match events::list(&state.db, auth).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if event_list.is_empty() {
        views::display_info_message("There are no events to display");
        return;
    }

    render::display_list_of_events(&event_list);
    let Some(event_index) = views::select_record(event_list.len(), "event") else {
        views::display_warning_message("Assignment cancelled");
        return;
    };

    let supports = match collaborators::list_by_role(&state.db, auth, Role::Support).await {
        Ok(list) => list,
        Err(err) => {
            report_error(state, auth, &err);
            return;
        }
    };
    if supports.is_empty() {
        views::display_info_message("There are no support collaborators to assign");
        return;
    }

    render::display_list_of_collaborators(&supports);
    let Some(support_index) = views::select_record(supports.len(), "support collaborator") else {
        views::display_warning_message("Assignment cancelled");
        return;
    };

    match events::assign_support(
        &state.db,
        auth,
        event_list[event_index].id,
        supports[support_index].id,
    )
    .await
    {
        Ok(event) => {
            render::display_event_details(&event);
            views::display_info_message("The support contact has been assigned");
        }
        Err(err) => report_error(state, auth, &err),
    }
}

// ============================== 5/6/7 - Listings ==============================

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

fn prompt_role() -> Role {
    views::prompt_parse::<Role>(
        "Role (management/sales/support)",
        "one of management, sales, support",
    )
}

fn prompt_optional_role() -> Option<Role> {
    loop {
        match views::prompt_optional("New role (management/sales/support)") {
            None => return None,
            Some(text) => match text.parse() {
                Ok(role) => return Some(role),
                Err(message) => views::display_error_message(&message),
            },
        }
    }
}
