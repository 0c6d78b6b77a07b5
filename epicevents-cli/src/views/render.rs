/// Entity rendering: numbered tables and detail blocks
///
/// Lists print a 1-based row number so [`super::select_record`] can map the
/// user's pick back to the record.

use epicevents_core::models::{Client, Collaborator, Contract, Event};

/// Formats cents as a decimal amount, e.g. `1250.50`
pub fn format_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Numbered collaborator table
pub fn display_list_of_collaborators(collaborators: &[Collaborator]) {
    println!(
        "{:>3}  {:<15} {:<28} {:<22} {:<12} {}",
        "#", "Username", "Email", "Name", "Role", "Employee no."
    );
    for (i, c) in collaborators.iter().enumerate() {
        println!(
            "{:>3}  {:<15} {:<28} {:<22} {:<12} {}",
            i + 1,
            c.username,
            c.email,
            c.full_name(),
            c.role.as_str(),
            c.employee_number
        );
    }
}

/// Collaborator detail block
pub fn display_collaborator_details(collaborator: &Collaborator) {
    println!();
    println!("Username:        {}", collaborator.username);
    println!("Name:            {}", collaborator.full_name());
    println!("Email:           {}", collaborator.email);
    println!("Employee number: {}", collaborator.employee_number);
    println!("Role:            {}", collaborator.role);
}

/// Numbered client table
pub fn display_list_of_clients(clients: &[Client]) {
    println!(
        "{:>3}  {:<22} {:<28} {:<18} {}",
        "#", "Full name", "Email", "Phone", "Company"
    );
    for (i, c) in clients.iter().enumerate() {
        println!(
            "{:>3}  {:<22} {:<28} {:<18} {}",
            i + 1,
            c.full_name,
            c.email,
            c.phone,
            c.company_name
        );
    }
}

/// Client detail block
pub fn display_client_details(client: &Client) {
    println!();
    println!("Full name:    {}", client.full_name);
    println!("Email:        {}", client.email);
    println!("Phone:        {}", client.phone);
    println!("Company:      {}", client.company_name);
    println!(
        "Last updated: {}",
        client.updated_at.format("%Y-%m-%d %H:%M")
    );
}

/// Numbered contract table
pub fn display_list_of_contracts(contracts: &[Contract]) {
    println!(
        "{:>3}  {:<10} {:>12} {:>12} {:<12} {}",
        "#", "Ref", "Total", "Remaining", "Status", "Created"
    );
    for (i, c) in contracts.iter().enumerate() {
        println!(
            "{:>3}  {:<10} {:>12} {:>12} {:<12} {}",
            i + 1,
            short_id(&c.id),
            format_amount(c.total_amount_cents),
            format_amount(c.amount_remaining_cents),
            c.status.as_str(),
            c.created_at.format("%Y-%m-%d")
        );
    }
}

/// Contract detail block
pub fn display_contract_details(contract: &Contract) {
    println!();
    println!("Reference:        {}", contract.id);
    println!(
        "Total amount:     {}",
        format_amount(contract.total_amount_cents)
    );
    println!(
        "Amount remaining: {}",
        format_amount(contract.amount_remaining_cents)
    );
    println!("Status:           {}", contract.status);
    println!(
        "Created:          {}",
        contract.created_at.format("%Y-%m-%d %H:%M")
    );
}

/// Numbered event table
pub fn display_list_of_events(events: &[Event]) {
    println!(
        "{:>3}  {:<20} {:<20} {:<16} {:<16} {:<20} {:>9}  {}",
        "#", "Event", "Client", "Start", "End", "Location", "Attendees", "Support"
    );
    for (i, e) in events.iter().enumerate() {
        let support = match &e.support_contact_id {
            Some(id) => short_id(id),
            None => "-".to_string(),
        };
        println!(
            "{:>3}  {:<20} {:<20} {:<16} {:<16} {:<20} {:>9}  {}",
            i + 1,
            e.name,
            e.client_name,
            e.start_date.format("%Y-%m-%d %H:%M").to_string(),
            e.end_date.format("%Y-%m-%d %H:%M").to_string(),
            e.location,
            e.attendees,
            support
        );
    }
}

/// Event detail block
pub fn display_event_details(event: &Event) {
    println!();
    println!("Event:          {}", event.name);
    println!("Client:         {}", event.client_name);
    println!(
        "Client contact: {}",
        event.client_contact.as_deref().unwrap_or("-")
    );
    println!(
        "Start:          {}",
        event.start_date.format("%Y-%m-%d %H:%M")
    );
    println!("End:            {}", event.end_date.format("%Y-%m-%d %H:%M"));
    println!("Location:       {}", event.location);
    println!("Attendees:      {}", event.attendees);
    println!("Notes:          {}", event.notes.as_deref().unwrap_or("-"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(125_050), "1250.50");
        assert_eq!(format_amount(125_000), "1250.00");
        assert_eq!(format_amount(7), "0.07");
        assert_eq!(format_amount(0), "0.00");
    }

    #[test]
    fn test_short_id_is_eight_chars() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(short_id(&id).len(), 8);
    }
}
