/// Terminal prompts and messages
///
/// Colored output and screen clearing via crossterm; input is plain
/// line-oriented stdin. Parse helpers for amounts and timestamps live here
/// so the controllers stay thin.

use chrono::{DateTime, NaiveDateTime, Utc};
use crossterm::style::Stylize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::str::FromStr;

pub mod render;

/// Clears the terminal and moves the cursor home
pub fn clear_screen() {
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

/// Green informational message
pub fn display_info_message(message: &str) {
    println!("{}", message.green());
}

/// Yellow warning message
pub fn display_warning_message(message: &str) {
    println!("{}", message.yellow());
}

/// Red error message
pub fn display_error_message(message: &str) {
    println!("{}", message.red());
}

/// Shows a numbered menu addressed to the collaborator
pub fn show_menu(name: &str, options: &[&str]) {
    println!();
    println!("{}", format!("Hi {name}! What do you want to do?").bold());
    for option in options {
        println!("  {option}");
    }
}

/// Reads one trimmed line after a label
pub fn prompt(label: &str) -> String {
    print!("{label}: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Prompts until a non-empty value is entered
pub fn prompt_nonempty(label: &str) -> String {
    loop {
        let value = prompt(label);
        if !value.is_empty() {
            return value;
        }
        display_error_message("A value is required");
    }
}

/// Prompts for an optional value; empty input means "keep/skip"
pub fn prompt_optional(label: &str) -> Option<String> {
    let value = prompt(&format!("{label} (leave blank to skip)"));
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Yes/no confirmation
pub fn confirm(question: &str) -> bool {
    loop {
        let answer = prompt(&format!("{question} [y/n]")).to_ascii_lowercase();
        match answer.as_str() {
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => display_error_message("Please answer y or n"),
        }
    }
}

/// Prompts for a menu option between 1 and `limit`
pub fn menu_choice(limit: usize) -> usize {
    loop {
        let input = prompt("Choose an option");
        match input.parse::<usize>() {
            Ok(n) if (1..=limit).contains(&n) => return n,
            _ => display_error_message(&format!("Please enter a number between 1 and {limit}")),
        }
    }
}

/// Prompts for a record from a numbered list; blank input cancels
///
/// Returns the zero-based index into the rendered list.
pub fn select_record(count: usize, noun: &str) -> Option<usize> {
    if count == 0 {
        return None;
    }

    loop {
        let input = prompt(&format!("Select a {noun} by number (blank to cancel)"));
        if input.is_empty() {
            return None;
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Some(n - 1),
            _ => display_error_message(&format!("Please enter a number between 1 and {count}")),
        }
    }
}

/// Prompts until the input parses as `T`
pub fn prompt_parse<T: FromStr>(label: &str, expected: &str) -> T {
    loop {
        let input = prompt(label);
        match input.parse::<T>() {
            Ok(value) => return value,
            Err(_) => display_error_message(&format!("Please enter {expected}")),
        }
    }
}

/// Prompts for a monetary amount, returned in cents
pub fn prompt_amount(label: &str) -> i64 {
    loop {
        let input = prompt(&format!("{label} (e.g. 1250.00)"));
        match parse_amount_cents(&input) {
            Ok(cents) => return cents,
            Err(message) => display_error_message(&message),
        }
    }
}

/// Prompts for a timestamp in `YYYY-MM-DD HH:MM`
pub fn prompt_datetime(label: &str) -> DateTime<Utc> {
    loop {
        let input = prompt(&format!("{label} (YYYY-MM-DD HH:MM)"));
        match parse_datetime(&input) {
            Ok(value) => return value,
            Err(message) => display_error_message(&message),
        }
    }
}

/// Prompts for a non-negative whole number (attendee counts)
pub fn prompt_count(label: &str) -> i32 {
    loop {
        let input = prompt(label);
        match input.parse::<i32>() {
            Ok(n) if n >= 0 => return n,
            _ => display_error_message("Please enter a non-negative whole number"),
        }
    }
}

/// Optional variant of [`prompt_amount`]; blank input means "keep/skip"
pub fn prompt_optional_amount(label: &str) -> Option<i64> {
    loop {
        match prompt_optional(&format!("{label} (e.g. 1250.00)")) {
            None => return None,
            Some(input) => match parse_amount_cents(&input) {
                Ok(cents) => return Some(cents),
                Err(message) => display_error_message(&message),
            },
        }
    }
}

/// Optional variant of [`prompt_datetime`]
pub fn prompt_optional_datetime(label: &str) -> Option<DateTime<Utc>> {
    loop {
        match prompt_optional(&format!("{label} (YYYY-MM-DD HH:MM)")) {
            None => return None,
            Some(input) => match parse_datetime(&input) {
                Ok(value) => return Some(value),
                Err(message) => display_error_message(&message),
            },
        }
    }
}

/// Optional variant of [`prompt_count`]
pub fn prompt_optional_count(label: &str) -> Option<i32> {
    loop {
        match prompt_optional(label) {
            None => return None,
            Some(input) => match input.parse::<i32>() {
                Ok(n) if n >= 0 => return Some(n),
                _ => display_error_message("Please enter a non-negative whole number"),
            },
        }
    }
}

/// Optional contract status prompt
pub fn prompt_optional_status(label: &str) -> Option<epicevents_core::models::ContractStatus> {
    loop {
        match prompt_optional(&format!("{label} (signed/not_signed)")) {
            None => return None,
            Some(input) => match input.parse() {
                Ok(status) => return Some(status),
                Err(message) => display_error_message(&message),
            },
        }
    }
}

/// Parses a decimal amount ("1250", "1250.5", "1250.50") into cents
///
/// Amounts are non-negative and use at most two decimal places.
pub fn parse_amount_cents(input: &str) -> Result<i64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("An amount is required".to_string());
    }

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(format!("Invalid amount: {input}"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount: {input}"));
    }
    if frac.len() > 2 {
        return Err("Amounts use at most two decimal places".to_string());
    }

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .map_err(|_| format!("Amount is too large: {input}"))?
    };
    let whole_cents = whole_value
        .checked_mul(100)
        .ok_or_else(|| format!("Amount is too large: {input}"))?;

    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().unwrap_or(0) * 10,
        _ => frac.parse::<i64>().unwrap_or(0),
    };

    Ok(whole_cents + frac_cents)
}

/// Parses `YYYY-MM-DD HH:MM` into a UTC timestamp
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(input.trim(), "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("Invalid date/time (expected YYYY-MM-DD HH:MM): {}", input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_amount_cents_whole() {
        assert_eq!(parse_amount_cents("1250"), Ok(125_000));
        assert_eq!(parse_amount_cents("0"), Ok(0));
    }

    #[test]
    fn test_parse_amount_cents_decimals() {
        assert_eq!(parse_amount_cents("1250.50"), Ok(125_050));
        assert_eq!(parse_amount_cents("1250.5"), Ok(125_050));
        assert_eq!(parse_amount_cents("0.07"), Ok(7));
        assert_eq!(parse_amount_cents(".50"), Ok(50));
    }

    #[test]
    fn test_parse_amount_cents_rejects_garbage() {
        assert!(parse_amount_cents("").is_err());
        assert!(parse_amount_cents(".").is_err());
        assert!(parse_amount_cents("-5").is_err());
        assert!(parse_amount_cents("12,50").is_err());
        assert!(parse_amount_cents("12.505").is_err());
        assert!(parse_amount_cents("abc").is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2024-06-04 18:30").expect("should parse");
        assert_eq!(parsed.hour(), 18);
        assert_eq!(parsed.minute(), 30);

        assert!(parse_datetime("2024-06-04").is_err());
        assert!(parse_datetime("04/06/2024 18:30").is_err());
        assert!(parse_datetime("").is_err());
    }
}
