//! User input utilities for interactive CLI prompts

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, Write};

use crate::app::services::project_discovery::ProjectFiles;

/// Print the discovered work orders and which sides each one has
pub fn print_project_listing(projects: &[ProjectFiles]) {
    println!("{}", "Work orders found:".bright_green().bold());
    println!();

    for (i, project) in projects.iter().enumerate() {
        let sides = format!("({})", project.sides_label());
        println!(
            "  {}. {} {}",
            (i + 1).to_string().bright_yellow().bold(),
            project.report_id.bright_cyan(),
            if project.is_complete() {
                sides.bright_black()
            } else {
                sides.yellow()
            }
        );
    }

    println!();
}

/// Get user confirmation for an action
///
/// An empty answer takes `default_yes`; end of input always declines.
pub fn prompt_confirmation(message: &str, default_yes: bool) -> Result<bool> {
    let stdin = io::stdin();
    confirm_from(&mut stdin.lock(), message, default_yes)
}

fn confirm_from(reader: &mut impl BufRead, message: &str, default_yes: bool) -> Result<bool> {
    let default_text = if default_yes { "S/n" } else { "s/N" };

    loop {
        print!("{} [{}]: ", message.bright_white(), default_text);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = reader
            .read_line(&mut input)
            .context("Failed to read user input")?;
        // End of input declines whatever the default
        if read == 0 {
            return Ok(false);
        }

        match input.trim().to_lowercase().as_str() {
            "" => return Ok(default_yes),
            "s" | "si" | "sí" | "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter 's' for yes or 'n' for no."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_answers() {
        assert!(confirm_from(&mut Cursor::new("s\n"), "Continue?", false).unwrap());
        assert!(confirm_from(&mut Cursor::new("yes\n"), "Continue?", false).unwrap());
        assert!(!confirm_from(&mut Cursor::new("N\n"), "Continue?", true).unwrap());
    }

    #[test]
    fn test_confirm_defaults_on_empty_input() {
        assert!(confirm_from(&mut Cursor::new("\n"), "Continue?", true).unwrap());
        assert!(!confirm_from(&mut Cursor::new("\n"), "Continue?", false).unwrap());
    }

    #[test]
    fn test_confirm_declines_on_end_of_input() {
        assert!(!confirm_from(&mut Cursor::new(""), "Continue?", true).unwrap());
        assert!(!confirm_from(&mut Cursor::new(""), "Continue?", false).unwrap());
        assert!(!confirm_from(&mut Cursor::new("quizas\n"), "Continue?", true).unwrap());
    }

    #[test]
    fn test_confirm_asks_again_on_unknown_answer() {
        assert!(!confirm_from(&mut Cursor::new("quizas\nno\n"), "Continue?", true).unwrap());
    }
}
