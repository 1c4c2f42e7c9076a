//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use anyhow::Result;

use crate::domain::{VersionCandidate, VersionNumber};

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_proposed_version, display_releases,
    display_status, display_success,
};

fn read_line() -> Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Resolve a 1-based menu selection. Empty input selects the first entry.
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let index = if input.is_empty() {
        1
    } else {
        input.parse::<usize>().unwrap_or(0)
    };

    if index > 0 && index <= count {
        Ok(index - 1)
    } else {
        Err(anyhow::anyhow!("Invalid selection '{}'", input))
    }
}

/// Prompts user to select the next version from the candidates.
///
/// Displays a numbered list and accepts a 1-based index. Default selection is
/// the first candidate (the patch bump) if the user presses Enter.
///
/// # Arguments
/// * `candidates` - Candidate versions in display order
/// * `current` - The latest released version, shown in the prompt
///
/// # Returns
/// * `Ok(VersionNumber)` - The selected version
/// * `Err` - If selection is invalid or input fails
pub fn select_version(
    candidates: &[VersionCandidate],
    current: &VersionNumber,
) -> Result<VersionNumber> {
    if candidates.is_empty() {
        return Err(anyhow::anyhow!("No versions to choose from"));
    }

    println!(
        "\n{}",
        console::style(format!(
            "Please select a new version (currently {}):",
            current.format(true)
        ))
        .bold()
    );
    for (i, candidate) in candidates.iter().enumerate() {
        println!("  {}. {}", i + 1, formatter::format_candidate(candidate));
    }

    print!("\nSelect a version (1-{}) [default: 1]: ", candidates.len());
    io::stdout().flush()?;

    let index = parse_selection(&read_line()?, candidates.len())?;
    Ok(candidates[index].version.clone())
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation. Default is "no".
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let response = read_line()?.to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Prompts for a free-text value, returning `default` on empty input.
pub fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", prompt, default);
    io::stdout().flush()?;

    let input = read_line()?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}
