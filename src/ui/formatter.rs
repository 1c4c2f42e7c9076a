//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Release, VersionCandidate};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line of the version menu, e.g. "v0.4.0  (minor)"
pub fn format_candidate(candidate: &VersionCandidate) -> String {
    format!("{:<24}({})", candidate.key(), candidate.kind.label())
}

/// One line of the release listing, e.g. "v0.3.0  2020-04-05  4 changes"
pub fn format_release_line(release: &Release) -> String {
    let count = release.changes.len();
    let mut line = format!(
        "{:<24}{}  {} change{}",
        release.version.format(true),
        release.release_date,
        count,
        if count == 1 { "" } else { "s" }
    );
    if release.yanked {
        line.push_str("  [YANKED]");
    }
    line
}

/// Display all releases, newest first.
pub fn display_releases(releases: &[Release]) {
    println!("{}", style("Releases:").bold());
    if releases.is_empty() {
        println!("  (none)");
    }
    for release in releases {
        println!("  {}", format_release_line(release));
    }
}

/// Display the proposed version change.
///
/// # Arguments
/// * `current` - Latest released version (None before the first release)
/// * `next` - The version being proposed
pub fn display_proposed_version(current: Option<&str>, next: &str) {
    match current {
        Some(old) => {
            println!("\n{}", style("Proposed Version Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(next).green());
        }
        None => {
            println!("\n{}", style("Initial Version:").bold());
            println!("  New version: {}", style(next).green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeCategory, ChangeSet, VersionBump, VersionNumber};
    use chrono::NaiveDate;

    #[test]
    fn test_format_candidate() {
        let candidate = VersionCandidate {
            kind: VersionBump::Minor,
            version: VersionNumber::new(0, 4, 0),
        };
        let line = format_candidate(&candidate);
        assert!(line.starts_with("v0.4.0"));
        assert!(line.ends_with("(minor)"));
    }

    #[test]
    fn test_format_release_line() {
        let mut release = Release::new(
            VersionNumber::new(0, 3, 0),
            NaiveDate::from_ymd_opt(2020, 4, 5).unwrap(),
            ChangeSet::new().with(ChangeCategory::Added, "A"),
        );
        let line = format_release_line(&release);
        assert!(line.starts_with("v0.3.0"));
        assert!(line.contains("2020-04-05"));
        assert!(line.ends_with("1 change"));

        release.yanked = true;
        assert!(format_release_line(&release).ends_with("[YANKED]"));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::NoUnreleasedChanges);
        display_proposed_version(Some("v0.3.0"), "v0.4.0");
        display_proposed_version(None, "v0.1.0");
        display_releases(&[]);
    }
}
