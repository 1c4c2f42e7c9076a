//! Command workflows
//!
//! The workflows behind each `kac` subcommand, kept apart from clap so they can
//! be called programmatically (and from tests) with an injected clock.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::boundary::{self, BoundaryWarning};
use crate::changelog::Changelog;
use crate::clock::Clock;
use crate::domain::VersionNumber;
use crate::git::{self, Repository};
use crate::storage;
use crate::template::{self, TemplateParams};
use crate::ui;

const FALLBACK_PROJECT_URL: &str = "https://github.com/OWNER/REPOSITORY";

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// CHANGELOG to bump
    pub path: PathBuf,

    /// Target version; prompts with the candidates when absent
    pub to: Option<VersionNumber>,

    pub prerelease_token: String,
    pub build_token: String,

    /// Skip confirmation prompts
    pub yes: bool,

    /// Preview mode - don't write the file
    pub dry_run: bool,

    /// Bump even when Unreleased is empty
    pub allow_empty: bool,
}

/// Result of a bump workflow that went through
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub previous: Option<VersionNumber>,
    pub version: VersionNumber,
    /// The file was rewritten (false in dry-run mode)
    pub written: bool,
    pub changelog: Changelog,
}

/// Bump a CHANGELOG file.
///
/// 1. Load and parse the file
/// 2. Pick the target version (argument or interactive selection)
/// 3. Report boundary warnings; refuse an already released version, and an
///    empty Unreleased section unless allowed
/// 4. Confirm, bump and write the file
///
/// # Returns
/// * `Ok(Some(outcome))` - The bump happened (or was previewed)
/// * `Ok(None)` - The user cancelled
/// * `Err` - Load, parse, bump or write failure
pub fn run_bump_workflow(args: &BumpWorkflowArgs, clock: &dyn Clock) -> Result<Option<BumpOutcome>> {
    let changelog = Changelog::load(&args.path)?;
    let previous = changelog.latest_version().cloned();

    let version = match &args.to {
        Some(version) => version.clone(),
        None => {
            let current = previous
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("CHANGELOG has no releases yet; pass --to VERSION"))?;
            let candidates = changelog.next_versions(&args.prerelease_token, &args.build_token)?;
            ui::select_version(&candidates, current)?
        }
    };

    let warnings = boundary::check_bump(&changelog, &version);
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
    if warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::VersionAlreadyReleased { .. }))
    {
        return Err(anyhow::anyhow!(
            "{} is already released; pick a new version",
            version.format(true)
        ));
    }
    if warnings.contains(&BoundaryWarning::NoUnreleasedChanges) && !args.allow_empty {
        return Err(anyhow::anyhow!(
            "Nothing to release; add entries under ## [Unreleased] or pass --allow-empty"
        ));
    }

    ui::display_proposed_version(
        previous.as_ref().map(|v| v.format(true)).as_deref(),
        &version.format(true),
    );

    let prompt = format!("Bump Changelog to {}?", version.format(true));
    if !args.yes && !args.dry_run && !ui::confirm_action(&prompt)? {
        return Ok(None);
    }

    let bumped = changelog.bumped(&version, clock.today())?;

    if !args.dry_run {
        storage::write_all(&args.path, &bumped.text())
            .with_context(|| format!("Failed to write {}", args.path.display()))?;
    }

    Ok(Some(BumpOutcome {
        previous,
        version,
        written: !args.dry_run,
        changelog: bumped,
    }))
}

/// Release notes for `version` (latest release when `None`)
pub fn run_copy_workflow(path: &Path, version: Option<&VersionNumber>) -> Result<(VersionNumber, String)> {
    let changelog = Changelog::load(path)?;
    let release = changelog.release_or_latest(version)?;
    Ok((release.version.clone(), release.change_text()))
}

/// Arguments for the init workflow
#[derive(Debug, Clone, PartialEq)]
pub struct InitWorkflowArgs {
    pub path: PathBuf,
    pub version: VersionNumber,
    /// Project URL; discovered from git remotes when absent
    pub url: Option<String>,
    /// Overwrite an existing file
    pub force: bool,
    /// Never prompt
    pub yes: bool,
}

/// Create a new CHANGELOG from the template. Returns the project URL used.
pub fn run_init_workflow(
    args: &InitWorkflowArgs,
    clock: &dyn Clock,
    repo: Option<&dyn Repository>,
) -> Result<String> {
    let url = match &args.url {
        Some(url) => url.clone(),
        None => match repo.map(|r| git::project_url(r)).transpose()?.flatten() {
            Some(url) => url,
            None if args.yes => {
                ui::display_boundary_warning(&BoundaryWarning::NoGitRemote {
                    fallback_url: FALLBACK_PROJECT_URL.to_string(),
                });
                FALLBACK_PROJECT_URL.to_string()
            }
            None => ui::prompt_text("Project URL", FALLBACK_PROJECT_URL)?,
        },
    };

    let text = template::render(&TemplateParams {
        version: args.version.clone(),
        release_date: clock.today(),
        project_url: url.clone(),
    });
    storage::create(&args.path, &text, args.force)
        .with_context(|| format!("Failed to create {}", args.path.display()))?;
    Ok(url)
}
