use std::cmp::Ordering;
use std::fmt;

use crate::changelog::Changelog;
use crate::domain::VersionNumber;

/// Warnings about a requested bump that are reported to the user.
/// The core bump still works in all of these cases; the CLI decides whether to go on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The Unreleased section has no entries
    NoUnreleasedChanges,
    /// The target version already has a release section
    VersionAlreadyReleased { version: String },
    /// The target version does not have higher precedence than the latest release
    VersionNotNewer { version: String, latest: String },
    /// No git remote to derive the project URL from
    NoGitRemote { fallback_url: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoUnreleasedChanges => {
                write!(f, "The Unreleased section has no changes")
            }
            BoundaryWarning::VersionAlreadyReleased { version } => {
                write!(f, "Version v{} already has a release section", version)
            }
            BoundaryWarning::VersionNotNewer { version, latest } => {
                write!(
                    f,
                    "Version v{} is not newer than the latest release v{}",
                    version, latest
                )
            }
            BoundaryWarning::NoGitRemote { fallback_url } => {
                write!(f, "No git remote found, using '{}' for links", fallback_url)
            }
        }
    }
}

/// Collect the warnings for bumping `changelog` to `version`
pub fn check_bump(changelog: &Changelog, version: &VersionNumber) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if !changelog.unreleased().has_changes() {
        warnings.push(BoundaryWarning::NoUnreleasedChanges);
    }

    if changelog.find_release(version).is_some() {
        warnings.push(BoundaryWarning::VersionAlreadyReleased {
            version: version.to_string(),
        });
    } else if let Some(latest) = changelog.latest_version() {
        // Unknown precedence (odd identifiers) is not worth a warning
        if matches!(
            version.precedence_cmp(latest),
            Some(Ordering::Less | Ordering::Equal)
        ) {
            warnings.push(BoundaryWarning::VersionNotNewer {
                version: version.to_string(),
                latest: latest.to_string(),
            });
        }
    }

    warnings
}
