use std::fmt;

use chrono::NaiveDate;

use crate::domain::changes::ChangeSet;
use crate::domain::version::VersionNumber;

/// A published release section (`## [0.3.0] - 2020-04-05`)
///
/// Equality is structural: version, date, yanked flag and every change entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: VersionNumber,
    pub release_date: NaiveDate,
    /// Heading carried a `[YANKED]` marker
    pub yanked: bool,
    pub changes: ChangeSet,
}

impl Release {
    pub fn new(version: VersionNumber, release_date: NaiveDate, changes: ChangeSet) -> Self {
        Release {
            version,
            release_date,
            yanked: false,
            changes,
        }
    }

    /// Heading line without trailing newline
    pub fn heading(&self) -> String {
        let mut heading = format!("## [{}] - {}", self.version, self.release_date);
        if self.yanked {
            heading.push_str(" [YANKED]");
        }
        heading
    }

    /// Release notes text: the change blocks without trailing whitespace
    pub fn change_text(&self) -> String {
        self.changes.to_text().trim_end().to_string()
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.version.format(true), self.release_date)
    }
}

/// Pending changes under `## [Unreleased]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unreleased {
    pub changes: ChangeSet,
}

impl Unreleased {
    pub fn new(changes: ChangeSet) -> Self {
        Unreleased { changes }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Turn the pending changes into a dated release
    pub fn release(self, version: VersionNumber, release_date: NaiveDate) -> Release {
        Release::new(version, release_date, self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::changes::ChangeCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_release_display() {
        let r = Release::new(VersionNumber::new(0, 3, 0), date(2021, 2, 11), ChangeSet::new());
        assert_eq!(r.to_string(), "v0.3.0 - 2021-02-11");
        assert_eq!(r.heading(), "## [0.3.0] - 2021-02-11");
    }

    #[test]
    fn test_yanked_heading() {
        let mut r = Release::new(VersionNumber::new(1, 0, 1), date(2021, 3, 1), ChangeSet::new());
        r.yanked = true;
        assert_eq!(r.heading(), "## [1.0.1] - 2021-03-01 [YANKED]");
    }

    #[test]
    fn test_equality_is_structural() {
        let base = Release::new(
            VersionNumber::new(0, 3, 0),
            date(2021, 2, 11),
            ChangeSet::new().with(ChangeCategory::Added, "Added something"),
        );
        let same = base.clone();
        let different_changes = Release::new(
            VersionNumber::new(0, 3, 0),
            date(2021, 2, 11),
            ChangeSet::new().with(ChangeCategory::Changed, "Changed A"),
        );
        assert_eq!(base, same);
        assert_ne!(base, different_changes);
    }

    #[test]
    fn test_change_text() {
        let r = Release::new(
            VersionNumber::new(0, 3, 0),
            date(2020, 4, 5),
            ChangeSet::new()
                .with(ChangeCategory::Added, "A")
                .with(ChangeCategory::Fixed, "B"),
        );
        assert_eq!(r.change_text(), "### Added\n- A\n\n### Fixed\n- B");
    }

    #[test]
    fn test_unreleased_has_changes() {
        assert!(!Unreleased::default().has_changes());
        let u = Unreleased::new(ChangeSet::new().with(ChangeCategory::Added, "Add A"));
        assert!(u.has_changes());
    }

    #[test]
    fn test_unreleased_into_release() {
        let changes = ChangeSet::new().with(ChangeCategory::Removed, "Old flag");
        let release = Unreleased::new(changes.clone()).release(VersionNumber::new(2, 0, 0), date(2022, 1, 1));
        assert_eq!(release.changes, changes);
        assert_eq!(release.version, VersionNumber::new(2, 0, 0));
        assert!(!release.yanked);
    }
}
