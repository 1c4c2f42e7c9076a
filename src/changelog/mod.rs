//! In-memory CHANGELOG document.
//!
//! A [`Changelog`] keeps the raw header, body and footer text alongside the
//! structured model, so an unmodified document serializes back to exactly the
//! text it was parsed from.

mod bump;
mod parser;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{Release, Unreleased, VersionCandidate, VersionNumber};
use crate::error::{KacError, Result};
use crate::storage;

/// A parsed Keep-a-Changelog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    path: Option<PathBuf>,
    header: String,
    body: String,
    footer: String,
    unreleased: Unreleased,
    /// Newest first, in document order
    releases: Vec<Release>,
}

impl Changelog {
    pub const DEFAULT_FILE_NAME: &'static str = "CHANGELOG.md";

    /// Parse CHANGELOG text
    ///
    /// # Errors
    /// `MissingUnreleasedSection`, `MissingFooter`, `MalformedReleaseHeading`,
    /// `InvalidVersionFormat` or `UnrecognizedChangeCategory` when the text
    /// does not follow the Keep-a-Changelog layout.
    pub fn parse(text: &str) -> Result<Self> {
        let regions = parser::split_regions(text)?;
        let body = parser::parse_body(regions.body, regions.body_line)?;

        Ok(Changelog {
            path: None,
            header: regions.header.to_string(),
            body: regions.body.to_string(),
            footer: regions.footer.to_string(),
            unreleased: body.unreleased,
            releases: body.releases,
        })
    }

    /// Read and parse the CHANGELOG at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = storage::read_all(path)?;
        let mut changelog = Changelog::parse(&text)?;
        changelog.path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            releases = changelog.releases.len(),
            "loaded changelog"
        );
        Ok(changelog)
    }

    /// Path the document was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Text before the `## [Unreleased]` heading
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Text from the `## [Unreleased]` heading up to the footer
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Link reference definitions, starting at `[Unreleased]:`
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// The full document text
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.header.len() + self.body.len() + self.footer.len());
        text.push_str(&self.header);
        text.push_str(&self.body);
        text.push_str(&self.footer);
        text
    }

    pub fn unreleased(&self) -> &Unreleased {
        &self.unreleased
    }

    /// Releases, newest first
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn latest_release(&self) -> Option<&Release> {
        self.releases.first()
    }

    pub fn latest_version(&self) -> Option<&VersionNumber> {
        self.latest_release().map(|r| &r.version)
    }

    /// Find the release with exactly this version
    pub fn find_release(&self, version: &VersionNumber) -> Option<&Release> {
        self.releases.iter().find(|r| &r.version == version)
    }

    /// Like [`Changelog::find_release`], but `None` selects the latest release
    pub fn release_or_latest(&self, version: Option<&VersionNumber>) -> Result<&Release> {
        match version {
            Some(v) => self
                .find_release(v)
                .ok_or_else(|| KacError::ReleaseNotFound(v.to_string())),
            None => self.latest_release().ok_or(KacError::NoReleases),
        }
    }

    /// Candidate next versions derived from the latest release
    ///
    /// For a latest version of 0.3.0 and tokens `rc`/`build` this yields
    /// 0.3.1, 0.4.0, 1.0.0, 0.3.0-rc.1, 0.3.0+build.1 and 0.3.0-rc.1+build.1.
    /// Fails with `InvalidVersionFormat` when a bump would overflow a counter.
    pub fn next_versions(
        &self,
        prerelease_token: &str,
        build_token: &str,
    ) -> Result<Vec<VersionCandidate>> {
        let latest = self.latest_version().ok_or(KacError::NoReleases)?;
        latest.candidates(prerelease_token, build_token)
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest_version() {
            Some(v) => write!(f, "CHANGELOG {}", v.format(true)),
            None => write!(f, "CHANGELOG (unreleased)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChangeCategory;
    use chrono::NaiveDate;

    const TEXT: &str = "# Changelog\n\n## [Unreleased]\n\n### Added\n- Something added\n\n## [0.2.0] - 2020-03-01\n### Fixed\n- A bug\n\n## [0.1.0] - 2020-01-01\n### Added\n- Initial\n\n[Unreleased]: https://github.com/o/r/compare/v0.2.0...HEAD\n[0.2.0]: https://github.com/o/r/compare/v0.1.0...v0.2.0\n[0.1.0]: https://github.com/o/r/releases/tag/v0.1.0\n";

    #[test]
    fn test_parse_round_trip() {
        let changelog = Changelog::parse(TEXT).unwrap();
        assert_eq!(changelog.text(), TEXT);
        assert!(changelog.path().is_none());
    }

    #[test]
    fn test_queries() {
        let changelog = Changelog::parse(TEXT).unwrap();
        assert_eq!(changelog.releases().len(), 2);
        assert_eq!(changelog.latest_version(), Some(&VersionNumber::new(0, 2, 0)));
        assert_eq!(
            changelog.unreleased().changes.get(ChangeCategory::Added),
            ["Something added"]
        );
        let first = changelog.find_release(&VersionNumber::new(0, 1, 0)).unwrap();
        assert_eq!(first.release_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(changelog.find_release(&VersionNumber::new(9, 9, 9)).is_none());
        assert_eq!(changelog.to_string(), "CHANGELOG v0.2.0");
    }

    #[test]
    fn test_release_or_latest() {
        let changelog = Changelog::parse(TEXT).unwrap();
        assert_eq!(
            changelog.release_or_latest(None).unwrap().version,
            VersionNumber::new(0, 2, 0)
        );
        assert!(matches!(
            changelog.release_or_latest(Some(&VersionNumber::new(3, 0, 0))),
            Err(KacError::ReleaseNotFound(v)) if v == "3.0.0"
        ));
    }

    #[test]
    fn test_next_versions_without_releases() {
        let changelog =
            Changelog::parse("## [Unreleased]\n\n[Unreleased]: https://x/compare/v0.0.0...HEAD\n")
                .unwrap();
        assert!(matches!(
            changelog.next_versions("rc", "build"),
            Err(KacError::NoReleases)
        ));
        assert_eq!(changelog.to_string(), "CHANGELOG (unreleased)");
    }
}
