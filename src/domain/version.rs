use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::identifier::Identifier;
use crate::error::{KacError, Result};

const VERSION_PATTERN: &str = r"^(v)?(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// Semantic version with optional prerelease and build metadata
///
/// Equality is exact: two versions are equal only when all five fields match,
/// build metadata included. Use [`VersionNumber::precedence_cmp`] for semver
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl VersionNumber {
    /// Create a release version without prerelease/build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionNumber {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Parse `v?MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` (e.g. "v1.2.3-rc.1")
    pub fn parse(text: &str) -> Result<Self> {
        let caps = version_regex()
            .captures(text)
            .ok_or_else(|| KacError::version(text))?;

        let number = |idx: usize| -> Result<u64> {
            caps[idx].parse::<u64>().map_err(|_| KacError::version(text))
        };

        Ok(VersionNumber {
            major: number(2)?,
            minor: number(3)?,
            patch: number(4)?,
            prerelease: caps.get(5).map(|m| m.as_str().to_string()),
            build: caps.get(6).map(|m| m.as_str().to_string()),
        })
    }

    /// Render the version, optionally prefixed with `v`
    pub fn format(&self, include_v: bool) -> String {
        if include_v {
            format!("v{}", self)
        } else {
            self.to_string()
        }
    }

    /// Error for a bump that would push a counter past `u64::MAX`
    fn overflow(&self) -> KacError {
        KacError::version(format!("{} (cannot bump past u64::MAX)", self))
    }

    pub fn bump_major(&self) -> Result<Self> {
        let major = self.major.checked_add(1).ok_or_else(|| self.overflow())?;
        Ok(VersionNumber::new(major, 0, 0))
    }

    pub fn bump_minor(&self) -> Result<Self> {
        let minor = self.minor.checked_add(1).ok_or_else(|| self.overflow())?;
        Ok(VersionNumber::new(self.major, minor, 0))
    }

    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| self.overflow())?;
        Ok(VersionNumber::new(self.major, self.minor, patch))
    }

    /// Bump the prerelease counter of the current version.
    ///
    /// "0.3.0" -> "0.3.0-rc.1", "0.3.0-rc.1" -> "0.3.0-rc.2",
    /// "0.3.0-beta.2" -> "0.3.0-rc.1". Build metadata is dropped.
    pub fn bump_prerelease(&self, token: &str) -> Result<Self> {
        let next = Identifier::next(self.prerelease.as_deref(), token)
            .ok_or_else(|| self.overflow())?;
        Ok(VersionNumber {
            prerelease: Some(next.to_string()),
            build: None,
            ..self.clone()
        })
    }

    /// Bump the build counter of the current version, keeping any prerelease.
    pub fn bump_build(&self, token: &str) -> Result<Self> {
        let next = Identifier::next(self.build.as_deref(), token).ok_or_else(|| self.overflow())?;
        Ok(VersionNumber {
            build: Some(next.to_string()),
            ..self.clone()
        })
    }

    /// Apply a bump of the given kind
    pub fn bump(&self, kind: VersionBump, prerelease_token: &str, build_token: &str) -> Result<Self> {
        match kind {
            VersionBump::Patch => self.bump_patch(),
            VersionBump::Minor => self.bump_minor(),
            VersionBump::Major => self.bump_major(),
            VersionBump::Prerelease => self.bump_prerelease(prerelease_token),
            VersionBump::Build => self.bump_build(build_token),
            VersionBump::PrereleaseBuild => self
                .bump_prerelease(prerelease_token)?
                .bump_build(build_token),
        }
    }

    /// All candidate next versions, each derived from `self`, in display order
    ///
    /// Fails when any of the bumps would overflow a counter.
    pub fn candidates(
        &self,
        prerelease_token: &str,
        build_token: &str,
    ) -> Result<Vec<VersionCandidate>> {
        VersionBump::ALL
            .iter()
            .map(|&kind| -> Result<VersionCandidate> {
                Ok(VersionCandidate {
                    kind,
                    version: self.bump(kind, prerelease_token, build_token)?,
                })
            })
            .collect()
    }

    /// Convert to a `semver::Version` for precedence checks
    pub fn to_semver(&self) -> Result<semver::Version> {
        semver::Version::parse(&self.to_string()).map_err(|_| KacError::version(self.to_string()))
    }

    /// Compare by semver precedence (build metadata ignored).
    ///
    /// Returns `None` when either side uses identifiers the semver grammar
    /// rejects, such as numeric prerelease parts with leading zeros.
    pub fn precedence_cmp(&self, other: &VersionNumber) -> Option<Ordering> {
        let a = self.to_semver().ok()?;
        let b = other.to_semver().ok()?;
        Some(a.cmp_precedence(&b))
    }

    pub fn is_release(&self) -> bool {
        self.prerelease.is_none() && self.build.is_none()
    }
}

impl FromStr for VersionNumber {
    type Err = KacError;

    fn from_str(s: &str) -> Result<Self> {
        VersionNumber::parse(s)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Kind of version bump offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
    Prerelease,
    Build,
    PrereleaseBuild,
}

impl VersionBump {
    pub const ALL: [VersionBump; 6] = [
        VersionBump::Patch,
        VersionBump::Minor,
        VersionBump::Major,
        VersionBump::Prerelease,
        VersionBump::Build,
        VersionBump::PrereleaseBuild,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
            VersionBump::Prerelease => "prerelease",
            VersionBump::Build => "build",
            VersionBump::PrereleaseBuild => "prerelease+build",
        }
    }
}

/// A possible next version and the bump that produces it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    pub kind: VersionBump,
    pub version: VersionNumber,
}

impl VersionCandidate {
    /// Display key, e.g. "v0.4.0"
    pub fn key(&self) -> String {
        self.version.format(true)
    }
}
