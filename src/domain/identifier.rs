//! Counter identifiers for prerelease and build metadata
//!
//! Bumping a prerelease or build field works on identifiers of the form
//! `token.N` (e.g. `rc.1`, `build.7`). See https://semver.org/#spec-item-9
//! for the allowed character set.

use std::fmt;
use std::str::FromStr;

use crate::error::{KacError, Result};

/// A `token.iteration` identifier such as `rc.2`
///
/// # Examples
/// - "rc" -> Identifier { token: "rc", iteration: None }
/// - "rc.1" -> Identifier { token: "rc", iteration: Some(1) }
/// - "alpha.beta.3" -> Identifier { token: "alpha.beta", iteration: Some(3) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: String,
    pub iteration: Option<u64>,
}

impl Identifier {
    pub fn new(token: impl Into<String>, iteration: Option<u64>) -> Self {
        Identifier {
            token: token.into(),
            iteration,
        }
    }

    /// Parse an identifier, splitting a trailing numeric component off as the iteration
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Increment the iteration number. A bare token starts at 1.
    ///
    /// Returns `None` when the counter is already `u64::MAX`.
    pub fn increment_iteration(&self) -> Option<Self> {
        let iteration = match self.iteration {
            Some(n) => n.checked_add(1)?,
            None => 1,
        };
        Some(Identifier::new(self.token.clone(), Some(iteration)))
    }

    /// Next identifier for a bump using `token`.
    ///
    /// Continues the counter when `current` uses the same token, otherwise
    /// starts a fresh `token.1`. `None` when the counter would overflow.
    pub fn next(current: Option<&str>, token: &str) -> Option<Self> {
        match current.and_then(|c| Identifier::parse(c).ok()) {
            Some(existing) if existing.token == token => existing.increment_iteration(),
            _ => Some(Identifier::new(token, Some(1))),
        }
    }
}

/// Check that `token` is usable as a prerelease/build token
///
/// Tokens are dot-separated identifiers of ASCII alphanumerics and hyphens.
pub fn validate_token(token: &str) -> Result<()> {
    let valid = !token.is_empty()
        && token.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if valid {
        Ok(())
    } else {
        Err(KacError::config(format!(
            "Invalid prerelease/build token: '{}'",
            token
        )))
    }
}

impl FromStr for Identifier {
    type Err = KacError;

    fn from_str(s: &str) -> Result<Self> {
        validate_token(s).map_err(|_| KacError::version(s))?;

        if let Some((token, last)) = s.rsplit_once('.') {
            if let Ok(n) = last.parse::<u64>() {
                return Ok(Identifier::new(token, Some(n)));
            }
        }
        Ok(Identifier::new(s, None))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)?;
        if let Some(n) = self.iteration {
            write!(f, ".{}", n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_iteration() {
        let id = Identifier::parse("rc.1").unwrap();
        assert_eq!(id.token, "rc");
        assert_eq!(id.iteration, Some(1));
    }

    #[test]
    fn test_parse_bare_token() {
        let id = Identifier::parse("alpha").unwrap();
        assert_eq!(id, Identifier::new("alpha", None));
    }

    #[test]
    fn test_parse_dotted_token() {
        let id = Identifier::parse("alpha.beta.3").unwrap();
        assert_eq!(id, Identifier::new("alpha.beta", Some(3)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Identifier::parse("").is_err());
        assert!(Identifier::parse("rc..1").is_err());
        assert!(Identifier::parse("rc!").is_err());
    }

    #[test]
    fn test_increment() {
        assert_eq!(
            Identifier::parse("rc.9").unwrap().increment_iteration(),
            Some(Identifier::new("rc", Some(10)))
        );
        assert_eq!(
            Identifier::new("dev", None).increment_iteration(),
            Some(Identifier::new("dev", Some(1)))
        );
    }

    #[test]
    fn test_increment_at_max_overflows() {
        let id = Identifier::new("rc", Some(u64::MAX));
        assert_eq!(id.increment_iteration(), None);
        assert_eq!(Identifier::next(Some("rc.18446744073709551615"), "rc"), None);
        // A different token restarts the counter instead
        assert_eq!(
            Identifier::next(Some("rc.18446744073709551615"), "beta"),
            Some(Identifier::new("beta", Some(1)))
        );
    }

    #[test]
    fn test_next_same_token_continues() {
        assert_eq!(Identifier::next(Some("rc.2"), "rc").unwrap().to_string(), "rc.3");
    }

    #[test]
    fn test_next_different_token_restarts() {
        assert_eq!(Identifier::next(Some("beta.4"), "rc").unwrap().to_string(), "rc.1");
    }

    #[test]
    fn test_next_without_current() {
        assert_eq!(Identifier::next(None, "build").unwrap().to_string(), "build.1");
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("rc").is_ok());
        assert!(validate_token("pre-release").is_ok());
        assert!(validate_token("a.b").is_ok());
        assert!(validate_token("").is_err());
        assert!(validate_token("r c").is_err());
        assert!(validate_token(".rc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Identifier::new("rc", Some(2)).to_string(), "rc.2");
        assert_eq!(Identifier::new("rc", None).to_string(), "rc");
    }
}
