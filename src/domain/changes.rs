//! The six Keep-a-Changelog change categories and the change lists grouped by them.

use std::fmt;
use std::str::FromStr;

use crate::error::{KacError, Result};

/// Change category heading (`### Added`, `### Fixed`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeCategory {
    Added,
    Changed,
    Deprecated,
    Fixed,
    Removed,
    Security,
}

impl ChangeCategory {
    /// Categories in the order they are written out
    pub const ALL: [ChangeCategory; 6] = [
        ChangeCategory::Added,
        ChangeCategory::Changed,
        ChangeCategory::Deprecated,
        ChangeCategory::Fixed,
        ChangeCategory::Removed,
        ChangeCategory::Security,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Added => "Added",
            ChangeCategory::Changed => "Changed",
            ChangeCategory::Deprecated => "Deprecated",
            ChangeCategory::Fixed => "Fixed",
            ChangeCategory::Removed => "Removed",
            ChangeCategory::Security => "Security",
        }
    }
}

impl FromStr for ChangeCategory {
    type Err = KacError;

    /// Case-insensitive lookup ("added", "ADDED" and "Added" are all accepted)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(ChangeCategory::Added),
            "changed" => Ok(ChangeCategory::Changed),
            "deprecated" => Ok(ChangeCategory::Deprecated),
            "fixed" => Ok(ChangeCategory::Fixed),
            "removed" => Ok(ChangeCategory::Removed),
            "security" => Ok(ChangeCategory::Security),
            _ => Err(KacError::UnrecognizedChangeCategory {
                line: 0,
                name: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change descriptions grouped by category.
///
/// Every category is always present, possibly empty. Entries keep their
/// insertion order and their inline Markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: [Vec<String>; 6],
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `### Category` / `- entry` blocks
    ///
    /// # Example
    /// ```
    /// use kac::domain::{ChangeCategory, ChangeSet};
    ///
    /// let changes = ChangeSet::parse("### Added\n- Add A\n\n### Changed\n- Change B\n").unwrap();
    /// assert_eq!(changes.get(ChangeCategory::Added), ["Add A"]);
    /// assert_eq!(changes.get(ChangeCategory::Changed), ["Change B"]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = ChangeBlockParser::new();
        for (idx, line) in text.lines().enumerate() {
            parser.feed(idx + 1, line)?;
        }
        Ok(parser.finish())
    }

    pub fn get(&self, category: ChangeCategory) -> &[String] {
        &self.entries[category.index()]
    }

    pub fn push(&mut self, category: ChangeCategory, entry: impl Into<String>) {
        self.entries[category.index()].push(entry.into());
    }

    /// Builder-style variant of [`ChangeSet::push`]
    pub fn with(mut self, category: ChangeCategory, entry: impl Into<String>) -> Self {
        self.push(category, entry);
        self
    }

    pub fn added(&self) -> &[String] {
        self.get(ChangeCategory::Added)
    }

    pub fn changed(&self) -> &[String] {
        self.get(ChangeCategory::Changed)
    }

    pub fn deprecated(&self) -> &[String] {
        self.get(ChangeCategory::Deprecated)
    }

    pub fn fixed(&self) -> &[String] {
        self.get(ChangeCategory::Fixed)
    }

    pub fn removed(&self) -> &[String] {
        self.get(ChangeCategory::Removed)
    }

    pub fn security(&self) -> &[String] {
        self.get(ChangeCategory::Security)
    }

    /// Categories with their entries, in canonical order (empty ones included)
    pub fn iter(&self) -> impl Iterator<Item = (ChangeCategory, &[String])> + '_ {
        ChangeCategory::ALL
            .iter()
            .map(move |&category| (category, self.get(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Vec::is_empty)
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    /// Render as Markdown. Empty categories are omitted; each block ends with a blank line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (category, entries) in self.iter().filter(|(_, e)| !e.is_empty()) {
            text.push_str("### ");
            text.push_str(category.as_str());
            text.push('\n');
            for entry in entries {
                text.push_str("- ");
                text.push_str(entry);
                text.push('\n');
            }
            text.push('\n');
        }
        text
    }
}

/// Incremental parser for the category blocks of one section.
///
/// Lines are fed one at a time with their 1-based line number so that errors
/// point at the right place in the whole document.
#[derive(Debug, Default)]
pub(crate) struct ChangeBlockParser {
    changes: ChangeSet,
    category: Option<ChangeCategory>,
    // An entry can still take indented continuation lines
    open_entry: bool,
}

impl ChangeBlockParser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn feed(&mut self, line_no: usize, line: &str) -> Result<()> {
        if let Some(name) = line.strip_prefix("### ") {
            let category = name.parse::<ChangeCategory>().map_err(|_| {
                KacError::UnrecognizedChangeCategory {
                    line: line_no,
                    name: name.trim().to_string(),
                }
            })?;
            self.category = Some(category);
            self.open_entry = false;
            return Ok(());
        }

        if line.trim().is_empty() {
            self.open_entry = false;
            return Ok(());
        }

        if let Some(entry) = line.strip_prefix("- ") {
            match self.category {
                Some(category) => {
                    self.changes.push(category, entry);
                    self.open_entry = true;
                }
                None => {
                    tracing::debug!(line = line_no, "ignoring entry outside a category block");
                }
            }
            return Ok(());
        }

        if self.open_entry && line.starts_with([' ', '\t']) {
            if let Some(category) = self.category {
                if let Some(last) = self.changes.entries[category.index()].last_mut() {
                    last.push('\n');
                    last.push_str(line);
                }
            }
            return Ok(());
        }

        tracing::debug!(line = line_no, "ignoring unrecognized line: {}", line);
        self.open_entry = false;
        Ok(())
    }

    pub(crate) fn finish(self) -> ChangeSet {
        self.changes
    }
}
