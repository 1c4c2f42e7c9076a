//! Line-scanning parser for Keep-a-Changelog documents.
//!
//! Three nested grammars:
//! - document: header, then the body starting at `## [Unreleased]`, then the
//!   footer starting at the `[Unreleased]:` link reference
//! - body: the Unreleased section followed by dated release sections
//! - section: `### Category` blocks of `- entry` lines (see [`ChangeBlockParser`])

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::changes::ChangeBlockParser;
use crate::domain::{ChangeSet, Release, Unreleased, VersionNumber};
use crate::error::{KacError, Result};

pub(crate) const UNRELEASED_HEADING: &str = "## [Unreleased]";
pub(crate) const UNRELEASED_LINK: &str = "[Unreleased]:";

fn release_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^## \[([^\]]+)\] - (\d{4}-\d{2}-\d{2})(\s+\[YANKED\])?\s*$")
            .expect("release heading pattern is valid")
    })
}

/// A line of the source text with its position
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character
    pub offset: usize,
    /// Content without the line terminator
    pub content: &'a str,
}

/// Iterate lines with their 1-based numbers and byte offsets. `\r\n` and `\n`
/// terminators are stripped from `content`.
pub(crate) fn lines(text: &str, first_number: usize) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let line = Line {
                number: first_number + idx,
                offset,
                content: raw
                    .strip_suffix('\n')
                    .map(|l| l.strip_suffix('\r').unwrap_or(l))
                    .unwrap_or(raw),
            };
            offset += raw.len();
            line
        })
}

/// The three contiguous regions of a CHANGELOG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Regions<'a> {
    pub header: &'a str,
    pub body: &'a str,
    pub footer: &'a str,
    /// Line number of the `## [Unreleased]` heading
    pub body_line: usize,
}

/// Split raw text into header, body and footer.
pub(crate) fn split_regions(text: &str) -> Result<Regions<'_>> {
    let mut iter = lines(text, 1);

    let heading = iter
        .by_ref()
        .find(|line| line.content.starts_with(UNRELEASED_HEADING))
        .ok_or(KacError::MissingUnreleasedSection)?;

    let footer = iter
        .find(|line| line.content.starts_with(UNRELEASED_LINK))
        .ok_or(KacError::MissingFooter)?;

    Ok(Regions {
        header: &text[..heading.offset],
        body: &text[heading.offset..footer.offset],
        footer: &text[footer.offset..],
        body_line: heading.number,
    })
}

/// Unreleased changes and releases recovered from the body region
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedBody {
    pub unreleased: Unreleased,
    pub releases: Vec<Release>,
}

struct ReleaseHeading {
    version: VersionNumber,
    release_date: NaiveDate,
    yanked: bool,
}

/// Parse the body region. `first_line` is the line number of its first line.
pub(crate) fn parse_body(body: &str, first_line: usize) -> Result<ParsedBody> {
    let mut iter = lines(body, first_line);
    // split_regions guarantees the body opens with the Unreleased heading
    iter.next();

    let mut unreleased: Option<ChangeSet> = None;
    let mut releases = Vec::new();
    let mut current: Option<ReleaseHeading> = None;
    let mut blocks = ChangeBlockParser::new();

    for line in iter {
        if line.content.starts_with("## ") {
            let changes = std::mem::take(&mut blocks).finish();
            match current.take() {
                None => unreleased = Some(changes),
                Some(heading) => releases.push(finish_release(heading, changes)),
            }
            current = Some(parse_release_heading(line.content, line.number)?);
            continue;
        }
        blocks.feed(line.number, line.content)?;
    }

    let changes = blocks.finish();
    match current {
        None => unreleased = Some(changes),
        Some(heading) => releases.push(finish_release(heading, changes)),
    }

    tracing::debug!(releases = releases.len(), "parsed changelog body");

    Ok(ParsedBody {
        unreleased: Unreleased::new(unreleased.unwrap_or_default()),
        releases,
    })
}

fn finish_release(heading: ReleaseHeading, changes: ChangeSet) -> Release {
    Release {
        version: heading.version,
        release_date: heading.release_date,
        yanked: heading.yanked,
        changes,
    }
}

fn parse_release_heading(content: &str, line: usize) -> Result<ReleaseHeading> {
    let malformed = || KacError::MalformedReleaseHeading {
        line,
        heading: content.to_string(),
    };

    let caps = release_heading_regex()
        .captures(content)
        .ok_or_else(malformed)?;

    let version = VersionNumber::parse(&caps[1])?;
    let release_date =
        NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").map_err(|_| malformed())?;

    Ok(ReleaseHeading {
        version,
        release_date,
        yanked: caps.get(3).is_some(),
    })
}
