//! Turning the Unreleased section into a dated release.

use chrono::NaiveDate;

use super::parser::{lines, UNRELEASED_LINK};
use super::Changelog;
use crate::domain::{Unreleased, VersionNumber};
use crate::error::{KacError, Result};

impl Changelog {
    /// Bump the document to `version`, released on `released_on`.
    ///
    /// The document is left untouched when an error is returned. Whether the
    /// Unreleased section has any changes is not checked here.
    pub fn bump(&mut self, version: VersionNumber, released_on: NaiveDate) -> Result<()> {
        *self = self.bumped(&version, released_on)?;
        Ok(())
    }

    /// Return a bumped copy of the document, see [`Changelog::bump`]
    pub fn bumped(&self, version: &VersionNumber, released_on: NaiveDate) -> Result<Changelog> {
        let footer = rewrite_footer(&self.footer, version, self.latest_version())?;
        let body = insert_release_heading(&self.body, version, released_on);

        let release = self.unreleased.clone().release(version.clone(), released_on);
        let mut releases = Vec::with_capacity(self.releases.len() + 1);
        releases.push(release);
        releases.extend(self.releases.iter().cloned());

        tracing::debug!(version = %version, date = %released_on, "bumped changelog");

        Ok(Changelog {
            path: self.path.clone(),
            header: self.header.clone(),
            body,
            footer,
            unreleased: Unreleased::default(),
            releases,
        })
    }
}

fn line_ending(raw_line: &str) -> &'static str {
    if raw_line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Insert `## [version] - date` right below the Unreleased heading. The old
/// Unreleased content ends up under the new heading.
fn insert_release_heading(body: &str, version: &VersionNumber, released_on: NaiveDate) -> String {
    let heading_end = body.find('\n').map(|i| i + 1).unwrap_or(body.len());
    let (heading, rest) = body.split_at(heading_end);
    let eol = line_ending(heading);

    let mut new_body = String::with_capacity(body.len() + 32);
    new_body.push_str(heading);
    if !heading.ends_with('\n') {
        new_body.push_str(eol);
    }
    new_body.push_str(eol);
    new_body.push_str(&format!("## [{}] - {}", version, released_on));
    new_body.push_str(eol);
    new_body.push_str(rest);
    new_body
}

/// Parts of an `[Unreleased]: <base>/<from>...<to>` reference line
#[derive(Debug, PartialEq, Eq)]
struct CompareLink<'a> {
    /// Everything up to and including the last `/` of the URL
    prefix: &'a str,
    base: &'a str,
    from: &'a str,
    to: &'a str,
    /// Anything after the URL (e.g. a link title)
    suffix: &'a str,
}

impl<'a> CompareLink<'a> {
    fn parse(content: &'a str) -> Result<Self> {
        let malformed = || KacError::MalformedUnreleasedLink(content.to_string());

        let after_label = content.strip_prefix(UNRELEASED_LINK).ok_or_else(malformed)?;
        let url_start = UNRELEASED_LINK.len() + (after_label.len() - after_label.trim_start().len());
        let url_len = content[url_start..]
            .find(char::is_whitespace)
            .unwrap_or(content.len() - url_start);
        let url = &content[url_start..url_start + url_len];

        let slash = url.rfind('/').ok_or_else(malformed)?;
        let (from, to) = url[slash + 1..].split_once("...").ok_or_else(malformed)?;
        if from.is_empty() || to.is_empty() {
            return Err(malformed());
        }

        Ok(CompareLink {
            prefix: &content[..url_start + slash + 1],
            base: &url[..slash],
            from,
            to,
            suffix: &content[url_start + url_len..],
        })
    }

    /// Tag prefix used by the `from` side, e.g. "v" for "v0.3.0"
    ///
    /// The `from` tag may name an older version than `previous` when the link
    /// is stale, so any version suffix is accepted.
    fn tag_prefix(&self, previous: Option<&VersionNumber>) -> &'a str {
        let from: &'a str = self.from;
        if let Some(prefix) = previous.and_then(|p| from.strip_suffix(&p.to_string())) {
            return prefix;
        }
        let versioned = from
            .char_indices()
            .find(|&(i, c)| c.is_ascii_digit() && VersionNumber::parse(&from[i..]).is_ok());
        match versioned {
            Some((i, _)) => &from[..i],
            None if from.starts_with('v') => "v",
            None => "",
        }
    }
}

/// Point `[Unreleased]:` at the new version and add the new release's compare link below it.
fn rewrite_footer(
    footer: &str,
    version: &VersionNumber,
    previous: Option<&VersionNumber>,
) -> Result<String> {
    let first = lines(footer, 1).next().ok_or(KacError::MissingFooter)?;
    let raw_first = &footer[..footer.find('\n').map(|i| i + 1).unwrap_or(footer.len())];
    let rest = &footer[raw_first.len()..];

    let link = CompareLink::parse(first.content)?;
    let prefix = link.tag_prefix(previous);
    let new_tag = format!("{}{}", prefix, version);
    // Compare against the previous release even when the Unreleased link is stale
    let previous_tag = match previous {
        Some(previous) => format!("{}{}", prefix, previous),
        None => link.from.to_string(),
    };
    let eol = line_ending(raw_first);

    let mut new_footer = String::with_capacity(footer.len() + 96);
    new_footer.push_str(&format!("{}{}...{}{}", link.prefix, new_tag, link.to, link.suffix));
    new_footer.push_str(eol);
    new_footer.push_str(&format!("[{}]: {}/{}...{}", version, link.base, previous_tag, new_tag));
    if raw_first.ends_with('\n') {
        new_footer.push_str(eol);
    }
    new_footer.push_str(rest);
    Ok(new_footer)
}
