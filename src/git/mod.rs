//! Git remote discovery
//!
//! `kac init` uses the first git remote of the current repository as the
//! default project URL for CHANGELOG compare links. The [Repository] trait
//! keeps that lookup swappable:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a fixed list of remotes for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// A configured remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// Read access to a repository's remotes
pub trait Repository {
    /// All remotes that have a URL, in any order
    fn remotes(&self) -> Result<Vec<Remote>>;
}

/// Pick the remote to derive the project URL from.
///
/// "origin" wins when present, otherwise the alphabetically first remote.
pub fn preferred_remote<R: Repository + ?Sized>(repo: &R) -> Result<Option<Remote>> {
    let mut remotes = repo.remotes()?;
    remotes.sort_by(|a, b| {
        if a.name == "origin" {
            std::cmp::Ordering::Less
        } else if b.name == "origin" {
            std::cmp::Ordering::Greater
        } else {
            a.name.cmp(&b.name)
        }
    });
    Ok(remotes.into_iter().next())
}

/// Web URL of the project, derived from the preferred remote
pub fn project_url<R: Repository + ?Sized>(repo: &R) -> Result<Option<String>> {
    Ok(preferred_remote(repo)?.map(|remote| web_url(&remote.url)))
}

/// Turn a remote URL into a browsable project URL.
///
/// Drops a trailing `.git` and rewrites scp-style SSH remotes
/// (`git@host:owner/repo`) to `https://host/owner/repo`.
pub fn web_url(remote_url: &str) -> String {
    let trimmed = remote_url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if let Some(rest) = trimmed.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map(|(_, host)| host).unwrap_or(rest);
        return format!("https://{}", rest);
    }

    if !trimmed.contains("://") {
        if let Some((user_host, path)) = trimmed.split_once(':') {
            let host = user_host.split_once('@').map(|(_, h)| h).unwrap_or(user_host);
            return format!("https://{}/{}", host, path);
        }
    }

    trimmed.to_string()
}
