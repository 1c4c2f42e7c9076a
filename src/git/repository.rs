use std::path::Path;

use git2::Repository as Git2Repo;

use crate::error::Result;
use crate::git::Remote;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }
}

impl super::Repository for Git2Repository {
    fn remotes(&self) -> Result<Vec<Remote>> {
        let names = self.repo.remotes()?;
        let mut remotes = Vec::new();

        for name in names.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            if let Some(url) = remote.url() {
                remotes.push(Remote {
                    name: name.to_string(),
                    url: url.to_string(),
                });
            }
        }

        Ok(remotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{project_url, Repository};
    use tempfile::TempDir;

    #[test]
    fn test_remotes_of_fresh_repository() {
        let dir = TempDir::new().unwrap();
        let raw = Git2Repo::init(dir.path()).unwrap();
        raw.remote("origin", "git@github.com:o/r.git").unwrap();

        let repo = Git2Repository::open(dir.path()).unwrap();
        let remotes = repo.remotes().unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].name, "origin");
        assert_eq!(project_url(&repo).unwrap().as_deref(), Some("https://github.com/o/r"));
    }

    #[test]
    fn test_open_outside_repository() {
        let dir = TempDir::new().unwrap();
        // discover() walks up; a temp dir is normally outside any repository
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(Git2Repository::open(dir.path()).is_err());
        }
    }
}
