use crate::error::Result;
use crate::git::{Remote, Repository};

/// Mock repository with a fixed set of remotes
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    remotes: Vec<Remote>,
}

impl MockRepository {
    /// Create a repository without remotes
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a remote
    pub fn with_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.push(Remote {
            name: name.into(),
            url: url.into(),
        });
        self
    }
}

impl Repository for MockRepository {
    fn remotes(&self) -> Result<Vec<Remote>> {
        Ok(self.remotes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_remotes() {
        let repo = MockRepository::new().with_remote("origin", "https://github.com/o/r.git");
        let remotes = repo.remotes().unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].url, "https://github.com/o/r.git");
    }

    #[test]
    fn test_mock_repository_default() {
        assert!(MockRepository::default().remotes().unwrap().is_empty());
    }
}
