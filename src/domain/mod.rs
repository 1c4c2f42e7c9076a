//! Domain model - versions, change sets and releases, independent of file layout

pub mod changes;
pub mod identifier;
pub mod release;
pub mod version;

pub use changes::{ChangeCategory, ChangeSet};
pub use identifier::Identifier;
pub use release::{Release, Unreleased};
pub use version::{VersionBump, VersionCandidate, VersionNumber};
