pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod storage;
pub mod template;
pub mod ui;

pub use changelog::Changelog;
pub use error::{KacError, Result};
