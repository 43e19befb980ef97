//! sortdir - sort a cluttered folder into category subdirectories
//!
//! Files are classified by extension. Subfolders can be moved as a whole,
//! into the category that best describes the files found anywhere inside
//! them. Failed moves are cleaned up and reported, never fatal.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod mover;
pub mod output;
pub mod profiler;
pub mod resolver;

pub use config::{CategoryConfig, ConfigError};
pub use file_category::{CategoryMap, OTHER_CATEGORY};
pub use file_organizer::{OrganizeError, OrganizeOptions, Report, organize, plan};
pub use mover::{FileMover, FolderMover, MoveOutcome, Mover};
pub use profiler::{FrequencyTable, profile};
pub use resolver::resolve;

pub use cli::{Cli, run};
