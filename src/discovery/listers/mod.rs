//! Version lister implementations, one per repository layout

pub mod chain;
pub mod directory;
pub mod maven;

pub use chain::ChainedVersionLister;
pub use directory::DirectoryVersionLister;
pub use maven::{M2_PATTERN, MavenVersionLister};
