//! Discovers which versions of a module an artifact repository holds
//!
//! - [`discovery`]: listers, pattern substitution and metadata parsing
//! - [`transport`]: HTTP and file system access to repositories
//! - [`repository`]: discovery across the patterns of a configured repository
//! - [`config`]: configuration file and data directory handling
//! - [`logging`]: tracing subscriber setup for the binary

pub mod config;
pub mod discovery;
pub mod logging;
pub mod repository;
pub mod transport;
