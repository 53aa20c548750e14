//! Version discovery layer
//!
//! This module finds the versions a repository holds for a module, either
//! from the `maven-metadata.xml` index a Maven repository publishes or by
//! listing the resources an artifact pattern can resolve to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Lister    │────▶│   Loader    │────▶│  Transport  │
//! │ (per layout)│     │ (metadata)  │     │ (http,file) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐                                │
//! │   Pattern   │────────── listing ─────────────┘
//! │(substitute) │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`coordinate`]: Module coordinates and artifact descriptors
//! - [`pattern`]: Location pattern substitution and revision extraction
//! - [`metadata`]: `maven-metadata.xml` parsing
//! - [`loader`]: Fetching and parsing metadata through a transport
//! - [`lister`]: The `VersionLister` trait
//! - [`listers`]: Maven, directory and chained listers
//! - [`error`]: Error types for templates, transports and discovery
//! - [`types`]: The `VersionList` result type

pub mod coordinate;
pub mod error;
pub mod lister;
pub mod listers;
pub mod loader;
pub mod metadata;
pub mod pattern;
pub mod types;

pub use coordinate::{ArtifactDescriptor, ModuleCoordinate};
pub use error::{DiscoveryError, TemplateError, TransportError};
pub use lister::{RepositoryLayout, VersionLister};
pub use types::VersionList;
