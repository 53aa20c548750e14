//! Shared test utilities

pub mod transport;

pub use transport::MockTransport;
