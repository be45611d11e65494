//! Place explorer core: search orchestration, enrichment adapters, and the
//! authentication state machine gating translation.
//!
//! The crate follows a hexagonal layout. `domain` owns types, services and
//! ports; `outbound` holds the HTTP adapters; `app` wires both behind the
//! [`Explorer`] facade that a presentation layer drives.

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use app::{Explorer, ExplorerBuildError, ExplorerPorts};
pub use config::{ConfigError, ExplorerConfig};
