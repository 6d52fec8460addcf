//! Core types and configuration for the event timeline
//!
//! This module contains the identifiers, enumerations, and configuration
//! structures shared by the event and simulation modules.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based [`EventId`] giving each event an identity
//!   independent of its timestamp
//! - **Enums**: event kinds and report output formats
//! - **Configuration**: run configuration with validation, CLI and file support
//!
//! # Usage Example
//!
//! ```rust
//! use event_timeline::events::DistributionConfig;
//! use event_timeline::types::*;
//!
//! let config = SimulationConfig {
//!     iterations: 10_000,
//!     seed: Some(7),
//!     events: vec![
//!         EventSpec::new("arrivals", DistributionConfig::exponential(0.5)),
//!         EventSpec::new("session", DistributionConfig::constant(1.0)).with_expire_interval(30.0),
//!     ],
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//! assert_eq!(config.get_output_format().unwrap(), OutputFormat::Text);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
