//! Stochastic timeline events
//!
//! This module contains the event abstraction and the random draw sources
//! events regenerate their occurrences from.
//!
//! # Overview
//!
//! - **Event**: owns a draw source and its current/previous timestamps,
//!   optionally expiring once its timeline passes a boundary
//! - **DrawSource**: capability of producing a non-negative duration
//! - **RandomDraw**: a distribution bound to its own seeded generator
//! - **DistributionConfig**: immutable parameter set per distribution family
//!
//! # Usage Example
//!
//! ```rust
//! use event_timeline::events::*;
//!
//! let source = RandomDraw::seeded(DistributionConfig::exponential(0.5), 42).unwrap();
//! let mut arrivals = Event::new("arrivals", source).unwrap();
//! let first = arrivals.current_timestamp();
//! let second = arrivals.advance().unwrap();
//! assert!(second >= first);
//!
//! // Stubbed source expiring four time units after its first occurrence
//! let session = Event::expiring("session", 4.0, || 1.0).unwrap();
//! assert_eq!(session.expire_boundary(), Some(5.0));
//! ```

pub mod distribution;
pub mod event;
pub mod generator;

// Re-export all public types for convenience
pub use distribution::*;
pub use event::*;
pub use generator::*;
