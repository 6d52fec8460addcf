//! Event selection, driving and reporting
//!
//! This module contains the event manager, the driver that runs it, run
//! statistics, logging setup, and error handling.
//!
//! # Overview
//!
//! - **EventManager**: owns the events, selects the earliest live one,
//!   evicts expired ones, and keeps the global clock
//! - **SimulationRunner**: builds a manager from configuration and performs
//!   repeated selections, reading the clock delta after each
//! - **RunStatistics**: summary of a run, rendered as text or JSON
//! - **SimulationError**: error taxonomy shared by the whole crate
//!
//! # Usage Example
//!
//! ```rust
//! use event_timeline::events::Event;
//! use event_timeline::simulation::*;
//!
//! let mut manager = EventManager::new(true);
//! manager.add_event(Event::new("tick", || 1.0).unwrap());
//!
//! assert_eq!(manager.next().unwrap().current_timestamp(), 1.0);
//! assert_eq!(manager.next().unwrap().current_timestamp(), 2.0);
//! assert_eq!(manager.delta_ts(), 1.0);
//!
//! manager.clear();
//! assert!(matches!(manager.next(), Err(SimulationError::EmptyManager)));
//! ```

pub mod error;
pub mod logging;
pub mod manager;
pub mod runner;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use manager::*;
pub use runner::*;
pub use statistics::*;
