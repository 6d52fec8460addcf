//! Event Timeline
//!
//! A discrete-event simulation primitive: a timeline populated by stochastic
//! events, each regenerating its own next occurrence from a random draw
//! source, and a manager that repeatedly selects the earliest one.
//!
//! # Overview
//!
//! Every step, the [`EventManager`] scans its live events, picks the one
//! with the smallest upcoming timestamp, and moves the global clock to it.
//! Events may carry an expiry: once an expiring event's next occurrence
//! reaches its boundary it is evicted instead of selected.
//!
//! ## Key Features
//!
//! - **Pluggable draw sources**: any `FnMut() -> f64` or a seeded [`RandomDraw`]
//! - **Expiring events**: absolute boundaries that move with the timeline origin
//! - **Deferred auto-advance**: the previous winner is ticked at the start of
//!   the next selection, so the returned event stays inspectable
//! - **Recoverable errors**: an exhausted manager reports
//!   [`SimulationError::EmptyManager`] instead of aborting
//! - **Configurable runs**: JSON/CLI configuration and a driver with run statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use event_timeline::*;
//!
//! let mut manager = EventManager::new(true);
//! let source = RandomDraw::seeded(DistributionConfig::exponential(0.5), 42)?;
//! manager.add_event(Event::new("arrivals", source)?);
//! manager.add_event(Event::expiring("burst", 5.0, || 0.25)?);
//!
//! for _ in 0..10 {
//!     // The returned event borrows the manager; copy out what outlives it
//!     let name = manager.next()?.name().to_string();
//!     println!("{} at clock {}", name, manager.clock());
//! }
//! assert!(manager.clock() >= manager.previous_clock());
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, and run configuration
//! - [`events`]: Events, draw sources, and distribution parameters
//! - [`simulation`]: Event manager, driver, statistics, logging, and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Events    │    │ Simulation  │
//! │             │    │             │    │             │
//! │ EventId     │◄───┤ Event       │◄───┤ Manager     │
//! │ Enums       │    │ DrawSource  │    │ Runner      │
//! │ Config      │    │ RandomDraw  │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, EventId, EventKind, EventSpec, OutputFormat,
    SimulationConfig,
};

// Events and draw sources
pub use events::{compare_timestamps, DistributionConfig, DrawSource, Event, RandomDraw};

// Selection, driving, and reporting
pub use simulation::{
    build_event, EventManager, LoggingConfig, RunStatistics, SimulationError, SimulationResult,
    SimulationRunner,
};
