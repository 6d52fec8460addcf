//! Random draw sources
//!
//! An event never talks to a distribution directly; it owns a [`DrawSource`]
//! that yields the next inter-arrival gap. [`RandomDraw`] is the standard
//! source: a distribution bound to its own seeded generator, so no two events
//! share mutable random state.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::distribution::{DistributionConfig, Sampler};
use crate::simulation::SimulationResult;

/// Capability of producing a non-negative duration on demand
///
/// Implementors are expected to be stateful and independently seeded.
/// Events check every draw and reject negative or non-finite values, so a
/// misbehaving source surfaces as a `TypeConstraint` error rather than a
/// corrupted timeline.
///
/// Any `FnMut() -> f64` closure is a draw source, which makes stubbing trivial:
///
/// ```rust
/// use event_timeline::events::Event;
///
/// let event = Event::new("tick", || 1.0).unwrap();
/// assert_eq!(event.current_timestamp(), 1.0);
/// ```
pub trait DrawSource {
    /// Produce the next duration
    fn draw(&mut self) -> f64;
}

impl<F> DrawSource for F
where
    F: FnMut() -> f64,
{
    fn draw(&mut self) -> f64 {
        self()
    }
}

static SEED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Seed derived from the wall clock
///
/// A process-local sequence number is mixed in so that generators created
/// within the same clock tick still receive distinct seeds.
pub fn time_derived_seed() -> u64 {
    let now = Utc::now();
    let nanos = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_micros()) as u64;
    let sequence = SEED_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    nanos ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Distribution bound to its own seeded random number generator
#[derive(Debug, Clone)]
pub struct RandomDraw {
    config: DistributionConfig,
    sampler: Sampler,
    rng: StdRng,
    seed: u64,
}

impl RandomDraw {
    /// Create a draw source, seeding from the wall clock when no seed is given
    pub fn new(config: DistributionConfig, seed: Option<u64>) -> SimulationResult<Self> {
        let seed = match seed {
            Some(seed) => seed,
            None => {
                let derived = time_derived_seed();
                debug!("Using time-derived seed {} for {}", derived, config);
                derived
            }
        };
        Self::seeded(config, seed)
    }

    /// Create a draw source with an explicit seed for reproducible runs
    pub fn seeded(config: DistributionConfig, seed: u64) -> SimulationResult<Self> {
        let sampler = config.sampler()?;
        Ok(Self { config, sampler, rng: StdRng::seed_from_u64(seed), seed })
    }

    /// Distribution parameters this source was built with
    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Seed the generator was initialised with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DrawSource for RandomDraw {
    fn draw(&mut self) -> f64 {
        self.sampler.sample(&mut self.rng)
    }
}
