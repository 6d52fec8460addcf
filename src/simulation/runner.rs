//! Timeline driver
//!
//! This module contains the [`SimulationRunner`], which builds an
//! [`EventManager`] from a [`SimulationConfig`] and drives it the way a
//! measurement collaborator does: repeated selections, reading the clock
//! delta after each one.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::events::{Event, RandomDraw};
use crate::simulation::{EventManager, RunStatistics, SimulationError, SimulationResult};
use crate::types::{EventId, EventSpec, SimulationConfig};
use crate::{perf_span, sim_event};

/// Build an event from its specification
///
/// `seed` of `None` seeds the generator from the wall clock.
pub fn build_event(spec: &EventSpec, seed: Option<u64>) -> SimulationResult<Event> {
    let source = RandomDraw::new(spec.distribution, seed)?;
    match spec.expire_interval {
        Some(interval) => Event::expiring(spec.name.clone(), interval, source),
        None => Event::new(spec.name.clone(), source),
    }
}

/// Drives an event manager through a configured number of selections
#[derive(Debug)]
pub struct SimulationRunner {
    /// Configuration the manager was built from
    config: SimulationConfig,
    /// Manager owning the registered events
    manager: EventManager,
    /// Report labels by identity, unique per runner and kept after eviction
    names: HashMap<EventId, String>,
}

impl SimulationRunner {
    /// Validate the configuration and register its events
    #[instrument(skip(config), fields(events = config.events.len(), iterations = config.iterations))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config
            .validate()
            .map_err(|e| SimulationError::configuration_error(e.to_string()))?;

        match config.seed {
            Some(seed) => info!("Using deterministic base seed: {}", seed),
            None => debug!("Seeding every event generator from the wall clock"),
        }

        let mut manager = EventManager::new(config.auto_advance);
        let mut names = HashMap::with_capacity(config.events.len());
        for (index, spec) in config.events.iter().enumerate() {
            let event = build_event(spec, config.seed_for_event(index))?;
            let id = manager.add_event(event);
            names.insert(id, spec.name.clone());
        }

        info!(
            "Timeline initialized with {} events ({} expiring), auto_advance={}",
            manager.len(),
            config.expiring_event_count(),
            config.auto_advance
        );

        Ok(Self { config, manager, names })
    }

    /// Configuration the runner was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Manager being driven
    pub fn manager(&self) -> &EventManager {
        &self.manager
    }

    /// Mutable access to the manager, e.g. to delete events between runs
    pub fn manager_mut(&mut self) -> &mut EventManager {
        &mut self.manager
    }

    /// Register an additional event starting at the current clock
    ///
    /// An event whose name is already taken is reported as `name#2`,
    /// `name#3`, and so on, so its selections are counted separately.
    pub fn add_event(&mut self, event: Event) -> EventId {
        let label = self.unique_label(event.name());
        let id = self.manager.add_event(event);
        self.names.insert(id, label);
        id
    }

    /// Label the event with `id` is reported under
    pub fn label(&self, id: EventId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    fn unique_label(&self, name: &str) -> String {
        let taken = |candidate: &str| self.names.values().any(|label| label == candidate);
        if !taken(name) {
            return name.to_string();
        }
        (2..)
            .map(|suffix| format!("{}#{}", name, suffix))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    /// Perform the configured number of selections
    pub fn run(&mut self) -> SimulationResult<RunStatistics> {
        self.run_for(self.config.iterations)
    }

    /// Perform up to `iterations` selections
    ///
    /// The run ends early, without error, once every event has expired.
    /// With auto-advance off the runner ticks each winner itself after
    /// reading the clock delta. The reported final clock is the timestamp
    /// of the last successful selection, not of an evicted candidate.
    pub fn run_for(&mut self, iterations: usize) -> SimulationResult<RunStatistics> {
        let _span = perf_span!("timeline_run", iterations = iterations).entered();
        let start_time = Instant::now();
        let evicted_before = self.manager.evicted_count();
        let mut last_selected_clock = self.manager.clock();
        let mut statistics = RunStatistics::new(iterations, self.manager.auto_advance());

        for _ in 0..iterations {
            let id = match self.manager.next() {
                Ok(event) => event.id(),
                Err(SimulationError::EmptyManager) => {
                    sim_event!(info, "All events expired", steps = statistics.steps);
                    statistics.mark_exhausted();
                    break;
                }
                Err(e) => return Err(e),
            };

            let name = self.names.get(&id).map(String::as_str).unwrap_or("<unnamed>");
            statistics.record_step(name, self.manager.delta_ts());
            last_selected_clock = self.manager.clock();

            if !self.manager.auto_advance() {
                self.manager.advance_event(id)?;
            }
        }

        statistics.finish(
            last_selected_clock,
            self.manager.evicted_count().saturating_sub(evicted_before),
        );
        statistics.set_simulation_duration(start_time.elapsed());

        info!(
            "Run finished after {} steps at clock {:.4} ({} evicted)",
            statistics.steps, statistics.final_clock, statistics.evicted_events
        );
        Ok(statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DistributionConfig;

    fn seeded_config(seed: u64, iterations: usize) -> SimulationConfig {
        SimulationConfig {
            iterations,
            seed: Some(seed),
            events: vec![
                EventSpec::new("fast", DistributionConfig::exponential(2.0)),
                EventSpec::new("slow", DistributionConfig::uniform(0.5, 1.5)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_build_event_from_spec() {
        let spec = EventSpec::new("s", DistributionConfig::constant(2.0)).with_expire_interval(4.0);
        let event = build_event(&spec, Some(1)).unwrap();
        assert_eq!(event.name(), "s");
        assert_eq!(event.current_timestamp(), 2.0);
        assert_eq!(event.expire_boundary(), Some(6.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig { iterations: 0, ..Default::default() };
        let err = SimulationRunner::new(config).unwrap_err();
        assert!(matches!(err, SimulationError::ConfigurationError(_)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let first = SimulationRunner::new(seeded_config(99, 500)).unwrap().run().unwrap();
        let second = SimulationRunner::new(seeded_config(99, 500)).unwrap().run().unwrap();

        assert_eq!(first.steps, 500);
        assert_eq!(first.final_clock, second.final_clock);
        assert_eq!(first.selections, second.selections);
        assert_eq!(first.total_delta, second.total_delta);
    }

    #[test]
    fn test_run_stops_when_everything_expires() {
        let config = SimulationConfig {
            iterations: 100,
            events: vec![EventSpec::new("short", DistributionConfig::constant(1.0))
                .with_expire_interval(2.5)],
            ..Default::default()
        };
        let mut runner = SimulationRunner::new(config).unwrap();
        let stats = runner.run().unwrap();

        // Occurrences at 1, 2, 3; boundary 3.5 so 1, 2, 3 are selected and 4 evicts
        assert_eq!(stats.steps, 3);
        assert!(stats.exhausted);
        assert_eq!(stats.evicted_events, 1);
        assert!(runner.manager().is_empty());

        // The evicted candidate at 4 moves the manager clock but not the report
        assert_eq!(runner.manager().clock(), 4.0);
        assert_eq!(stats.final_clock, 3.0);
        assert_eq!(stats.total_delta, stats.final_clock);
    }

    #[test]
    fn test_manual_mode_runner_ticks_winner() {
        let config = SimulationConfig {
            auto_advance: false,
            iterations: 4,
            events: vec![EventSpec::new("tick", DistributionConfig::constant(1.0))],
            ..Default::default()
        };
        let stats = SimulationRunner::new(config).unwrap().run().unwrap();
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.final_clock, 4.0);
        assert_eq!(stats.min_delta, Some(1.0));
        assert_eq!(stats.max_delta, Some(1.0));
    }

    #[test]
    fn test_added_event_reported_by_name() {
        let config = SimulationConfig {
            iterations: 2,
            events: vec![EventSpec::new("base", DistributionConfig::constant(10.0))],
            ..Default::default()
        };
        let mut runner = SimulationRunner::new(config).unwrap();
        runner.add_event(Event::new("extra", || 1.0).unwrap());

        let stats = runner.run().unwrap();
        assert_eq!(stats.selections.get("extra"), Some(&2));
    }

    #[test]
    fn test_same_named_events_counted_separately() {
        let config = SimulationConfig {
            iterations: 4,
            events: vec![EventSpec::new("E", DistributionConfig::constant(1.0))],
            ..Default::default()
        };
        let mut runner = SimulationRunner::new(config).unwrap();
        let twin = runner.add_event(Event::new("E", || 1.0).unwrap());
        let third = runner.add_event(Event::new("E", || 1.0).unwrap());
        assert_eq!(runner.label(twin), Some("E#2"));
        assert_eq!(runner.label(third), Some("E#3"));

        let stats = runner.run().unwrap();
        assert_eq!(stats.selections.len(), 3);
        assert_eq!(stats.selections.values().sum::<u64>(), 4);
        assert_eq!(stats.selections.get("E"), Some(&2));
    }
}
