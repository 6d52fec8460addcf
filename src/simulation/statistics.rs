//! Run statistics collection and reporting
//!
//! This module summarises a driver run: how many selections happened, which
//! events won them, how many events expired, and the spread of the clock
//! deltas observed after each selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::simulation::SimulationResult;

/// Summary of one driver run over an event manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Number of selections the run was asked to perform
    pub requested_iterations: usize,
    /// Number of selections actually performed
    pub steps: usize,
    /// Whether the run stopped early because every event expired
    pub exhausted: bool,
    /// Whether the manager ran in auto-advance mode
    pub auto_advance: bool,
    /// Selections won per event name
    pub selections: BTreeMap<String, u64>,
    /// Events evicted on expiry during the run
    pub evicted_events: usize,
    /// Clock at the last successful selection
    pub final_clock: f64,
    /// Smallest clock delta observed
    pub min_delta: Option<f64>,
    /// Largest clock delta observed
    pub max_delta: Option<f64>,
    /// Sum of all clock deltas observed
    pub total_delta: f64,
    /// Wall-clock duration of the run
    pub simulation_duration: Duration,
}

impl RunStatistics {
    /// Create empty statistics for a run of `requested_iterations` selections
    pub fn new(requested_iterations: usize, auto_advance: bool) -> Self {
        Self {
            requested_iterations,
            steps: 0,
            exhausted: false,
            auto_advance,
            selections: BTreeMap::new(),
            evicted_events: 0,
            final_clock: 0.0,
            min_delta: None,
            max_delta: None,
            total_delta: 0.0,
            simulation_duration: Duration::from_secs(0),
        }
    }

    /// Record one successful selection and the clock delta read after it
    pub fn record_step(&mut self, event_name: &str, delta: f64) {
        self.steps += 1;
        self.total_delta += delta;
        self.min_delta = Some(self.min_delta.map_or(delta, |min| min.min(delta)));
        self.max_delta = Some(self.max_delta.map_or(delta, |max| max.max(delta)));

        match self.selections.get_mut(event_name) {
            Some(count) => *count += 1,
            None => {
                self.selections.insert(event_name.to_string(), 1);
            }
        }
    }

    /// Mark the run as stopped because no live events remained
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Record the end state of the manager
    pub fn finish(&mut self, final_clock: f64, evicted_events: usize) {
        self.final_clock = final_clock;
        self.evicted_events = evicted_events;
    }

    /// Set the wall-clock duration of the run
    pub fn set_simulation_duration(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Mean clock delta, zero when nothing was selected
    pub fn mean_delta(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total_delta / self.steps as f64
        }
    }

    /// Selections per unit of simulated time
    pub fn selection_rate(&self) -> f64 {
        if self.final_clock > 0.0 {
            self.steps as f64 / self.final_clock
        } else {
            0.0
        }
    }

    /// Share of selections won by `event_name`, as a percentage
    pub fn selection_percentage(&self, event_name: &str) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        let wins = self.selections.get(event_name).copied().unwrap_or(0);
        wins as f64 / self.steps as f64 * 100.0
    }

    /// Serialize the statistics as pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the human-readable run report
    pub fn generate_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Event Timeline Run Complete\n");
        output.push_str("===========================\n\n");

        output.push_str("Run Summary:\n");
        output.push_str(&format!(
            "   Steps: {} of {} requested{}\n",
            self.steps,
            self.requested_iterations,
            if self.exhausted { " (all events expired)" } else { "" }
        ));
        output.push_str(&format!(
            "   Mode: {}\n",
            if self.auto_advance { "auto-advance" } else { "manual advance" }
        ));
        output.push_str(&format!("   Final Clock: {:.4}\n", self.final_clock));
        output.push_str(&format!("   Evicted Events: {}\n", self.evicted_events));
        output.push_str(&format!(
            "   Duration: {:.2} seconds\n\n",
            self.simulation_duration.as_secs_f64()
        ));

        output.push_str("Clock Deltas:\n");
        match (self.min_delta, self.max_delta) {
            (Some(min), Some(max)) => {
                output.push_str(&format!("   Mean: {:.4}\n", self.mean_delta()));
                output.push_str(&format!("   Min:  {:.4}\n", min));
                output.push_str(&format!("   Max:  {:.4}\n", max));
                output.push_str(&format!(
                    "   Selection Rate: {:.4} per time unit\n\n",
                    self.selection_rate()
                ));
            }
            _ => output.push_str("   No selections recorded\n\n"),
        }

        if !self.selections.is_empty() {
            output.push_str("Selections by Event:\n");
            for (name, wins) in &self.selections {
                output.push_str(&format!(
                    "   {}: {} ({:.1}%)\n",
                    name,
                    wins,
                    self.selection_percentage(name)
                ));
            }
        }

        output
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics_are_empty() {
        let stats = RunStatistics::new(10, true);
        assert_eq!(stats.requested_iterations, 10);
        assert_eq!(stats.steps, 0);
        assert!(!stats.exhausted);
        assert!(stats.min_delta.is_none());
        assert_eq!(stats.mean_delta(), 0.0);
        assert_eq!(stats.selection_rate(), 0.0);
        assert_eq!(stats.selection_percentage("anything"), 0.0);
    }

    #[test]
    fn test_record_step_tracks_deltas_and_winners() {
        let mut stats = RunStatistics::new(4, false);
        stats.record_step("a", 1.0);
        stats.record_step("b", 3.0);
        stats.record_step("a", 2.0);

        assert_eq!(stats.steps, 3);
        assert_eq!(stats.min_delta, Some(1.0));
        assert_eq!(stats.max_delta, Some(3.0));
        assert_eq!(stats.mean_delta(), 2.0);
        assert_eq!(stats.selections.get("a"), Some(&2));
        assert_eq!(stats.selections.get("b"), Some(&1));
        assert!((stats.selection_percentage("a") - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_finish_and_rate() {
        let mut stats = RunStatistics::new(2, true);
        stats.record_step("a", 2.0);
        stats.record_step("a", 2.0);
        stats.finish(4.0, 1);

        assert_eq!(stats.final_clock, 4.0);
        assert_eq!(stats.evicted_events, 1);
        assert_eq!(stats.selection_rate(), 0.5);
    }

    #[test]
    fn test_report_mentions_exhaustion() {
        let mut stats = RunStatistics::new(100, true);
        stats.record_step("session", 1.0);
        stats.mark_exhausted();
        stats.finish(1.0, 1);

        let report = stats.generate_report();
        assert!(report.contains("Steps: 1 of 100 requested (all events expired)"));
        assert!(report.contains("session: 1 (100.0%)"));
        assert!(report.contains("Evicted Events: 1"));
    }

    #[test]
    fn test_report_without_selections() {
        let stats = RunStatistics::new(5, false);
        assert!(stats.to_string().contains("No selections recorded"));
    }

    #[test]
    fn test_json_output() {
        let mut stats = RunStatistics::new(1, true);
        stats.record_step("a", 0.5);
        let json: SimulationResult<String> = stats.to_json();
        let parsed: RunStatistics = serde_json::from_str(&json.unwrap()).unwrap();
        assert_eq!(parsed.steps, 1);
        assert_eq!(parsed.selections.get("a"), Some(&1));
    }
}
