//! Event selection and the global simulation clock
//!
//! The [`EventManager`] owns every registered event. Each call to
//! [`EventManager::next`] picks the live event with the smallest upcoming
//! timestamp, moves the clock to it, and evicts expired candidates on the
//! way.
//!
//! Ties between equal timestamps go to the earliest registered event.

use tracing::{debug, instrument, warn};

use crate::events::{compare_timestamps, Event};
use crate::sim_event;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::EventId;

/// Owner of the timeline's events and of the global clock
#[derive(Debug)]
pub struct EventManager {
    /// Registered events in insertion order
    events: Vec<Event>,
    /// Timestamp of the most recent selection
    clock: f64,
    /// Clock value before the most recent selection
    previous_clock: f64,
    /// Tick the previous winner at the start of the next selection
    auto_advance: bool,
    /// Most recently returned event (auto-advance mode only)
    last_selected: Option<EventId>,
    /// Number of events evicted on expiry since construction or `clear`
    evicted: usize,
}

impl EventManager {
    /// Create an empty manager
    pub fn new(auto_advance: bool) -> Self {
        Self {
            events: Vec::new(),
            clock: 0.0,
            previous_clock: 0.0,
            auto_advance,
            last_selected: None,
            evicted: 0,
        }
    }

    /// Register an event whose timeline starts at the current clock
    pub fn add_event(&mut self, mut event: Event) -> EventId {
        event.offset_origin(self.clock);
        let id = event.id();
        debug!(
            "Registered event {} ({}) at clock {}, first occurrence {}",
            event.name(),
            id,
            self.clock,
            event.current_timestamp()
        );
        self.events.push(event);
        id
    }

    /// Remove a registered event and hand it back
    pub fn del_event(&mut self, id: EventId) -> SimulationResult<Event> {
        let index = self
            .events
            .iter()
            .position(|event| event.id() == id)
            .ok_or(SimulationError::EventNotFound(id))?;
        Ok(self.events.remove(index))
    }

    /// Select the live event with the smallest upcoming timestamp
    ///
    /// In auto-advance mode the previous winner is ticked first, so the
    /// returned event keeps its selection-time timestamps until the following
    /// call. Expired candidates are evicted and selection is retried; the
    /// clock follows every candidate examined. Evictions are not rolled back
    /// when the loop ends with [`SimulationError::EmptyManager`].
    #[instrument(level = "trace", skip(self), fields(clock = self.clock))]
    pub fn next(&mut self) -> SimulationResult<&Event> {
        if self.auto_advance {
            self.advance_last_selected()?;
        }

        let winner = loop {
            let index = self.min_index().ok_or(SimulationError::EmptyManager)?;
            let candidate = &self.events[index];
            let timestamp = candidate.current_timestamp();
            let expired = candidate.is_expired();

            self.previous_clock = self.clock;
            self.clock = timestamp;

            if !expired {
                break index;
            }

            let evicted = self.events.remove(index);
            self.evicted += 1;
            sim_event!(
                debug,
                "Evicted expired event",
                event = evicted.name(),
                timestamp = timestamp,
                remaining = self.events.len(),
            );
        };

        if self.auto_advance {
            self.last_selected = Some(self.events[winner].id());
        }
        Ok(&self.events[winner])
    }

    /// Advance a registered event explicitly and return its new timestamp
    ///
    /// This is how a caller ticks the winner when auto-advance is off.
    pub fn advance_event(&mut self, id: EventId) -> SimulationResult<f64> {
        self.get_mut(id).ok_or(SimulationError::EventNotFound(id))?.advance()
    }

    /// Gap between the two most recent clock values
    pub fn delta_ts(&self) -> f64 {
        self.clock - self.previous_clock
    }

    /// Drop all events and reset the clock
    ///
    /// `last_selected` survives a clear. A deferred tick aimed at an event
    /// that is no longer registered is skipped.
    pub fn clear(&mut self) {
        debug!("Clearing {} events at clock {}", self.events.len(), self.clock);
        self.events.clear();
        self.clock = 0.0;
        self.previous_clock = 0.0;
        self.evicted = 0;
    }

    /// Global simulation time
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Clock value before the most recent selection
    pub fn previous_clock(&self) -> f64 {
        self.previous_clock
    }

    /// Whether the previous winner is ticked automatically
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    /// Most recently returned event, tracked in auto-advance mode
    pub fn last_selected(&self) -> Option<EventId> {
        self.last_selected
    }

    /// Number of registered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are registered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Registered events in insertion order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up a registered event
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    /// Look up a registered event mutably
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|event| event.id() == id)
    }

    /// Events evicted on expiry since construction or the last `clear`
    pub fn evicted_count(&self) -> usize {
        self.evicted
    }

    fn advance_last_selected(&mut self) -> SimulationResult<()> {
        let Some(id) = self.last_selected else {
            return Ok(());
        };
        match self.get_mut(id) {
            Some(event) => {
                event.advance()?;
            }
            None => {
                warn!("Deferred tick skipped: event {} is no longer registered", id);
            }
        }
        Ok(())
    }

    /// Index of the earliest event, first registered on ties
    fn min_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, event) in self.events.iter().enumerate() {
            match best {
                Some(current) if compare_timestamps(event, &self.events[current]).is_ge() => {}
                _ => best = Some(index),
            }
        }
        best
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(false)
    }
}
