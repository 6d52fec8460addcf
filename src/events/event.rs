//! Timeline events
//!
//! An [`Event`] owns a draw source and the two most recent points of its own
//! timeline. Expiring events additionally carry an absolute boundary after
//! which the manager evicts them.

use std::cmp::Ordering;
use std::fmt;

use super::generator::DrawSource;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{EventId, EventKind};

/// A stochastic event that regenerates its own next occurrence time
pub struct Event {
    id: EventId,
    name: String,
    source: Box<dyn DrawSource>,
    current_timestamp: f64,
    previous_timestamp: f64,
    expire_boundary: Option<f64>,
}

impl Event {
    /// Create a recurring event
    ///
    /// The first occurrence is seeded with one draw from `source`; the
    /// previous timestamp starts at zero.
    pub fn new<S>(name: impl Into<String>, source: S) -> SimulationResult<Self>
    where
        S: DrawSource + 'static,
    {
        let name = name.into();
        let mut source: Box<dyn DrawSource> = Box::new(source);
        let first = checked_draw(&name, source.as_mut())?;

        Ok(Self {
            id: EventId::new(),
            name,
            source,
            current_timestamp: first,
            previous_timestamp: 0.0,
            expire_boundary: None,
        })
    }

    /// Create an event that expires `expire_interval` after its first occurrence
    pub fn expiring<S>(
        name: impl Into<String>,
        expire_interval: f64,
        source: S,
    ) -> SimulationResult<Self>
    where
        S: DrawSource + 'static,
    {
        let name = name.into();
        if !expire_interval.is_finite() || expire_interval < 0.0 {
            return Err(SimulationError::type_constraint(format!(
                "expire interval for event '{}' must be a non-negative finite number, got {}",
                name, expire_interval
            )));
        }

        let mut event = Self::new(name, source)?;
        event.expire_boundary = Some(event.current_timestamp + expire_interval);
        Ok(event)
    }

    /// Unique identity of this event
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Diagnostic label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next scheduled occurrence on the global timeline
    pub fn current_timestamp(&self) -> f64 {
        self.current_timestamp
    }

    /// Occurrence before the current one
    pub fn previous_timestamp(&self) -> f64 {
        self.previous_timestamp
    }

    /// Absolute expiry threshold, if this event expires
    pub fn expire_boundary(&self) -> Option<f64> {
        self.expire_boundary
    }

    /// Whether this event carries an expire boundary
    pub fn is_expiring(&self) -> bool {
        self.expire_boundary.is_some()
    }

    /// Whether the current occurrence has reached the expire boundary
    pub fn is_expired(&self) -> bool {
        matches!(self.expire_boundary, Some(boundary) if self.current_timestamp >= boundary)
    }

    /// Recurring or expiring
    pub fn kind(&self) -> EventKind {
        if self.is_expiring() {
            EventKind::Expiring
        } else {
            EventKind::Recurring
        }
    }

    /// Move to the next occurrence and return its timestamp
    pub fn advance(&mut self) -> SimulationResult<f64> {
        let gap = checked_draw(&self.name, self.source.as_mut())?;
        self.previous_timestamp = self.current_timestamp;
        self.current_timestamp += gap;
        Ok(self.current_timestamp)
    }

    /// Shift the timeline origin by `ts`
    ///
    /// Used once at registration so a fresh event starts relative to the
    /// manager's clock. The expire boundary moves with it.
    pub fn offset_origin(&mut self, ts: f64) {
        self.current_timestamp += ts;
        if let Some(boundary) = self.expire_boundary.as_mut() {
            *boundary += ts;
        }
    }

    /// Most recent inter-arrival gap of this event
    pub fn interval(&self) -> f64 {
        self.current_timestamp - self.previous_timestamp
    }
}

/// Order two events by their current timestamp
///
/// Name, identity and draw source play no part in the comparison.
pub fn compare_timestamps(a: &Event, b: &Event) -> Ordering {
    a.current_timestamp.total_cmp(&b.current_timestamp)
}

fn checked_draw(name: &str, source: &mut dyn DrawSource) -> SimulationResult<f64> {
    let value = source.draw();
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::type_constraint(format!(
            "draw source for event '{}' produced {}, expected a non-negative finite duration",
            name, value
        )));
    }
    Ok(value)
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("current_timestamp", &self.current_timestamp)
            .field("previous_timestamp", &self.previous_timestamp)
            .field("expire_boundary", &self.expire_boundary)
            .finish()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.name, self.current_timestamp)
    }
}
