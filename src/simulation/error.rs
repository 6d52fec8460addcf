//! Error types and handling
//!
//! This module contains the error taxonomy of the event timeline. Nothing is
//! retried: every operation is deterministic given its draw sequence, so
//! errors are surfaced to the caller as soon as they occur.

use thiserror::Error;

use crate::types::EventId;

/// Errors that can occur while building or running a timeline
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A draw source or its parameters violate the draw capability contract
    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    /// Selection was requested with no live events remaining
    #[error("Event manager has no live events to select from")]
    EmptyManager,

    /// The requested event is not registered with the manager
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Run statistics could not be rendered as JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a type constraint error
    pub fn type_constraint(msg: impl Into<String>) -> Self {
        Self::TypeConstraint(msg.into())
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Check if the caller can keep using the manager after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::TypeConstraint(_) => false,
            SimulationError::EmptyManager => true,
            SimulationError::EventNotFound(_) => true,
            SimulationError::ConfigurationError(_) => false,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::TypeConstraint(_) => "Type Constraint",
            SimulationError::EmptyManager => "Empty Manager",
            SimulationError::EventNotFound(_) => "Lookup",
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for timeline operations
pub type SimulationResult<T> = Result<T, SimulationError>;
