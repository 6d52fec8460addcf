//! Distribution parameters for random draw sources
//!
//! Each distribution family gets an immutable parameter set that is bound
//! once when a draw source is built. Only non-negative durations are valid
//! timeline increments, so every family is validated against that.

use rand::Rng;
use rand_distr::{Distribution, Exp, Uniform};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::{SimulationError, SimulationResult};

/// Parameters of the distribution an event draws its inter-arrival gaps from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionConfig {
    /// Exponential inter-arrival times with the given rate (mean `1 / rate`)
    Exponential {
        /// Events per unit of simulated time, must be positive
        rate: f64,
    },
    /// Uniform inter-arrival times in `[low, high)`
    Uniform {
        /// Inclusive lower bound, must be non-negative
        low: f64,
        /// Exclusive upper bound, must be greater than `low`
        high: f64,
    },
    /// Fixed inter-arrival time
    Constant {
        /// Gap added on every draw, must be non-negative
        value: f64,
    },
}

impl DistributionConfig {
    /// Exponential distribution with the given rate
    pub fn exponential(rate: f64) -> Self {
        Self::Exponential { rate }
    }

    /// Uniform distribution over `[low, high)`
    pub fn uniform(low: f64, high: f64) -> Self {
        Self::Uniform { low, high }
    }

    /// Degenerate distribution that always yields `value`
    pub fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Check that the parameters describe a source of finite non-negative draws
    pub fn validate(&self) -> SimulationResult<()> {
        match *self {
            Self::Exponential { rate } => {
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(SimulationError::type_constraint(format!(
                        "exponential rate must be a positive finite number, got {}",
                        rate
                    )));
                }
            }
            Self::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low < 0.0 || low >= high {
                    return Err(SimulationError::type_constraint(format!(
                        "uniform bounds must satisfy 0 <= low < high, got [{}, {})",
                        low, high
                    )));
                }
            }
            Self::Constant { value } => {
                if !value.is_finite() || value < 0.0 {
                    return Err(SimulationError::type_constraint(format!(
                        "constant gap must be a non-negative finite number, got {}",
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Expected value of a single draw
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Exponential { rate } => 1.0 / rate,
            Self::Uniform { low, high } => (low + high) / 2.0,
            Self::Constant { value } => value,
        }
    }

    /// Build the sampler bound to these parameters
    pub(crate) fn sampler(&self) -> SimulationResult<Sampler> {
        self.validate()?;
        let sampler = match *self {
            Self::Exponential { rate } => Sampler::Exponential(
                Exp::new(rate).map_err(|e| SimulationError::type_constraint(e.to_string()))?,
            ),
            Self::Uniform { low, high } => Sampler::Uniform(Uniform::new(low, high)),
            Self::Constant { value } => Sampler::Constant(value),
        };
        Ok(sampler)
    }
}

impl fmt::Display for DistributionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exponential { rate } => write!(f, "exponential(rate={})", rate),
            Self::Uniform { low, high } => write!(f, "uniform(low={}, high={})", low, high),
            Self::Constant { value } => write!(f, "constant(value={})", value),
        }
    }
}

/// Distribution with its parameters already bound
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sampler {
    Exponential(Exp<f64>),
    Uniform(Uniform<f64>),
    Constant(f64),
}

impl Sampler {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Exponential(dist) => dist.sample(rng),
            Self::Uniform(dist) => dist.sample(rng),
            Self::Constant(value) => *value,
        }
    }
}
