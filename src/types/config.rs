//! Configuration structures for the event timeline
//!
//! This module contains the run configuration, the event specifications it
//! registers, and the validation logic applied before a run starts.

use super::OutputFormat;
use crate::events::DistributionConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults for a run with a single exponential event
pub mod defaults {
    /// Number of selections performed by a run
    pub const ITERATIONS: usize = 1_000_000;

    /// Rate of the default exponential event
    pub const EXPONENTIAL_RATE: f64 = 0.5;

    /// Name of the default event
    pub const EVENT_NAME: &str = "Event1";
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "event-timeline",
    version,
    about = "Event Timeline - Discrete-event simulation of stochastic, expiring events",
    long_about = "Runs a discrete-event timeline: at every step the event with the smallest upcoming timestamp is selected, the global clock advances to it, and expired events are evicted.

EXAMPLES:
    # Run the default exponential experiment
    event-timeline

    # Use a configuration file describing the events
    event-timeline --config timeline.json

    # Reproducible short run with JSON output
    event-timeline --iterations 1000 --seed 7 --output-format json

    # Generate configuration template
    event-timeline --print-config > timeline.json

    # Validate configuration without running
    event-timeline --config timeline.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of selections to perform
    #[arg(
        short = 'n',
        long,
        help = "Number of selections to perform",
        long_help = "Number of calls to the manager's selection step. Must be greater than 0. Default: 1000000"
    )]
    pub iterations: Option<usize>,

    /// Base seed for the event generators
    #[arg(
        long,
        help = "Random seed for reproducible results",
        long_help = "Base seed for the event generators. Event i is seeded with seed + i. When omitted every generator is seeded from the wall clock."
    )]
    pub seed: Option<u64>,

    /// Whether the manager ticks the previous winner automatically
    #[arg(long, help = "Tick the previous winner at the start of each selection (true/false)")]
    pub auto_advance: Option<bool>,

    /// Output format for the run report
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running the timeline
    #[arg(long, help = "Validate configuration without running the timeline")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// An event to register with the manager before the run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Diagnostic label of the event
    pub name: String,

    /// Distribution of the event's inter-arrival gaps
    pub distribution: DistributionConfig,

    /// Lifetime after the first occurrence; the event never expires when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_interval: Option<f64>,
}

impl EventSpec {
    /// Recurring event drawing from `distribution`
    pub fn new(name: impl Into<String>, distribution: DistributionConfig) -> Self {
        Self { name: name.into(), distribution, expire_interval: None }
    }

    /// Make the event expire `expire_interval` after its first occurrence
    pub fn with_expire_interval(mut self, expire_interval: f64) -> Self {
        self.expire_interval = Some(expire_interval);
        self
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Whether the manager ticks the previous winner automatically
    pub auto_advance: Option<bool>,

    /// Number of selections to perform
    pub iterations: Option<usize>,

    /// Base seed for the event generators
    pub seed: Option<u64>,

    /// Output format for the run report
    pub output_format: Option<String>,

    /// Events to register
    pub events: Option<Vec<EventSpec>>,
}

/// Configuration for a timeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Whether the manager ticks the previous winner automatically
    pub auto_advance: bool,

    /// Number of selections to perform
    pub iterations: usize,

    /// Base seed for the event generators
    pub seed: Option<u64>,

    /// Output format for the run report
    pub output_format: String,

    /// Events to register, in registration order
    pub events: Vec<EventSpec>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for a timeline configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Iteration count is invalid
    #[error("Iteration count must be greater than 0, got {0}")]
    InvalidIterations(usize),

    /// No events to select from
    #[error("At least one event must be configured")]
    NoEvents,

    /// Event name is blank
    #[error("Event #{0} has an empty name")]
    EmptyEventName(usize),

    /// Two configured events share a name
    #[error("Event name '{0}' is used more than once")]
    DuplicateEventName(String),

    /// Distribution parameters are invalid
    #[error("Invalid distribution for event '{event}': {reason}")]
    InvalidDistribution {
        /// Name of the event with the invalid distribution
        event: String,
        /// Why the parameters were rejected
        reason: String,
    },

    /// Expire interval is negative or not finite
    #[error("Invalid expire interval for event '{event}': {value} (must be finite and >= 0)")]
    InvalidExpireInterval {
        /// Name of the event with the invalid interval
        event: String,
        /// The invalid interval
        value: f64,
    },

    /// Output format is unknown
    #[error("{0}")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            iterations: defaults::ITERATIONS,
            seed: None,
            output_format: "text".to_string(),
            events: vec![EventSpec::new(
                defaults::EVENT_NAME,
                DistributionConfig::exponential(defaults::EXPONENTIAL_RATE),
            )],
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            auto_advance: config_file.auto_advance.unwrap_or(defaults.auto_advance),
            iterations: config_file.iterations.unwrap_or(defaults.iterations),
            seed: config_file.seed.or(defaults.seed),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            events: config_file.events.unwrap_or(defaults.events),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.auto_advance {
            config.auto_advance = value;
        }
        if let Some(value) = args.iterations {
            config.iterations = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.iterations == 0 {
            return Err(ConfigValidationError::InvalidIterations(self.iterations));
        }

        if self.events.is_empty() {
            return Err(ConfigValidationError::NoEvents);
        }

        for (index, spec) in self.events.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyEventName(index));
            }

            if self.events[..index].iter().any(|other| other.name == spec.name) {
                return Err(ConfigValidationError::DuplicateEventName(spec.name.clone()));
            }

            spec.distribution.validate().map_err(|e| {
                ConfigValidationError::InvalidDistribution {
                    event: spec.name.clone(),
                    reason: e.to_string(),
                }
            })?;

            if let Some(value) = spec.expire_interval {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigValidationError::InvalidExpireInterval {
                        event: spec.name.clone(),
                        value,
                    });
                }
            }
        }

        self.get_output_format().map_err(ConfigValidationError::InvalidOutputFormat)?;

        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Seed for the generator of the event at `index`
    ///
    /// Consecutive events get consecutive seeds so their streams are
    /// independent yet reproducible. `None` means seed from the wall clock.
    pub fn seed_for_event(&self, index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index as u64))
    }

    /// Number of configured events that expire
    pub fn expiring_event_count(&self) -> usize {
        self.events.iter().filter(|spec| spec.expire_interval.is_some()).count()
    }
}
