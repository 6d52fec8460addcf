// Event Timeline - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/event-timeline
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/event-timeline --config timeline.json --iterations 50000 --seed 7 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use event_timeline::simulation::{LoggingConfig, RunStatistics, SimulationRunner};
use event_timeline::types::{CliArgs, OutputFormat, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Event Timeline");

    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    let output_format = match config.get_output_format() {
        Ok(format) => format,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - timeline will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    let statistics = match run_timeline(config) {
        Ok(statistics) => statistics,
        Err(e) => {
            error!("Timeline run failed: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_statistics(&statistics, output_format) {
        error!("Failed to write run report: {:#}", e);
        process::exit(1);
    }

    info!("Event Timeline completed successfully");
}

/// Build the runner and perform the configured selections
fn run_timeline(config: SimulationConfig) -> anyhow::Result<RunStatistics> {
    let mut runner = SimulationRunner::new(config).context("Failed to initialize timeline")?;

    eprintln!("Running {} selections...", runner.config().iterations);
    runner.run().context("Selection loop failed")
}

fn print_statistics(statistics: &RunStatistics, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", statistics.generate_report()),
        OutputFormat::Json => {
            let json = statistics.to_json().context("Failed to serialize statistics")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Event Timeline");
    eprintln!("==============");
    eprintln!("A stochastic discrete-event timeline");
    eprintln!();

    print_configuration_summary(config);
}

fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Iterations: {}", config.iterations);
    eprintln!("  Auto Advance: {}", config.auto_advance);
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    eprintln!("\nEvents ({} expiring):", config.expiring_event_count());
    for spec in &config.events {
        let expiry = match spec.expire_interval {
            Some(interval) => format!(", expires after {}", interval),
            None => String::new(),
        };
        eprintln!(
            "  {}: {} (mean interval {:.4}{})",
            spec.name,
            spec.distribution,
            spec.distribution.mean(),
            expiry
        );
    }
    eprintln!();
}
