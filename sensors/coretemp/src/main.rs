use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tempbgline_core::format::{self, AlertStyle};
use tempbgline_core::Sensor;
use tracing_subscriber::EnvFilter;

use tempbgline_coretemp::{CoretempSensor, RenderMode, SensorScan};

const GRAPH_COLOUR: &str = "\x1b[1;34m";

#[derive(Parser)]
#[command(name = "tempbgline")]
#[command(about = "One-line Unicode bar graph of the CPU core temperatures")]
#[command(version)]
struct Args {
    /// Hardware monitor directory (auto-detect if not specified)
    #[arg(short = 'm', long = "monitor", value_name = "PATH")]
    monitor: Option<PathBuf>,

    /// Show one glyph for the average of all cores
    #[arg(short, long)]
    average: bool,

    /// Print monitor path, core count and all readings before the graph
    #[arg(short, long)]
    verbose: bool,

    /// Print Waybar JSON instead of a plain line
    #[arg(short, long, conflicts_with = "verbose")]
    json: bool,

    /// Check sensor availability and exit
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // An explicit monitor path skips discovery entirely
    let sensor = match &args.monitor {
        Some(path) => CoretempSensor::new(path),
        None => CoretempSensor::discover().context("Failed to locate the coretemp hardware monitor")?,
    };
    let mode = if args.average {
        RenderMode::Average
    } else {
        RenderMode::PerCore
    };
    let style = if args.json {
        AlertStyle::Pango
    } else {
        AlertStyle::Ansi
    };
    let mut sensor = sensor.with_mode(mode).with_alert_style(style);

    if args.check {
        match sensor.check_availability() {
            Ok(()) => {
                println!("Coretemp sensor is available");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Coretemp sensor is not available: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.json {
        let output = sensor.read()?;
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if args.verbose {
        println!(
            "\x1b[1;34mHardware Monitor: \x1b[0;36m{}\x1b[0m",
            sensor.monitor_path().display()
        );
    }

    let scan = sensor
        .scan()
        .with_context(|| format!("Failed to read {}", sensor.monitor_path().display()))?;
    let graph = sensor.render(&scan)?;

    if args.verbose {
        print_readings(&scan);
        // alerts end with a reset; switch back to the graph colour after each
        let restore = format!("{}{GRAPH_COLOUR}", format::ANSI_RESET);
        let graph = graph.replace(format::ANSI_RESET, &restore);
        println!("\x1b[1;31mGraph [{GRAPH_COLOUR}{graph}\x1b[1;31m]\x1b[0m");
    } else {
        println!("{graph}");
    }

    Ok(())
}

fn print_readings(scan: &SensorScan) {
    println!("\x1b[1;34mNumber of Cores:  \x1b[0;36m{}\x1b[0m", scan.core_count);
    println!(
        "\x1b[1;34m{:<16}{:>6}{:>9}{:>9}{:>9}\x1b[0;36m",
        "Label", "Core", "Temp", "High", "Crit"
    );
    for reading in &scan.readings {
        println!(
            "{:<16}{:>6}{:>9}{:>9}{:>9}",
            reading.label.as_deref().unwrap_or("?"),
            reading.core.to_string(),
            format::raw_value(reading.temperature),
            format::raw_value(reading.high),
            format::raw_value(reading.critical),
        );
    }
    print!("\x1b[0m");
}
