//! Knock gate daemon.
//!
//! Loads configuration, arms the raw-socket hook, and reports what the gate
//! decides for live traffic until interrupted.

use clap::Parser;
use knock_gate::config::{parse_sequence, GateConfig};
use knock_gate::hook::Sniffer;
use knock_gate::utils::logging::init_logging;
use knock_gate::{AccessGate, GateError, Result};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "knock-gated", about = "Port-knocking access gate daemon")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// TCP port to guard (overrides config)
    #[arg(long)]
    protected_port: Option<u16>,

    /// Knock window in seconds (overrides config)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Comma-separated knock sequence, e.g. 1000,2000,3000 (overrides config)
    #[arg(long)]
    sequence: Option<String>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = match &args.config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::from_env()?,
    };

    if let Some(port) = args.protected_port {
        config.protected_port = port;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = std::time::Duration::from_secs(secs);
    }
    if let Some(sequence) = &args.sequence {
        config.sequence = parse_sequence(sequence)?;
    }

    config.validate_strict()?;

    let gate = AccessGate::new(&config)?;
    info!(
        protected_port = config.protected_port,
        timeout_ms = config.timeout.as_millis() as u64,
        sequence = ?config.sequence,
        "guarding port"
    );

    let sniffer = Sniffer::open()?;

    let stop = sniffer.stop_handle();
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::Relaxed);
    })
    .map_err(|e| GateError::Custom(format!("Failed to install signal handler: {e}")))?;

    sniffer.run(&gate)?;

    let snapshot = gate.metrics().snapshot();
    info!(
        packets = snapshot.packets_total,
        forwarded = snapshot.packets_forwarded,
        dropped = snapshot.packets_dropped,
        knocks = snapshot.knocks_matched,
        opens = snapshot.gate_opened,
        resets = snapshot.window_resets,
        uptime_secs = snapshot.uptime_secs,
        "shutdown"
    );

    Ok(())
}
