//! MAU stage model CLI.
//!
//! This binary drives the model from files. It performs:
//! 1. **Run:** Replays a register script, sends one PHV image into a port, and
//!    prints the output PHV image and stage statistics.
//! 2. **Decode:** Prints the register-map path of a raw register or memory address.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use mausim_core::common::{LogFlags, MemAddr, RegAddr};
use mausim_core::config::Config;
use mausim_core::regs::{MauMemAddr, MauRegAddr};
use mausim_core::sim::{Model, PhvImage, RegisterScript};

#[derive(Parser, Debug)]
#[command(
    name = "mausim",
    author,
    version,
    about = "MAU stage model",
    long_about = "Replay register scripts against the MAU stage model and run PHVs through it.\n\nExamples:\n  mausim run --script stash.json --phv packet.json\n  mausim run --script stash.json --phv packet.json --port 1 --log-flags 0x1f\n  mausim decode 0x00c0000d"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a register script and process one PHV.
    Run {
        /// Register script (JSON).
        #[arg(short, long)]
        script: PathBuf,

        /// Input PHV image (JSON).
        #[arg(short, long)]
        phv: PathBuf,

        /// Model configuration (JSON); built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Ingress port id (`pipe << 7 | local`).
        #[arg(long, default_value_t = 0)]
        port: u16,

        /// Diagnostic categories, overriding the configuration (bits within 0x1f).
        #[arg(long, value_parser = parse_log_flags)]
        log_flags: Option<LogFlags>,

        /// Print stage statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print the register-map path of a raw address.
    Decode {
        /// Address, decimal or `0x` hex.
        #[arg(value_parser = parse_u64)]
        addr: u64,

        /// Treat the address as a wide-memory address.
        #[arg(long)]
        mem: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run {
            script,
            phv,
            config,
            port,
            log_flags,
            stats,
        } => cmd_run(&script, &phv, config.as_deref(), port, log_flags, stats),
        Commands::Decode { addr, mem } => cmd_decode(addr, mem),
    };
    if let Err(e) = outcome {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

fn parse_log_flags(s: &str) -> Result<LogFlags, String> {
    let bits = u32::try_from(parse_u64(s)?).map_err(|_| format!("log flags '{s}' exceed 32 bits"))?;
    LogFlags::from_bits(bits).ok_or_else(|| {
        format!(
            "log flags '{s}' set unknown bits {:#x} (known: {:#x})",
            bits & !LogFlags::ALL.0,
            LogFlags::ALL.0
        )
    })
}

/// Builds the model, replays the script, and runs the PHV through the port.
fn cmd_run(
    script: &std::path::Path,
    phv: &std::path::Path,
    config: Option<&std::path::Path>,
    port: u16,
    log_flags: Option<LogFlags>,
    print_stats: bool,
) -> mausim_core::Result<()> {
    let config = match config {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let mut model = Model::new(config)?;
    if let Some(flags) = log_flags {
        model.set_log_flags(flags);
    }

    let script = RegisterScript::load(script)?;
    let applied = script.apply(&mut model)?;
    tracing::info!(applied, "register script replayed");

    let image = PhvImage::load(phv)?;
    let port = model.port(port)?;
    let out = model.process(&port, &image.to_phv())?;
    println!("{}", PhvImage::from_phv(&out).to_json()?);

    if print_stats {
        model.stats().print();
    }
    Ok(())
}

/// Decodes a raw address and prints its path.
fn cmd_decode(addr: u64, mem: bool) -> mausim_core::Result<()> {
    if !mem {
        if let Ok(raw) = u32::try_from(addr) {
            let reg = MauRegAddr::decode(RegAddr(raw))?;
            println!("{reg}");
            return Ok(());
        }
    }
    let target = MauMemAddr::decode(MemAddr(addr))?;
    println!("{target}");
    Ok(())
}
