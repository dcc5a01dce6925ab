//! VidShield command-line tool
//!
//! Inspects and resets the device identity of this machine, and previews
//! watermark motion without a browser.
//!
//! Usage:
//!   vidshield device show --signals
//!   vidshield device regenerate
//!   vidshield watermark preview --email viewer@example.com --ticks 10

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vidshield_cli::{open_identity_store, preview_watermark, VidshieldConfig};
use vidshield_device::{collect_all, IdentityOrigin, NativeProbe};
use vidshield_player::WatermarkData;

#[derive(Parser, Debug)]
#[command(name = "vidshield")]
#[command(about = "VidShield device identity and watermark tooling")]
struct Args {
    /// JSON settings file with `identity` and `player` sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Identity store file (defaults to the platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or reset the device identity
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Watermark overlay tools
    #[command(subcommand)]
    Watermark(WatermarkCommand),
}

#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// Print the device id, generating one on first use
    Show {
        /// Also print every collected signal
        #[arg(long)]
        signals: bool,
    },
    /// Forget the stored device id
    Clear,
    /// Replace the stored device id with a fresh one
    Regenerate,
}

#[derive(Subcommand, Debug)]
enum WatermarkCommand {
    /// Mount a headless player and print each overlay render
    Preview {
        /// Viewer email shown in the overlay
        #[arg(long)]
        email: Option<String>,

        /// Viewer phone shown in the overlay
        #[arg(long)]
        phone: Option<String>,

        /// Number of repositioning ticks to wait for
        #[arg(long, default_value = "5")]
        ticks: usize,

        /// Render at fullscreen scale
        #[arg(long)]
        fullscreen: bool,

        /// Override the repositioning interval
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = VidshieldConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Device(command) => run_device(command, args.store, config),
        Command::Watermark(command) => run_watermark(command, config).await,
    }
}

fn run_device(
    command: DeviceCommand,
    store: Option<PathBuf>,
    config: VidshieldConfig,
) -> Result<()> {
    let store = open_identity_store(store, config.identity)?;

    match command {
        DeviceCommand::Show { signals } => {
            let identity = store.get_or_create();
            let origin = match identity.origin {
                IdentityOrigin::Stored => "stored",
                IdentityOrigin::Generated => "generated",
            };
            println!("{} ({origin})", identity.id);
            if signals {
                for signal in collect_all(&NativeProbe::new()) {
                    println!("  {:<20} {}", signal.kind.to_string(), signal.value);
                }
            }
        }
        DeviceCommand::Clear => {
            store.clear();
            info!("device id cleared");
        }
        DeviceCommand::Regenerate => {
            println!("{}", store.regenerate().id);
        }
    }
    Ok(())
}

async fn run_watermark(command: WatermarkCommand, config: VidshieldConfig) -> Result<()> {
    match command {
        WatermarkCommand::Preview {
            email,
            phone,
            ticks,
            fullscreen,
            interval_ms,
        } => {
            let mut player = config.player;
            if let Some(ms) = interval_ms {
                player.reposition_interval_ms = ms;
            }
            let data = WatermarkData { email, phone };
            info!(
                "previewing {ticks} ticks every {:?}",
                player.reposition_interval()
            );
            preview_watermark(data, player, ticks, fullscreen, |index, render| {
                println!(
                    "#{index:<3} x={:>6.2}% y={:>6.2}%  {}",
                    render.state.position_x,
                    render.state.position_y,
                    render.style.css(&render.state)
                );
            })
            .await?;
        }
    }
    Ok(())
}
