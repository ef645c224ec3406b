use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use audiobridge_core::setup::validate;
use audiobridge_core::{
    BridgeAddress, BridgeClient, BridgeConfig, BridgeHub, BridgeReport, Entity, HttpBridgeClient, DEFAULT_NAME,
    DEFAULT_PORT,
};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::time::{interval_at, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Debug, Parser)]
#[command(name = "audiobridgectl")]
#[command(about = "Poll and control a macOS audio bridge over its HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long)]
    host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,

    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    #[arg(long, default_value_t = 10_000)]
    interval_ms: u64,

    #[arg(long, default_value_t = 10)]
    volume_step: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate connectivity the way setup does.
    Check,
    Status {
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    Watch {
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    Devices,
    Volume {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    VolumeUp,
    VolumeDown,
    Mute {
        #[arg(action = clap::ArgAction::Set)]
        muted: bool,
    },
    Media {
        #[arg(value_enum)]
        action: MediaCommand,
    },
    Seek {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
    Shuffle {
        #[arg(value_enum)]
        state: Toggle,
    },
    Repeat {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Show or switch the output device.
    Output {
        name: Option<String>,
    },
    /// Show or switch the input device.
    Input {
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediaCommand {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    PlayPause,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = BridgeConfig::new(BridgeAddress::new(cli.host.clone(), cli.port))
        .with_name(cli.name.clone())
        .with_request_timeout(Duration::from_millis(cli.timeout_ms));
    config.poll_interval = Duration::from_millis(cli.interval_ms);
    config.volume_step = cli.volume_step;

    let client = Arc::new(HttpBridgeClient::from_config(&config)?);

    if let Command::Check = cli.command {
        return match validate(client.as_ref(), &config).await {
            Ok(validated) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "unique_id": validated.unique_id,
                        "title": validated.title,
                        "status": validated.status,
                    }))?
                );
                Ok(())
            }
            Err(err) => bail!("{}: {err}", err.code()),
        };
    }

    let mut hub = BridgeHub::new(config, client);

    match cli.command {
        Command::Check => {}
        Command::Status { format } => {
            hub.refresh_all().await;
            print_report(&hub.report(), format)?;
        }
        Command::Watch { format } => {
            stream_loop(&mut hub, format).await?;
        }
        Command::Devices => {
            print!("{}", list_devices(&mut hub).await?);
        }
        Command::Volume { percent } => {
            hub.media_player.set_volume_percent(percent).await?;
            println!("volume set to {percent}%");
        }
        Command::VolumeUp => {
            hub.media_player.refresh().await;
            ensure_available(&hub.media_player)?;
            hub.media_player.volume_up().await?;
            println!("volume {}%", hub.media_player.status().volume_percent);
        }
        Command::VolumeDown => {
            hub.media_player.refresh().await;
            ensure_available(&hub.media_player)?;
            hub.media_player.volume_down().await?;
            println!("volume {}%", hub.media_player.status().volume_percent);
        }
        Command::Mute { muted } => {
            hub.media_player.mute_volume(muted).await?;
            println!("muted={muted}");
        }
        Command::Media { action } => {
            let player = &mut hub.media_player;
            match action {
                MediaCommand::Play => player.media_play().await?,
                MediaCommand::Pause => player.media_pause().await?,
                MediaCommand::Stop => player.media_stop().await?,
                MediaCommand::Next => player.media_next_track().await?,
                MediaCommand::Previous => player.media_previous_track().await?,
                MediaCommand::PlayPause => player.media_play_pause().await?,
            }
            println!("{action:?} sent; state={:?}", player.player_state());
        }
        Command::Seek { seconds } => {
            hub.media_player.media_seek(seconds).await?;
            println!("seeked to {seconds:.0}s");
        }
        Command::Shuffle { state } => {
            match state {
                Toggle::On => hub.shuffle.turn_on().await?,
                Toggle::Off => hub.shuffle.turn_off().await?,
            }
            println!("shuffle={}", hub.shuffle.is_on());
        }
        Command::Repeat { state } => {
            match state {
                Toggle::On => hub.repeat.turn_on().await?,
                Toggle::Off => hub.repeat.turn_off().await?,
            }
            println!("repeat={}", hub.repeat.is_on());
        }
        Command::Output { name } => {
            let select = &mut hub.output_select;
            match name {
                Some(name) => select.select_option(&name).await?,
                None => {
                    select.refresh().await;
                    ensure_available(&*select)?;
                }
            }
            println!("output: {}", select.current_option().unwrap_or("Unknown"));
        }
        Command::Input { name } => {
            let select = &mut hub.input_select;
            match name {
                Some(name) => select.select_option(&name).await?,
                None => {
                    select.refresh().await;
                    ensure_available(&*select)?;
                }
            }
            println!("input: {}", select.current_option().unwrap_or("Unknown"));
        }
    }

    Ok(())
}

async fn list_devices<C: BridgeClient>(hub: &mut BridgeHub<C>) -> Result<String> {
    hub.output_select.refresh().await;
    hub.input_select.refresh().await;
    ensure_available(&hub.output_select)?;
    ensure_available(&hub.input_select)?;
    Ok(format!(
        "Outputs: {}\nInputs:  {}\n",
        hub.output_select.options().join(", "),
        hub.input_select.options().join(", ")
    ))
}

fn ensure_available(entity: &dyn Entity) -> Result<()> {
    if entity.available() {
        return Ok(());
    }
    let reason = entity
        .availability()
        .last_failure
        .clone()
        .unwrap_or_else(|| "unknown".to_string());
    bail!("{} unavailable: {reason}", entity.name())
}

async fn stream_loop(hub: &mut BridgeHub<HttpBridgeClient>, format: OutputFormat) -> Result<()> {
    let period = hub.config().poll_interval;
    let mut ticker = interval_at(Instant::now() + Duration::from_millis(50), period);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                warn!("received ctrl-c, stopping");
                break;
            }
            _ = ticker.tick() => {
                hub.refresh_all().await;
                let report = hub.report();
                print_report(&report, format)?;
                let available = report.entities.iter().filter(|e| e.availability.available).count();
                info!(available, total = report.entities.len(), "tick");
            }
        }
    }

    Ok(())
}

fn print_report(report: &BridgeReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Ndjson => {
            println!("{}", serde_json::to_string(report)?);
        }
        OutputFormat::Human => {
            print!("{}", render::human(report));
        }
    }

    Ok(())
}
