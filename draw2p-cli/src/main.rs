mod clipboard;
mod command;
mod observer;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Select;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use draw2p_core::capture::{CanvasRect, ScrollOffset, StrokeRecorder};
use draw2p_core::{
    Brush, DEFAULT_COLOR, DEFAULT_LINE_WIDTH, IceServerConfig, Palette, Stage, TransportEncoding,
};
use draw2p_peer::{Session, SessionConfig, SessionError, TransportConfig};

use clipboard::{Clipboard, TerminalClipboard};
use command::{Command, HELP, parse_command};
use observer::TerminalObserver;

const CHANNEL_OPEN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "draw2p", version)]
#[command(about = "Draw together over a WebRTC data channel signaled by copy and paste")]
struct Cli {
    #[command(subcommand)]
    command: Option<Role>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Clone, Copy)]
enum Role {
    /// Create an offer and wait for the peer's answer
    Offer,
    /// Paste the peer's offer and reply with an answer
    Answer,
}

#[derive(clap::Args)]
struct Options {
    /// ICE server URL, repeatable. Defaults to a public STUN server.
    #[arg(long = "stun", global = true)]
    stun: Vec<String>,

    /// JSON file holding a list of ICE servers ({"urls": [..], "username", "credential"})
    #[arg(long, global = true)]
    ice_config: Option<PathBuf>,

    /// Exchange raw SDP instead of base64
    #[arg(long, global = true)]
    plain: bool,

    #[arg(long, global = true, default_value = DEFAULT_COLOR, value_parser = command::parse_color)]
    color: String,

    #[arg(long, global = true, default_value_t = DEFAULT_LINE_WIDTH)]
    width: f64,

    /// Log filter, overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

enum Next {
    Quit,
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.options.log_level.as_deref());

    let role = match cli.command {
        Some(role) => role,
        None => pick_role()?,
    };
    let config = session_config(&cli.options)?;

    let observer = Arc::new(TerminalObserver::new());
    let session = Session::with_webrtc(config, observer.clone())
        .await
        .context("Failed to start session")?;
    let clipboard = TerminalClipboard;
    let mut palette = Palette::new(Brush::new(cli.options.color, cli.options.width));

    println!("{}", "🎨 draw2p".green().bold());

    loop {
        handshake(&session, role, &clipboard).await?;
        wait_for_channel(&observer).await?;

        println!("{}", "✨ Connected. Start drawing:".green().bold());
        println!("{HELP}");

        match draw(&session, &mut palette).await? {
            Next::Quit => break,
            Next::Reset => {
                session.reset().await.context("Failed to reset session")?;
                println!("{}", "Connection reset, negotiating again.".yellow());
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn pick_role() -> Result<Role> {
    let choice = Select::new()
        .with_prompt("Start a session")
        .items(&["Create an offer", "Answer an offer"])
        .default(0)
        .interact()
        .context("Failed to read role")?;
    Ok(if choice == 0 { Role::Offer } else { Role::Answer })
}

fn session_config(options: &Options) -> Result<SessionConfig> {
    let mut ice_servers: Vec<IceServerConfig> =
        options.stun.iter().map(IceServerConfig::stun).collect();
    if let Some(path) = &options.ice_config {
        ice_servers.extend(load_ice_config(path)?);
    }

    let transport = if ice_servers.is_empty() {
        TransportConfig::default()
    } else {
        TransportConfig { ice_servers }
    };
    let encoding = if options.plain {
        TransportEncoding::Plain
    } else {
        TransportEncoding::Base64
    };

    Ok(SessionConfig {
        transport,
        encoding,
        ..SessionConfig::default()
    })
}

fn load_ice_config(path: &Path) -> Result<Vec<IceServerConfig>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid ICE config {}", path.display()))
}

async fn handshake(session: &Session, role: Role, clipboard: &dyn Clipboard) -> Result<()> {
    match role {
        Role::Offer => {
            println!("{}", "📦 Gathering candidates for the offer...".cyan());
            let offer = session
                .generate_offer()
                .await
                .context("Failed to generate offer")?;
            clipboard.copy("offer", &offer)?;

            loop {
                let answer = tokio::task::block_in_place(|| clipboard.paste("Paste the answer"))?;
                match session.accept_answer(&answer).await {
                    Ok(()) => break,
                    Err(SessionError::InvalidSignalingText(e)) => {
                        println!("{} {}", "Try again:".red(), e);
                    }
                    Err(e) => return Err(e).context("Failed to accept answer"),
                }
            }
        }
        Role::Answer => {
            let answer = loop {
                let offer = tokio::task::block_in_place(|| clipboard.paste("Paste the offer"))?;
                println!("{}", "📦 Gathering candidates for the answer...".cyan());
                match session.accept_offer(&offer).await {
                    Ok(answer) => break answer,
                    Err(SessionError::InvalidSignalingText(e)) => {
                        println!("{} {}", "Try again:".red(), e);
                    }
                    Err(e) => return Err(e).context("Failed to accept offer"),
                }
            };
            clipboard.copy("answer", &answer)?;
        }
    }
    Ok(())
}

async fn wait_for_channel(observer: &TerminalObserver) -> Result<()> {
    println!("{}", "Waiting for the data channel...".cyan());
    let mut status = observer.subscribe();

    let settled = tokio::time::timeout(
        CHANNEL_OPEN_TIMEOUT,
        status.wait_for(|s| s.is_open() || s.stage() == Stage::Closed),
    )
    .await
    .context("Timed out waiting for the data channel")?
    .context("Session stopped")?
    .is_open();

    if !settled {
        bail!("Data channel closed before it opened");
    }
    Ok(())
}

async fn draw(session: &Session, palette: &mut Palette) -> Result<Next> {
    let mut recorder = StrokeRecorder::new();

    loop {
        let line = tokio::task::block_in_place(|| {
            dialoguer::Input::<String>::new()
                .with_prompt(prompt(palette))
                .allow_empty(true)
                .interact_text()
        })
        .context("Failed to read command")?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {:#}", "?".red(), e);
                continue;
            }
        };

        match command {
            Command::Stroke(points) => {
                recorder.pointer_down(palette.active());
                for p in points {
                    recorder.pointer_move(p.x, p.y, CanvasRect::default(), ScrollOffset::default());
                }
                let Some(stroke) = recorder.pointer_up() else {
                    continue;
                };
                if session.send(&stroke).await {
                    println!("{} {} point(s)", "sent".green(), stroke.points.len());
                } else {
                    println!("{}", "not sent (channel closed?)".red());
                }
            }
            Command::Color(color) => palette.set_color(color),
            Command::Width(width) => palette.set_width(width),
            Command::Eraser => palette.use_eraser(),
            Command::Pen => palette.use_pen(),
            Command::Status => {
                let status = session.status().await.context("Session stopped")?;
                println!("{} {}", "status:".dimmed(), status);
            }
            Command::Help => println!("{HELP}"),
            Command::Reset => return Ok(Next::Reset),
            Command::Quit => return Ok(Next::Quit),
        }
    }
}

fn prompt(palette: &Palette) -> String {
    let brush = palette.active();
    let tool = if palette.is_erasing() { "eraser" } else { "pen" };
    format!("{tool} {} {}", brush.color, brush.width)
}
