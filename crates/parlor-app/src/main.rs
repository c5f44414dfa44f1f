#![allow(clippy::print_stdout, clippy::print_stderr)] // CLI binary — stdout/stderr is the UI

mod chat_loop;
mod cli;
mod config;
mod mailbox;
mod poller;
mod session;
mod startup;
mod tracing_setup;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use parlor_client::{ChatTransport, Credential, HttpTransport};
use parlor_tui::{CrosstermKeypad, CrosstermScreen, Screen, Viewport};
use tracing::{info, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::session::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The chat terminal owns the screen; console logging would tear it up.
    let console_log = !matches!(cli.command, Commands::Run);
    let _tracing_guard = tracing_setup::init(console_log);

    info!(version = env!("CARGO_PKG_VERSION"), "parlor starting");

    match cli.command {
        Commands::Run => cmd_run(Path::new(&cli.config)),
        Commands::Check => cmd_check(Path::new(&cli.config)),
        Commands::Register { username, password } => {
            cmd_register(Path::new(&cli.config), &username, &password)
        }
        Commands::Version => {
            println!("parlor {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn cmd_run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let credential = config.credential()?;

    // Independent clients: the foreground send path and the poller
    // fetch path never share a transport instance.
    let transport = HttpTransport::new(&config.server.url, credential.clone())?;
    let poll_transport = HttpTransport::new(&config.server.url, credential)?;

    if !transport.check_credential() {
        bail!("the server did not accept the configured credential");
    }

    let viewport = Viewport::default();
    let mut screen = CrosstermScreen::new(viewport)?;
    let mut keypad = CrosstermKeypad;

    let Some(room) = startup::choose_room(
        &mut screen,
        &mut keypad,
        &transport,
        config.server.room.clone(),
    )?
    else {
        return Ok(()); // backed out before joining a room
    };

    info!(%room, "joining room");
    let ctx = AppContext::new(room);
    screen.message_box("Loading messages...")?;

    let poller = poller::spawn(
        poll_transport,
        ctx.room.clone(),
        Arc::clone(&ctx.mailbox),
        ctx.running_handle(),
    )
    .context("spawning poller thread")?;

    let result = chat_loop::run(&ctx, &transport, &mut screen, &mut keypad, viewport);

    ctx.shutdown();
    if poller.join().is_err() {
        warn!("poller thread panicked");
    }
    result
}

fn cmd_check(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("config: OK ({})", config_path.display());

    let credential = config.credential()?;
    let transport = HttpTransport::new(&config.server.url, credential)?;
    if !transport.check_credential() {
        bail!("credential: REJECTED by {}", config.server.url);
    }
    println!("credential: OK");

    let rooms = transport.list_rooms().context("listing rooms")?;
    if rooms.is_empty() {
        println!("rooms: none yet");
    } else {
        println!("rooms: {}", rooms.join(", "));
    }
    Ok(())
}

fn cmd_register(config_path: &Path, username: &str, password: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let credential = Credential::Login {
        username: username.to_owned(),
        password: password.to_owned(),
    };
    let transport = HttpTransport::new(&config.server.url, credential)?;
    transport
        .create_user(username, password)
        .with_context(|| format!("creating user {username:?}"))?;
    println!("user {username} created");
    Ok(())
}
