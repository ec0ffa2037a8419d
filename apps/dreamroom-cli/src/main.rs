use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dreamroom_common::Command;
use dreamroom_kernel::{GameConfig, Session, SessionEvent, walkthrough};
use dreamroom_tools::SessionInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dreamroom-cli", about = "Headless driver for dreamroom sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Game config file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the active config
    Info,
    /// Run a command script against a fresh session
    Play {
        /// Script file, one command per line
        script: PathBuf,
        /// Print events and the final snapshot as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Solve the room with the built-in walkthrough
    Walkthrough {
        /// Print events and the final snapshot as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Load and validate the config, then exit
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("dreamroom-cli v{}", env!("CARGO_PKG_VERSION"));
            let r = &config.rotation;
            println!(
                "rotation: step={} deg tolerance={} targets={}",
                r.step_degrees,
                r.tolerance,
                r.targets.iter().map(Vec::len).sum::<usize>()
            );
            println!("darkness threshold: {}", config.lighting.darkness_threshold);
            println!(
                "door: position={} reach={}",
                config.door.position, config.door.reach
            );
            println!(
                "rewards: safe={} paintings={}",
                config.progression.safe_reward, config.progression.rotation_reward
            );
        }
        Commands::Play { script, json } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let commands = dreamroom_input::parse_script(&text)
                .with_context(|| format!("parsing script {}", script.display()))?;
            run(config, &commands, json)?;
        }
        Commands::Walkthrough { json } => {
            let commands = walkthrough::solution(&config)
                .context("no painting alignment reachable by clicking")?;
            run(config, &commands, json)?;
        }
        Commands::CheckConfig => {
            config.validate()?;
            match &cli.config {
                Some(path) => println!("{}: OK", path.display()),
                None => println!("built-in defaults: OK"),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let config = GameConfig::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn run(config: GameConfig, commands: &[Command], json: bool) -> anyhow::Result<()> {
    let mut session = Session::with_config(config);
    for command in commands {
        let events = session.apply(*command);
        for event in &events {
            if json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("{}", describe(event));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string(&session.snapshot())?);
        return Ok(());
    }

    println!("{}", SessionInspector::summary(&session));
    for painting in SessionInspector::painting_report(&session) {
        println!("  {painting}");
    }
    let listing = SessionInspector::inventory_listing(&session);
    if listing.is_empty() {
        println!("  {}", SessionInspector::EMPTY_INVENTORY);
    }
    for entry in listing {
        let marker = if entry.equipped { "*" } else { " " };
        println!("  {marker} {}: {}", entry.label, entry.description);
    }
    let replayed = Session::replay(session.config().clone(), session.commands());
    println!(
        "state hash: {:#018x} (replay {})",
        session.state_hash(),
        if replayed.state_hash() == session.state_hash() {
            "OK"
        } else {
            "MISMATCH"
        }
    );
    Ok(())
}

fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::ItemCollected { item } => format!("collected {item}"),
        SessionEvent::ItemEquipped { item } => format!("equipped {item}"),
        SessionEvent::ItemUnequipped { item } => format!("unequipped {item}"),
        SessionEvent::PaintingRotated { painting, angle } => {
            format!("{painting} rotated to {:.1} deg", angle.to_degrees())
        }
        SessionEvent::PaintingsAlignmentChanged { aligned } => {
            format!("paintings aligned: {aligned}")
        }
        SessionEvent::SafePanelOpened => "safe panel opened".to_string(),
        SessionEvent::SafePanelClosed => "safe panel closed".to_string(),
        SessionEvent::DigitChanged { slot, digit } => {
            format!("digit {} set to {digit}", slot.index() + 1)
        }
        SessionEvent::SafeOpened => "safe opened".to_string(),
        SessionEvent::Notification { tone, message } => format!("[{tone:?}] {message}"),
        SessionEvent::LeverStageChanged { from, to } => format!("lever: {from} -> {to}"),
        SessionEvent::LeverPulled => "lever pulled".to_string(),
        SessionEvent::NarrativeAdvanced => "narrative advanced".to_string(),
        SessionEvent::CinematicScheduled { delay_ms } => {
            format!("cinematic in {delay_ms} ms")
        }
        SessionEvent::DoorOpened => "door opened".to_string(),
        SessionEvent::RevealChanged { revealed } => format!("hidden objects revealed: {revealed}"),
        SessionEvent::FlashlightSwitched { on } => {
            format!("flashlight {}", if *on { "on" } else { "off" })
        }
        SessionEvent::InventoryPanelToggled { open } => {
            format!("inventory panel {}", if *open { "open" } else { "closed" })
        }
    }
}
