//! Sea Turtle Echo CLI - pre-render and audition the game's audio assets.
//!
//! The game generates missing assets itself on first run; this binary does
//! the same work up front (useful for packaging) and lets you listen to
//! any catalog entry without launching the game.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use seaturtle_assets::{default_catalog, AssetSpec, AudioLibrary};

/// Sea Turtle Echo - procedural audio asset tool
#[derive(Parser)]
#[command(name = "seaturtle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render missing assets to the asset directory
    Generate {
        /// Asset directory to write into
        #[arg(short, long, default_value = "assets")]
        out: PathBuf,

        /// Specific asset names (default: the whole catalog)
        names: Vec<String>,

        /// Re-render even when the file already exists
        #[arg(long)]
        force: bool,
    },

    /// List the asset catalog
    List {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate (if needed) and play one asset
    Play {
        /// Asset name, e.g. music.beach or sfx.eat
        name: String,

        /// Asset directory
        #[arg(short, long, default_value = "assets")]
        out: PathBuf,

        /// How long to hold playback open, in seconds
        #[arg(long, default_value_t = 10)]
        seconds: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate { out, names, force } => generate(out, names, force),
        Commands::List { json } => list(json),
        Commands::Play { name, out, seconds } => play(name, out, seconds),
    }
}

fn generate(out: PathBuf, names: Vec<String>, force: bool) -> Result<()> {
    let library = AudioLibrary::headless(&out);

    let names: Vec<String> = if names.is_empty() {
        default_catalog().iter().map(|e| e.name.to_string()).collect()
    } else {
        names
    };

    for name in &names {
        if force {
            let path = library.asset_path(name);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
            }
        }

        let path = library
            .ensure_generated(name)
            .with_context(|| format!("failed to generate '{name}'"))?;
        println!("{} {} -> {}", "ok".green().bold(), name, path.display());
    }

    println!("{} {} asset(s) ready", "done".green().bold(), names.len());
    Ok(())
}

fn list(json: bool) -> Result<()> {
    let catalog = default_catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for entry in catalog {
        let kind = match entry.spec {
            AssetSpec::Track(p) => format!("track  {:>5.0} bpm, {} bars, stereo", p.tempo_bpm, p.bars),
            AssetSpec::Effect(p) => {
                format!("effect {:>5.0} Hz, {} ms, {:?}", p.frequency, p.duration_ms, p.shape)
            }
            AssetSpec::Ambient(p) => format!("loop   {:?}, {:.0} s", p.kind, p.duration_seconds),
        };
        println!("{:<16} {}", entry.name.cyan(), kind);
    }
    Ok(())
}

fn play(name: String, out: PathBuf, seconds: u64) -> Result<()> {
    let Some(entry) = default_catalog().into_iter().find(|e| e.name == name) else {
        bail!("unknown asset '{name}' (try `seaturtle list`)");
    };

    let mut library = AudioLibrary::new(&out);
    library.ensure_generated(&name)?;

    println!("{} {}", "playing".green().bold(), name);
    match entry.spec {
        AssetSpec::Effect(_) => {
            library.play_effect(&name);
            std::thread::sleep(Duration::from_secs(2));
        }
        AssetSpec::Track(_) | AssetSpec::Ambient(_) => {
            library.play_track(&name, true, 500);
            std::thread::sleep(Duration::from_secs(seconds));
        }
    }
    Ok(())
}
