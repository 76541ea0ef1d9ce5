use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::app::pick_hotspots;
use crate::config::Config;
use crate::model::cursor::CursorSpec;
use crate::pipeline::fs_ops::{artifact_dir, resolve_unique};
use crate::pipeline::{Xcursorgen, build_cursor, inspect_cursor};

pub const USAGE: &str = "Usage: cursorsmith build <image_path> <hotspot-x> <hotspot-y> [<output-name> | <size>]\n       cursorsmith pick [<image_path>]";

#[derive(Debug, Parser)]
#[command(name = "cursorsmith")]
#[command(about = "Build X11 cursors from PNG images and pick their hotspots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.config/cursorsmith/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resize a PNG and compile it into a cursor with xcursorgen
    Build {
        /// PNG image, absolute or relative to the current directory
        image_path: PathBuf,

        /// Hotspot column in the resized cursor, in pixels
        hotspot_x: u32,

        /// Hotspot row in the resized cursor, in pixels
        hotspot_y: u32,

        /// Output name (default "xcursor"), or the cursor size when all digits (default 25)
        output_name_or_size: Option<String>,
    },

    /// Show an image and print the pixel coordinates you click
    Pick {
        /// Image to show (default: picker.image from the config file)
        image_path: Option<PathBuf>,
    },
}

/// Exit code for a failed parse: help and version are not failures,
/// everything else is a usage error.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parses the process arguments, exiting with code 1 and the usage text on
/// any command-line error.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = usage_exit_code(&err);
            let _ = err.print();
            if code != 0 {
                eprintln!("\n{}", USAGE);
            }
            std::process::exit(code);
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Using config {:?}", config);

    match cli.command {
        Commands::Build {
            image_path,
            hotspot_x,
            hotspot_y,
            output_name_or_size,
        } => run_build(
            &config,
            image_path,
            (hotspot_x, hotspot_y),
            output_name_or_size.as_deref(),
        ),
        Commands::Pick { image_path } => run_pick(&config, image_path),
    }
}

pub fn run_build(
    config: &Config,
    image_path: PathBuf,
    hotspot: (u32, u32),
    output_name_or_size: Option<&str>,
) -> Result<()> {
    let spec = CursorSpec::from_args(
        &image_path,
        hotspot,
        output_name_or_size,
        &config.default_output_name,
        config.default_size,
    )?;

    // Temporaries are never created over existing files
    let stem = spec.stem();
    let unique = resolve_unique(&artifact_dir(&spec.image_path)?, &stem)?;
    if unique != stem {
        log::warn!(
            "{}.cursor or resized_{}.png already exists, building \"{}\" instead",
            stem,
            stem,
            unique
        );
    }
    let spec = spec.with_stem(&unique);

    let compiler = Xcursorgen::new(config.compiler.as_str());
    let output = build_cursor(&spec, &compiler, |msg| log::info!("{}", msg))
        .with_context(|| format!("Failed to build cursor from {}", spec.image_path.display()))?;

    println!(
        "{} Cursor \"{}\" created successfully!",
        "✓".green(),
        output.display()
    );

    match inspect_cursor(&output) {
        Ok(images) => {
            for image in images {
                println!("  {}", image.to_string().dimmed());
            }
        }
        Err(e) => log::warn!("Could not read back {}: {:#}", output.display(), e),
    }

    Ok(())
}

pub fn run_pick(config: &Config, image_path: Option<PathBuf>) -> Result<()> {
    let path = image_path
        .or_else(|| config.picker.image.clone())
        .context("No image given: pass one to `pick` or set picker.image in the config file")?;

    let picks = pick_hotspots(&path, &config.picker)?;

    if picks.is_empty() {
        println!("{}", "No hotspot picked.".yellow());
    }
    for (x, y) in picks {
        println!("Hotspot: ({}, {})", x, y);
    }

    Ok(())
}
