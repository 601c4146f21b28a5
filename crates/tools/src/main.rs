mod config_file;
mod render;
mod seed;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::{DungeonLayout, GeneratorConfig, RoomKind, generate_dungeon};
use env_logger::{Builder, Env};
use log::info;
use serde::Serialize;

use config_file::ConfigFile;
use render::{LEGEND, Viewport, frame, render_ascii};
use seed::SeedChoice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file holding a `[generator]` table
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the random source; a fresh one is generated when absent
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    max_rooms: Option<usize>,
    #[arg(long)]
    branching_factor: Option<f64>,
    #[arg(long)]
    branching_limit: Option<f64>,
    /// Number of treasure rooms; omit to use max(2, normal rooms / 5)
    #[arg(long)]
    loot_rooms: Option<usize>,
    /// Skip the lock-and-key pass
    #[arg(long)]
    open_layout: bool,
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
    /// Write the rendered output here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Save the effective generator settings to this TOML file
    #[arg(long)]
    save_config: Option<PathBuf>,
    /// Aspect ratio used when framing the viewport
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f64,
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load(path)?.generator,
            None => GeneratorConfig::default(),
        };
        if let Some(max_rooms) = self.max_rooms {
            config.max_rooms = max_rooms;
        }
        if let Some(branching_factor) = self.branching_factor {
            config.branching_factor = branching_factor;
        }
        if let Some(branching_limit) = self.branching_limit {
            config.branching_limit = branching_limit;
        }
        if self.loot_rooms.is_some() {
            config.loot_room_count = self.loot_rooms;
        }
        if self.open_layout {
            config.use_metroidvania_logic = false;
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct Export<'a> {
    seed: u64,
    config: &'a GeneratorConfig,
    viewport: Option<Viewport>,
    layout: &'a DungeonLayout,
}

fn summary(layout: &DungeonLayout) -> String {
    format!(
        "rooms: {}  corridors: {}  locked doors: {}  treasure: {}",
        layout.rooms.len(),
        layout.corridors.len(),
        layout.locked_doors.len(),
        layout.count_of(RoomKind::Treasure)
    )
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = args.generator_config()?;
    if let Some(path) = &args.save_config {
        ConfigFile::new(config.clone()).write_atomic(path)?;
        info!("saved generator settings to {}", path.display());
    }

    let seed = SeedChoice::resolve(args.seed);
    info!("generating with {seed:?}");
    let layout = generate_dungeon(&config, seed.value())
        .with_context(|| format!("Dungeon generation failed for {config:?}"))?;

    let output = match args.format {
        Format::Ascii => format!(
            "seed: {}\n{}\n\n{}\n{LEGEND}\n",
            seed.value(),
            summary(&layout),
            render_ascii(&layout)
        ),
        Format::Json => {
            let export = Export {
                seed: seed.value(),
                config: &config,
                viewport: layout.bounds().map(|bounds| frame(bounds, args.aspect)),
                layout: &layout,
            };
            let mut json =
                serde_json::to_string_pretty(&export).context("Failed to serialize layout")?;
            json.push('\n');
            json
        }
    };

    match &args.out {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(())
}
