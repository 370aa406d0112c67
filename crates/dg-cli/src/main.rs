//! Dungeon layout generator
//!
//! Command-line entry point: loads specifications, runs one generation and
//! prints a summary or the full layout as JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use dg_core::{
    ConfigError, Direction, DivisionType, Dungeon, GenerationReport, Generator, SectionId,
    Specifications, Vec3i, Wall,
};

/// Procedural sectioned dungeon layouts
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(author, version, about = "Generate a seeded multi-floor dungeon layout", long_about = None)]
struct Args {
    /// World size as X Y Z
    #[arg(long = "size", num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [500, 10, 500])]
    size: Vec<i32>,

    /// Seed (0 picks one from the clock)
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Facing of every floor root (north/south/east/west)
    #[arg(short = 'd', long = "direction", default_value_t = Direction::North)]
    direction: Direction,

    /// JSON specifications file; missing fields take their defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Maximum number of subdivision calls
    #[arg(long = "call-budget")]
    call_budget: Option<u64>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Include wall segments in JSON output
    #[arg(long = "walls")]
    walls: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Summary,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot encode layout: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("world size needs three values, got {0}")]
    Size(usize),
}

/// Layout as written by `--format json`
#[derive(Serialize)]
struct Export<'a> {
    dungeon: &'a Dungeon,
    #[serde(skip_serializing_if = "Option::is_none")]
    walls: Option<Vec<SectionWalls>>,
}

#[derive(Serialize)]
struct SectionWalls {
    section: SectionId,
    walls: Vec<Wall>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("dungeon-gen: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_specs(path: Option<&PathBuf>) -> Result<Specifications, CliError> {
    let Some(path) = path else {
        return Ok(Specifications::default());
    };
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Specifications::from_json(&json)?)
}

fn run(args: &Args) -> Result<(), CliError> {
    let [x, y, z] = args.size[..] else {
        return Err(CliError::Size(args.size.len()));
    };
    let specs = load_specs(args.config.as_ref())?;
    let mut generator = Generator::new(specs);
    if let Some(budget) = args.call_budget {
        generator = generator.with_call_budget(budget);
    }
    let dungeon = generator.generate(Vec3i::new(x, y, z), args.seed, args.direction)?;
    if dungeon.report.budget_exhausted() {
        warn!(
            refused = dungeon.report.exhausted_calls,
            budget = dungeon.report.call_budget,
            "call budget exhausted, layout is partial"
        );
    }

    match args.format {
        Format::Summary => print_summary(&dungeon),
        Format::Json => {
            let walls = args.walls.then(|| {
                dungeon
                    .tree
                    .rooms()
                    .iter()
                    .map(|id| SectionWalls {
                        section: *id,
                        walls: dungeon.walls(*id),
                    })
                    .collect()
            });
            let export = Export {
                dungeon: &dungeon,
                walls,
            };
            println!("{}", serde_json::to_string_pretty(&export)?);
        }
    }
    Ok(())
}

fn print_summary(dungeon: &Dungeon) {
    let leaves: Vec<_> = dungeon.rooms().collect();
    let rooms = leaves.iter().filter(|s| s.is_room).count();
    let corridors = leaves.iter().filter(|s| s.is_corridor).count();

    println!("seed:        {}", dungeon.seed);
    println!(
        "world:       {} x {} x {} facing {}",
        dungeon.world.x, dungeon.world.y, dungeon.world.z, dungeon.start_direction
    );
    println!("floors:      {}", dungeon.floors().len());
    println!("sections:    {}", dungeon.tree.len());
    println!("rooms:       {rooms}");
    println!("corridors:   {corridors}");
    println!("doors:       {}", dungeon.doors.len());
    println!("walls:       {}", dungeon.all_walls().len());

    let mut divisions: BTreeMap<String, usize> = BTreeMap::new();
    for section in dungeon.tree.iter() {
        if section.division != DivisionType::None {
            *divisions.entry(section.division.to_string()).or_default() += 1;
        }
    }
    if !divisions.is_empty() {
        println!("divisions:");
        for (kind, count) in &divisions {
            println!("  {kind:<14}{count}");
        }
    }

    let mut by_region: BTreeMap<&str, usize> = BTreeMap::new();
    for leaf in &leaves {
        let name = dungeon.region(leaf.id).map_or("(none)", |r| r.name.as_str());
        *by_region.entry(name).or_default() += 1;
    }
    if !by_region.is_empty() {
        println!("regions:");
        for (name, count) in &by_region {
            println!("  {name:<14}{count}");
        }
    }

    print_report(&dungeon.report);
    print_doors_per_side(dungeon);
}

fn print_report(report: &GenerationReport) {
    println!(
        "calls:       {} of {}{}",
        report.calls,
        report.call_budget,
        if report.budget_exhausted() {
            " (exhausted)"
        } else {
            ""
        }
    );
    println!("rng draws:   {}", report.rng_draws);
    if report.issues.is_empty() {
        return;
    }
    println!("issues:      {}", report.issues.len());
    for issue in &report.issues {
        println!("  {}: {issue}", issue.section());
    }
}

fn print_doors_per_side(dungeon: &Dungeon) {
    if dungeon.doors.is_empty() {
        return;
    }
    println!("door sides:");
    for side in Direction::iter() {
        let count: usize = dungeon.rooms().map(|s| s.doors.side(side).len()).sum();
        println!("  {:<14}{count}", side.to_string());
    }
}
