//! roguegen: generate a single dungeon level and print or save it

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rg_core::dungeon::ConnectivityReport;
use rg_core::{GenConfig, GenError, GeneratedLevel, LevelRng, generate_layout};
use rg_save::{SaveError, load_save, save_level, save_level_compressed};

/// Generate a roguelike dungeon level
#[derive(Parser, Debug)]
#[command(name = "roguegen")]
#[command(author, version, about = "Generate a roguelike dungeon level", long_about = None)]
struct Args {
    /// Level width in columns [default: 40, or the config file's]
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Level height in rows [default: 20, or the config file's]
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Seed for reproducible generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the level as JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// Write the level to a save file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Gzip the save file
    #[arg(long, requires = "save")]
    compress: bool,

    /// Print a previously saved level instead of generating one
    #[arg(long, conflicts_with_all = ["seed", "config", "save", "width", "height"])]
    load: Option<PathBuf>,

    /// Report which rooms are reachable from the start
    #[arg(long)]
    check: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Gen(#[from] GenError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("could not encode level: {0}")]
    Json(#[from] serde_json::Error),

    #[error("--check needs a freshly generated level")]
    CheckNeedsRooms,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "rg_core=debug,rg_save=debug,roguegen=debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &Args) -> Result<GenConfig, GenError> {
    let mut config = match &args.config {
        Some(path) => GenConfig::from_json_file(path)?,
        None => GenConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    Ok(config)
}

fn print_level(level: &GeneratedLevel, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(level)?);
        return Ok(());
    }

    print!("{}", level);
    let stats = level.player.fight_stats;
    println!(
        "player at {}  health {}  strength {}",
        level.player.coordinate, stats.health, stats.strength
    );
    for mob in &level.mobs {
        println!(
            "mob    at {}  health {}  strength {}  {}",
            mob.coordinate, mob.fight_stats.health, mob.fight_stats.strength, mob.mode
        );
    }
    for item in &level.items {
        println!("item   at {}  {}", item.coordinate, item.item.name());
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    if let Some(path) = &args.load {
        if args.check {
            return Err(CliError::CheckNeedsRooms);
        }
        let save_file = load_save(path)?;
        info!(seed = ?save_file.header.seed, "loaded {}", path.display());
        return print_level(&save_file.level, args.json);
    }

    let config = load_config(&args)?;
    let mut rng = match args.seed {
        Some(seed) => LevelRng::new(seed),
        None => LevelRng::from_entropy(),
    };
    let seed = rng.seed();
    info!(seed, width = config.width, height = config.height, "generating level");

    let layout = generate_layout(&config, &mut rng)?;
    let level = layout.populate(&config, &mut rng)?;

    print_level(&level, args.json)?;

    if args.check {
        let report = ConnectivityReport::analyze(&layout.grid, &layout.rooms);
        eprintln!(
            "rooms reachable: {}/{} ({} group(s), {} truncated corridor(s))",
            report.reachable_rooms,
            report.total_rooms,
            report.room_groups,
            layout.corridors.truncated
        );
    }

    if let Some(path) = &args.save {
        if args.compress {
            save_level_compressed(path, &level, &config, Some(seed))?;
        } else {
            save_level(path, &level, &config, Some(seed))?;
        }
        eprintln!("saved seed {} to {}", seed, path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("roguegen: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_and_overrides() {
        let args = Args::parse_from(["roguegen", "--seed", "7", "-W", "30"]);
        assert_eq!(args.seed, Some(7));
        let config = load_config(&args).unwrap();
        assert_eq!((config.width, config.height), (30, 20));
        assert_eq!(config.max_room_width, 8);
    }

    #[test]
    fn test_compress_requires_save() {
        assert!(Args::try_parse_from(["roguegen", "--compress"]).is_err());
        assert!(Args::try_parse_from(["roguegen", "--load", "x.json", "--seed", "1"]).is_err());
    }

    #[test]
    fn test_config_file_size_kept_unless_given() {
        let path = std::env::temp_dir().join("roguegen_test_cli_config.json");
        std::fs::write(&path, r#"{"width": 50, "height": 30, "max_room_width": 6}"#).unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let args = Args::parse_from(["roguegen", "-c", config_arg.as_str()]);
        let config = load_config(&args).unwrap();
        assert_eq!((config.width, config.height), (50, 30));
        assert_eq!(config.max_room_width, 6);

        let args = Args::parse_from(["roguegen", "-c", config_arg.as_str(), "-H", "25"]);
        let config = load_config(&args).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((config.width, config.height), (50, 25));
    }

    #[test]
    fn test_load_rejects_explicit_size() {
        assert!(Args::try_parse_from(["roguegen", "--load", "x.json", "-W", "30"]).is_err());
        assert!(Args::try_parse_from(["roguegen", "--load", "x.json", "--height", "30"]).is_err());
        assert!(Args::try_parse_from(["roguegen", "--load", "x.json", "--json"]).is_ok());
    }

    #[test]
    fn test_too_small_level_fails() {
        let args = Args::parse_from(["roguegen", "-W", "5", "-H", "5", "--seed", "1"]);
        assert!(matches!(
            run(args),
            Err(CliError::Gen(GenError::InsufficientSpace { .. }))
        ));
    }
}
