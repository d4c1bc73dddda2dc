use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser};
use log::{debug, info};

use wikirelated::config::Config;
use wikirelated::data::SeedOutcome;
use wikirelated::helpers::ApiGateway;
use wikirelated::logging;
use wikirelated::related::{collect_seed_names, report_lines, Suggester};

/// Config file picked up from the working directory when --config is not given
const DEFAULT_CONFIG_FILE: &str = "wikirelated.json";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Suggests (questionably) related artists by leveraging the power of Wikipedia.",
    long_about = None
)]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["artist", "artists_file"])))]
struct Args {
    /// The artist to obtain suggestions for
    #[arg(long)]
    artist: Option<String>,

    /// Input file with one artist name per line
    #[arg(long, alias = "artists_file", value_name = "FILE")]
    artists_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Stop with exit status 1 at the first name that is not a musical artist
    #[arg(long)]
    fail_fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable informational logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    let mut config = match path {
        Some(path) => Config::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::from_file(DEFAULT_CONFIG_FILE),
        None => Ok(Config::default()),
    }
    .map_err(|e| e.to_string())?;
    config.apply_env_overrides();
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    if let Err(e) = logging::initialize_logging(&config.logging, args.debug, args.verbose) {
        eprintln!("Warning: {}", e);
    }
    debug!("Effective configuration: {:?}", config);

    let file_contents = match &args.artists_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .map_err(|e| format!("Failed to read artists file '{}': {}", path.display(), e))?,
        ),
        None => None,
    };

    let names = collect_seed_names(args.artist.as_deref(), file_contents.as_deref());
    info!("Evaluating {} artist(s)", names.len());

    let suggester = Suggester::new(ApiGateway::from_config(config));

    // Diagnostics for invalid names come first, then the suggestions
    let mut outcomes = Vec::new();
    for name in &names {
        let outcome = suggester.evaluate(name);
        let rejected = matches!(outcome, SeedOutcome::NotAnArtist { .. });
        if rejected && !args.json {
            for line in report_lines(&outcome) {
                println!("{}", line);
            }
        }
        outcomes.push(outcome);

        if rejected && args.fail_fast {
            // JSON callers still get the outcomes that led to the exit
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            }
            process::exit(1);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in outcomes.iter().filter(|o| matches!(o, SeedOutcome::Report(_))) {
        for line in report_lines(outcome) {
            println!("{}", line);
        }
    }

    Ok(())
}
