use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use greetlist::core::config::{self, CliOverrides};
use greetlist::core::seed::{FileSeed, GeneratedSeed, SeedSource, load_into};
use greetlist::core::state::App;
use greetlist::core::store::ItemStore;
use greetlist::tui;

#[derive(Parser)]
#[command(name = "greetlist", about = "Selectable greeting list with a click counter")]
struct Args {
    /// Read labels from this file (one per line, or a JSON array for *.json)
    #[arg(short, long)]
    seed_file: Option<PathBuf>,

    /// Number of generated rows when no seed file is given
    #[arg(short, long)]
    rows: Option<usize>,

    /// Log level: error, warn, info, debug, trace or off
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Nothing is logged until the file logger exists, so note what to report
    let first_run = config::config_path().is_some_and(|path| !path.exists());
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        rows: args.rows,
        seed_file: args.seed_file,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("greetlist starting up with {:?}", resolved);
    if first_run && let Some(path) = config::config_path() {
        log::info!("No config file found, generated default at {}", path.display());
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }

    let source: Box<dyn SeedSource> = match &resolved.seed_file {
        Some(path) => Box::new(FileSeed::new(path)),
        None => Box::new(GeneratedSeed {
            count: resolved.rows,
            prefix: resolved.label_prefix.clone(),
        }),
    };

    let mut store = ItemStore::new();
    if let Err(e) = load_into(&mut store, source.as_ref()).await {
        log::error!("Failed to load labels from {}: {}", source.describe(), e);
        return Err(e.into());
    }

    let app = App::new(store, source.describe());
    tui::run(app)?;
    Ok(())
}
