//! jamstage - watch a MIDI file being played by a stage of instruments
//!
//! Run with: cargo run -- song.mid

mod app;
mod ui;

use std::{fs::File, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};

use app::Jamstage;
use jamstage::{config::StageConfig, io::smf};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Standard MIDI File to play
    file: PathBuf,

    #[arg(long, help = "Seconds the transport runs ahead of the picture")]
    latency: Option<f64>,

    #[arg(long, help = "Run without the terminal UI and print a summary every second")]
    headless: bool,

    #[arg(long, help = "Write log output to this file (the TUI hides stderr)")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Stage configuration in RON")]
    config: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(latency) = args.latency {
        config.latency_offset = latency;
    }

    let sequence = smf::load(&args.file)
        .wrap_err_with(|| format!("failed to load {}", args.file.display()))?;

    let app = Jamstage::new(sequence, config)?;
    if args.headless {
        app.run_headless()
    } else {
        app.run()
    }
}

fn init_logging(args: &Args) -> EyreResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();

    match (&args.log_file, args.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Anything on stderr would tear through the TUI
        (None, false) => {
            builder.filter_level(log::LevelFilter::Off);
        }
        (None, true) => {}
    }
    builder.init();
    Ok(())
}

#[cfg(feature = "serde")]
fn load_config(path: Option<&std::path::Path>) -> EyreResult<StageConfig> {
    match path {
        Some(path) => Ok(StageConfig::load(path)?),
        None => Ok(StageConfig::default()),
    }
}

#[cfg(not(feature = "serde"))]
fn load_config(path: Option<&std::path::Path>) -> EyreResult<StageConfig> {
    match path {
        Some(_) => Err(color_eyre::eyre::eyre!(
            "--config needs jamstage built with the `serde` feature"
        )),
        None => Ok(StageConfig::default()),
    }
}
