mod app;
mod chart;
mod color;
mod data;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueHint};

use app::ViewerConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Scrollable multichannel EEG+ECG plot", long_about = None)]
struct Cli {
    /// Path to EEG and ECG data CSV
    #[arg(value_hint = ValueHint::FilePath)]
    csv: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "viewer.html", value_hint = ValueHint::FilePath)]
    html: PathBuf,

    /// Plot title
    #[arg(long, default_value = "EEG + ECG Viewer")]
    title: String,

    /// Open the output HTML in your browser when done
    #[arg(long, action = ArgAction::SetTrue)]
    open: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

impl From<Cli> for ViewerConfig {
    fn from(cli: Cli) -> Self {
        ViewerConfig {
            input: cli.csv,
            html: cli.html,
            title: cli.title,
            open: cli.open,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match app::run(&cli.into()) {
        Ok(out) => {
            println!("Wrote {}. Open it in a browser and explore!", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
