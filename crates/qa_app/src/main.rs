mod app;
mod effects;
mod render;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

use crate::app::RunOptions;
use crate::settings::AppSettings;

const LOG_FILE: &str = "./qa_app.log";

/// Upload a PDF to the Q&A service, show the generated questions and
/// optionally export them.
#[derive(Debug, Parser)]
#[command(name = "qa_app", version)]
struct Cli {
    /// Document to analyse.
    file: PathBuf,

    /// Analysis service URL (overrides the settings file).
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Directory that receives exports (overrides the settings file).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// RON settings file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Export the results as a paginated PDF.
    #[arg(long)]
    export_pdf: bool,

    /// Export the results as a JSON snapshot.
    #[arg(long)]
    export_json: bool,

    /// Declared content type; guessed from the file extension when omitted.
    #[arg(long, value_name = "MIME")]
    content_type: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(cli.log.into(), level, Path::new(LOG_FILE));

    let settings = match &cli.config {
        Some(path) => AppSettings::load(path)?,
        None => AppSettings::default(),
    }
    .with_overrides(cli.endpoint.clone(), cli.output_dir.clone());

    let candidate = app::load_candidate(&cli.file, cli.content_type.as_deref())?;
    let options = RunOptions {
        export_document: cli.export_pdf,
        export_snapshot: cli.export_json,
    };

    app::run(settings.engine_config(), candidate, options)
}
