mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use config::AppConfig;
use filepick_adapters::{
    collect_selection, present_entry_row, present_report_json, present_valid_files,
    raw_file_from_path, ChannelListener, ImageCrateDecoder, TokioFileReader,
};
use filepick_application::{FilePickEngine, ValidationPipeline};
use filepick_domain::{FileId, ImageInfo, RawFile, ValidFile, ValidatedEntry};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::LocalSet;
use tracing::{info, warn};

/// Validate file selections and report the resulting set of valid files.
#[derive(Debug, Parser)]
#[command(name = "filepick", version)]
struct Cli {
    /// Files or folders; each one is validated as a separate selection
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Reject files larger than this many bytes
    #[arg(long)]
    max_size: Option<u64>,

    /// Check the size limit before reading instead of racing the read
    #[arg(long)]
    strict_size: bool,

    /// Accepted MIME pattern
    #[arg(long, default_value = "image/*")]
    accept: String,

    /// Pre-validated files shown until the first selection lands
    #[arg(long = "initial", value_name = "PATH")]
    initial: Vec<PathBuf>,

    /// Remove the entry with this file name once all selections settle
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,

    /// Print the final file set as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> Result<(), CommandError> {
    let config = AppConfig::from_flags(cli.max_size, cli.strict_size, &cli.accept, cli.json)
        .map_err(|error| CommandError::Usage(error.to_string()))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| CommandError::Runtime(format!("failed to start runtime: {error}")))?;

    LocalSet::new().block_on(&runtime, run_selections(cli, config))
}

async fn run_selections(cli: Cli, config: AppConfig) -> Result<(), CommandError> {
    let pipeline = ValidationPipeline::new(
        Rc::new(TokioFileReader),
        Rc::new(ImageCrateDecoder),
        config.validation.clone(),
    );
    let (listener, mut emissions) = ChannelListener::channel();
    let engine = FilePickEngine::new(pipeline, Box::new(listener));

    let initial = load_initial(&cli.initial)?;
    engine.set_initial(initial).map_err(runtime_error)?;
    let task = engine
        .start(
            futures::stream::pending::<Vec<RawFile>>(),
            futures::stream::pending::<FileId>(),
        )
        .map_err(runtime_error)?;
    let task = tokio::task::spawn_local(task);
    print_emissions(&mut emissions);

    for path in &cli.paths {
        let batch = collect_selection(path)
            .map_err(|error| CommandError::Runtime(format!("{}: {error}", path.display())))?;
        info!(path = %path.display(), files = batch.len(), "selected");
        engine.select_files(batch).map_err(runtime_error)?;
        engine.wait_idle().await;
        print_emissions(&mut emissions);
    }

    for name in &cli.remove {
        match find_removable(&engine.current_files(), name) {
            Some(id) => engine.remove_entry(id).map_err(runtime_error)?,
            None => warn!(name = %name, "no removable entry with that name"),
        }
    }
    print_emissions(&mut emissions);

    let snapshot = engine.snapshot();
    engine.stop();
    task.await
        .map_err(|error| CommandError::Runtime(format!("engine task failed: {error}")))?;

    if config.json_output {
        let report = present_report_json(&snapshot).map_err(runtime_error)?;
        println!("{report}");
    } else {
        for entry in &snapshot.current {
            println!("{}", present_entry_row(entry));
        }
    }
    Ok(())
}

fn load_initial(paths: &[PathBuf]) -> Result<Vec<ValidatedEntry>, CommandError> {
    paths
        .iter()
        .map(|path| load_initial_entry(path))
        .collect()
}

fn load_initial_entry(path: &Path) -> Result<ValidatedEntry, CommandError> {
    let file = raw_file_from_path(path)
        .map_err(|error| CommandError::Runtime(format!("{}: {error}", path.display())))?;
    Ok(ValidatedEntry::success(file.into(), ImageInfo::default()))
}

fn find_removable(current: &[ValidatedEntry], name: &str) -> Option<FileId> {
    current
        .iter()
        .filter(|entry| entry.file_name() == name)
        .find_map(ValidatedEntry::id)
}

fn print_emissions(emissions: &mut UnboundedReceiver<Vec<ValidFile>>) {
    while let Ok(files) = emissions.try_recv() {
        println!("{}", present_valid_files(&files));
    }
}

fn runtime_error(error: impl std::fmt::Display) -> CommandError {
    CommandError::Runtime(error.to_string())
}
