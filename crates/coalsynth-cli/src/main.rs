mod prompt;
mod registry;
mod workspace;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use coalsynth_generate::{GenerationEngine, GenerationError, SchemaPolicy};
use registry::{RegistryError, init_logging, write_report};
use thiserror::Error;
use workspace::{
    AtomicFile, DEFAULT_SETTINGS_FILE, RunConfig, Settings, WorkspaceError, load_settings,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("input file not found: {0}")]
    InputMissing(PathBuf),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "coalsynth",
    version,
    about = "Turn a day of stockpile, blend and coal mining figures into SQL test data"
)]
struct Cli {
    /// Input file with the stockpile, blend and movement sections.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Output file for the generated statements (replaced on success).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Settings file (defaults to coalsynth.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for truck assignment.
    #[arg(long)]
    seed: Option<u64>,
    /// Fail on header or column count mismatches instead of skipping.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Tonnes carried by one truck movement.
    #[arg(long)]
    unit_size: Option<u32>,
    /// Number of trucks in the roster.
    #[arg(long)]
    trucks: Option<usize>,
    /// Write a JSON run report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Append JSON log lines to this path.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Do not wait for key presses before and after the run.
    #[arg(long, default_value_t = false)]
    no_prompt: bool,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            input: self.input.clone(),
            output: self.output.clone(),
            report: self.report.clone(),
            log_file: self.log_file.clone(),
            schema_policy: self.strict.then_some(SchemaPolicy::Strict),
            unit_size: self.unit_size,
            truck_count: self.trucks,
            seed: self.seed,
            prompt: self.no_prompt.then_some(false),
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_settings(path, true)?,
        None => load_settings(&PathBuf::from(DEFAULT_SETTINGS_FILE), false)?,
    };
    let config = settings.resolve(cli.overrides());
    init_logging(config.log_file.as_deref())?;

    run(config)
}

fn run(config: RunConfig) -> Result<(), CliError> {
    if config.prompt {
        println!(
            "Please ensure the file is updated to represent todays coal mining data requirements."
        );
        prompt::wait_for_key("Press any key to continue")?;
    }

    println!("Loading {} file", config.input.display());
    tracing::info!(
        event = "run_started",
        input = %config.input.display(),
        output = %config.output.display(),
        policy = ?config.options.schema_policy
    );
    let timer = Instant::now();

    let input = match File::open(&config.input) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CliError::InputMissing(config.input));
        }
        Err(err) => return Err(err.into()),
    };

    let engine = GenerationEngine::new(config.options.clone());
    let mut output = AtomicFile::begin(&config.output)?;
    let report = engine
        .run(BufReader::new(input), output.writer()?)?
        .report;
    output.commit()?;
    tracing::info!(
        event = "output_written",
        path = %config.output.display(),
        statements = report.statements_written,
        bytes = report.bytes_written
    );

    for section in report.skipped_sections() {
        tracing::info!(event = "section_skipped", section = %section);
    }

    if let Some(path) = &config.report {
        write_report(path, &report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    println!("Writing of sql complete.  Check text file for errors.");
    println!(
        "There was {} coal movements generated",
        report.movements_generated
    );

    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %report.run_id,
        seed = report.seed,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    if config.prompt {
        prompt::wait_for_key("Press any key to exit.")?;
    }

    Ok(())
}
