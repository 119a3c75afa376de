//! Runstat CLI - interactive shell and batch commands for run logs
//!
//! Modes:
//! - no subcommand: interactive menu (process logs, view saved statistics)
//! - process: batch-process a file or directory of run logs
//! - view: list saved statistics or print one report

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use runstat::parser::{SkipReason, SkippedLine};
use runstat::pipeline::{FileOutcome, RunProcessor};
use runstat::storage::{ReportStore, SavedReport};
use runstat::types::BodyWeight;
use runstat::{ProcessError, DEFAULT_OUTPUT_DIR, VERSION};

/// Runstat - calorie burn and running statistics from run logs
#[derive(Parser)]
#[command(name = "runstat")]
#[command(version = VERSION)]
#[command(about = "Compute calorie burn and running statistics from run logs", long_about = None)]
struct Cli {
    /// Body weight in kilograms (prompted for interactively when omitted)
    #[arg(short, long)]
    weight: Option<f64>,

    /// Directory reports are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process run data from a file or directory
    Process {
        /// Run log file, or a directory of run logs
        path: PathBuf,
    },

    /// View saved statistics
    View {
        /// Report file to print (lists all saved reports when omitted)
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunstatCliError> {
    let store = ReportStore::new(&cli.output);

    match cli.command {
        Some(Commands::Process { path }) => {
            let weight = cli.weight.ok_or(RunstatCliError::MissingWeight)?;
            let weight = BodyWeight::new(weight)?;
            cmd_process(&path, &RunProcessor::new(weight, store))
        }

        Some(Commands::View { name }) => cmd_view(&store, name.as_deref()),

        None => interactive(cli.weight, store),
    }
}

fn cmd_process(path: &Path, processor: &RunProcessor) -> Result<(), RunstatCliError> {
    let outcomes = processor.process_path(path)?;
    report_outcomes(&outcomes);

    if outcomes.iter().any(|outcome| outcome.result.is_err()) {
        Err(RunstatCliError::ProcessingFailed)
    } else {
        Ok(())
    }
}

fn cmd_view(store: &ReportStore, name: Option<&str>) -> Result<(), RunstatCliError> {
    match name {
        Some(name) => {
            print!("{}", store.read(name)?);
            Ok(())
        }
        None => {
            let saved = store.list()?;
            if saved.is_empty() {
                println!("No saved statistics. Please process a run first.");
                return Ok(());
            }

            println!("Saved statistics:");
            for (index, report) in saved.iter().enumerate() {
                println!("{}. {}", index + 1, describe(report));
            }
            Ok(())
        }
    }
}

// Interactive shell

/// Interactive menu shell
///
/// Stays alive until the user picks the exit option or stdin closes. All
/// invalid input is recovered by re-prompting; nothing here exits non-zero.
fn interactive(weight_arg: Option<f64>, store: ReportStore) -> Result<(), RunstatCliError> {
    let tty = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(weight) = resolve_weight(&mut input, weight_arg, tty)? else {
        return Ok(());
    };
    let processor = RunProcessor::new(weight, store);

    loop {
        if tty {
            println!();
            println!("Menu:");
            println!("1. Process run data from file or directory");
            println!("2. View saved statistics");
            println!("3. Exit");
        }
        let Some(choice) = prompt(&mut input, "Choose an option: ", tty)? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                if !menu_process(&mut input, &processor, tty)? {
                    return Ok(());
                }
            }
            "2" => {
                if !menu_view(&mut input, &processor, tty)? {
                    return Ok(());
                }
            }
            "3" => {
                println!("Exiting...");
                return Ok(());
            }
            _ => println!("Invalid choice, please try again."),
        }
    }
}

/// Resolve the session weight: CLI flag if valid, otherwise prompt until a
/// positive number arrives. Returns None when stdin closes first.
fn resolve_weight(
    input: &mut impl BufRead,
    weight_arg: Option<f64>,
    tty: bool,
) -> Result<Option<BodyWeight>, RunstatCliError> {
    if let Some(kilograms) = weight_arg {
        match BodyWeight::new(kilograms) {
            Ok(weight) => return Ok(Some(weight)),
            Err(e) => println!("{e}"),
        }
    }

    prompt_loop(input, "Enter your weight in kg: ", tty, |text| {
        match text.parse::<f64>() {
            Ok(kilograms) => BodyWeight::new(kilograms)
                .map_err(|_| "Please enter a positive weight.".to_string()),
            Err(_) => Err("Invalid input. Please enter your weight as a number.".to_string()),
        }
    })
}

/// Menu option 1: prompt for a path and process it
fn menu_process(
    input: &mut impl BufRead,
    processor: &RunProcessor,
    tty: bool,
) -> Result<bool, RunstatCliError> {
    if let Ok(cwd) = std::env::current_dir() {
        println!("Current working directory: {}", cwd.display());
    }

    let Some(path) = prompt_loop(input, "Enter the file or directory name: ", tty, |text| {
        let path = PathBuf::from(text);
        if path.exists() {
            Ok(path)
        } else {
            Err("The file or directory does not exist. Try again.".to_string())
        }
    })?
    else {
        return Ok(false);
    };

    match processor.process_path(&path) {
        Ok(outcomes) => report_outcomes(&outcomes),
        // The path was checked above; anything surfacing here is reported
        // and the menu continues.
        Err(e) => println!("{e}"),
    }

    println!("Processing complete. Returning to main menu.");
    Ok(true)
}

/// Menu option 2: list saved reports and print the chosen one
fn menu_view(
    input: &mut impl BufRead,
    processor: &RunProcessor,
    tty: bool,
) -> Result<bool, RunstatCliError> {
    let saved = match processor.store().list() {
        Ok(saved) => saved,
        Err(e) => {
            println!("{e}");
            return Ok(true);
        }
    };

    if saved.is_empty() {
        println!("No saved statistics. Please process a run first.");
        return Ok(true);
    }

    println!("Saved statistics:");
    for (index, report) in saved.iter().enumerate() {
        println!("{}. {}", index + 1, describe(report));
    }

    let count = saved.len();
    let Some(index) = prompt_loop(
        input,
        "Choose a file (enter the number): ",
        tty,
        |text| match text.parse::<usize>() {
            Ok(number) if (1..=count).contains(&number) => Ok(number - 1),
            Ok(_) => Err("Invalid number. Choose a valid file number.".to_string()),
            Err(_) => Err("Invalid input. Enter a number.".to_string()),
        },
    )?
    else {
        return Ok(false);
    };

    match processor.store().read(&saved[index].name) {
        Ok(text) => print!("{text}"),
        Err(e) => println!("{e}"),
    }
    Ok(true)
}

// Helper functions

/// Print per-file results and skipped-line warnings
fn report_outcomes(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(summary) => {
                print_skipped(&outcome.path, &summary.skipped);
                println!("Saved report to {}", summary.report_path.display());
            }
            Err(e) => println!("Error reading {}: {}", outcome.path.display(), e),
        }
    }
}

fn print_skipped(path: &Path, skipped: &[SkippedLine]) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    for line in skipped {
        match line.reason {
            SkipReason::MissingFields => {
                println!("Missing data in line: {}, skipping.", line.content);
            }
            SkipReason::InvalidNumber => {
                println!(
                    "Invalid data format in file: {}, skipping line: {}",
                    file_name, line.content
                );
            }
        }
    }
}

fn describe(report: &SavedReport) -> String {
    match report.modified {
        Some(modified) => format!("{} ({})", report.name, modified.format("%Y-%m-%d %H:%M")),
        None => report.name.clone(),
    }
}

/// Prompt repeatedly until `parse` accepts the input
///
/// The message returned by `parse` is printed and the prompt repeats.
/// Returns None when stdin closes.
fn prompt_loop<T>(
    input: &mut impl BufRead,
    text: &str,
    tty: bool,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, RunstatCliError> {
    loop {
        let Some(line) = prompt(input, text, tty)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => println!("{message}"),
        }
    }
}

/// Print a prompt (on a TTY) and read one trimmed line; None at end of input
fn prompt(
    input: &mut impl BufRead,
    text: &str,
    tty: bool,
) -> Result<Option<String>, RunstatCliError> {
    if tty {
        print!("{text}");
        io::stdout().flush()?;
    }

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Error types

#[derive(Debug)]
enum RunstatCliError {
    Io(io::Error),
    Process(ProcessError),
    MissingWeight,
    ProcessingFailed,
}

impl From<io::Error> for RunstatCliError {
    fn from(e: io::Error) -> Self {
        RunstatCliError::Io(e)
    }
}

impl From<ProcessError> for RunstatCliError {
    fn from(e: ProcessError) -> Self {
        RunstatCliError::Process(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<RunstatCliError> for CliError {
    fn from(e: RunstatCliError) -> Self {
        match e {
            RunstatCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            RunstatCliError::Process(e) => CliError {
                code: "PROCESS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the run log path and the output directory".to_string()),
            },
            RunstatCliError::MissingWeight => CliError {
                code: "MISSING_WEIGHT".to_string(),
                message: "Body weight is required in batch mode".to_string(),
                hint: Some("Pass it with --weight <KG>".to_string()),
            },
            RunstatCliError::ProcessingFailed => CliError {
                code: "PROCESSING_FAILED".to_string(),
                message: "One or more files could not be processed".to_string(),
                hint: Some("Review the per-file messages above".to_string()),
            },
        }
    }
}
