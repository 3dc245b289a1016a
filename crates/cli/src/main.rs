use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use log::debug;
use mh_qa_core::error::{Error, Result};
use mh_qa_core::execution::SystemCommandRunner;
use mh_qa_core::{config, file_handling};

use mh_qa_cli::cli_args::Args;
use mh_qa_cli::dispatch::{DispatchOutcome, Dispatcher};
use mh_qa_cli::prompt::TerminalPrompter;
use mh_qa_cli::reporter::Reporter;

fn print_banner() {
    println!(
        "{} {}",
        "🌤️  MissionHub QA CLI  ⛰".cyan(),
        format!("  v{}", env!("CARGO_PKG_VERSION")).magenta()
    );
}

fn execute() -> Result<()> {
    let args = Args::parse();
    print_banner();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");
    let settings = file_handling::get_settings(&config_path)?;

    let runner = SystemCommandRunner;
    let prompter = TerminalPrompter;
    let dispatcher = Dispatcher::new(&settings, &runner, &prompter);

    let mode = dispatcher.resolve_mode(args.mode)?;
    let mut reporter = Reporter::stdout();

    match dispatcher.dispatch(mode, &args, &mut reporter)? {
        DispatchOutcome::Completed => {}
        DispatchOutcome::BuildFailed { diagnostics } => eprintln!("{}", diagnostics.red()),
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        // Quitting a menu is a normal way to leave
        Ok(()) | Err(Error::SelectionCancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
