//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! validates the request, runs the dispatch on a worker thread and renders
//! its progress.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use file_dispatch::cli::Args;
use file_dispatch::output as out;
use file_dispatch::{
    CONFIG_ENV_VAR, CancelToken, DispatchError, DispatchOutcome, ProgressEvent, ProgressTally,
    default_config_path, load_config, remember_last_pattern, required_group_token,
    spawn_dispatch,
};

use crate::logging::init_tracing;

/// Exit code when the request is rejected before running.
const EXIT_REJECTED: u8 = 1;

/// Exit code for a finished run.
fn exit_code_for(outcome: DispatchOutcome) -> u8 {
    match outcome {
        DispatchOutcome::Ok => 0,
        DispatchOutcome::ErrorInput => 2,
        DispatchOutcome::Cancel => 130,
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_group_token {
        out::print_user(&required_group_token());
        return Ok(ExitCode::SUCCESS);
    }

    if args.print_config {
        if let Some(cfg_env) = std::env::var_os(CONFIG_ENV_VAR) {
            out::print_info(&format!(
                "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
                cfg_env.to_string_lossy()
            ));
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("file_dispatch config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet; it is written when a pattern is remembered.");
                }
            }
            Err(e) => out::print_error(&format!("Could not determine a config path: {e}")),
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Config file first, then CLI overrides (CLI wins).
    let mut cfg = load_config().context("load config")?;
    args.apply_overrides(&mut cfg);

    // Hold the guard until return so the file appender flushes.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;
    debug!("Starting file_dispatch: {:?}", args);

    let request = match cfg.to_request() {
        Ok(r) => r,
        Err(e) => {
            report_rejection(&e);
            return Ok(ExitCode::from(EXIT_REJECTED));
        }
    };

    if cfg.remember_pattern {
        // Losing the remembered pattern must not block the run.
        if let Err(e) = remember_last_pattern(request.pattern().as_str()) {
            warn!(error = %e, "Could not save the last-used pattern");
        }
    }

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            cancel.cancel();
            out::print_warn("Received interrupt; stopping after the current file...");
        })
        .context("install Ctrl-C handler")?;
    }

    let handle = spawn_dispatch(request, cancel);
    let mut tally = ProgressTally::default();
    for event in handle.events() {
        tally.apply(&event);
        match &event {
            ProgressEvent::Count(total) => out::print_info(&format!("{total} file(s) to dispatch")),
            ProgressEvent::Item(item) => out::print_item(item, &tally),
        }
    }

    let outcome = match handle.wait() {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(code = e.code(), error = %e, "Dispatch failed");
            return Err(e.into());
        }
    };
    info!(outcome = %outcome, succeeded = tally.succeeded, failed = tally.failed, "Dispatch completed");

    match outcome {
        DispatchOutcome::Ok => out::print_success(outcome.summary()),
        DispatchOutcome::Cancel => out::print_warn(outcome.summary()),
        DispatchOutcome::ErrorInput => out::print_error(outcome.summary()),
    }
    if tally.total > 0 {
        out::print_user(&format!(
            "moved: {}  failed: {}  not processed: {}",
            tally.succeeded,
            tally.failed,
            tally.remaining()
        ));
    }

    Ok(ExitCode::from(exit_code_for(outcome)))
}

fn report_rejection(e: &DispatchError) {
    let code = e.code();
    match e {
        DispatchError::MissingGroup { pattern, token } => {
            error!(code, kind = "missing_group", pattern = %pattern, "Pattern rejected");
            out::print_error(&format!(
                "The sub-folder pattern is not valid; it must name its group with {token}, e.g. \"^(?<name>[^_]+)_\""
            ));
        }
        DispatchError::BadPattern { pattern, source } => {
            error!(code, kind = "bad_pattern", pattern = %pattern, error = %source, "Pattern rejected");
            out::print_error(&e.to_string());
        }
        DispatchError::SourceNotFound(dir) | DispatchError::NotADirectory(dir) => {
            error!(code, kind = "source_invalid", dir = %dir.display(), "Source directory rejected");
            out::print_error(&format!("The specified folder was not found: {}", dir.display()));
        }
        _ => {
            error!(code, error = %e, "Request rejected");
            out::print_error(&e.to_string());
        }
    }
}
