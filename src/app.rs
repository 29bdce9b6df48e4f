//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, extracts the
//! password, resolves the target path and runs the transfer. Also owns the end-of-run
//! behavior: a countdown on success, a keypress wait on error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{Level, debug, error, info, warn};

use nzb_move::cli::Args;
use nzb_move::config::{CONFIG_ENV, LoadResult, load_or_init};
use nzb_move::fs_ops::{TransferReport, hint_for, password_suffix};
use nzb_move::output::{self as out, StepStatus};
use nzb_move::{
    Config, NzbDocument, NzbMoveError, TransferRequest, default_config_path, execute,
    extract_password, shutdown,
};

use crate::logging::init_tracing;

/// Printed from the Ctrl-C handler. A pending password prompt still needs Enter.
const INTERRUPT_NOTICE: &str =
    "Received interrupt; stopping before the transfer starts (press Enter if a prompt is waiting)...";

/// Run the CLI application.
pub fn run(args: Args) -> Result<(), NzbMoveError> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    out::print_user(&format!("nzb_move v{}", env!("CARGO_PKG_VERSION")));

    let mut cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            out::print_error_report(&e, args.debug);
            finish_with_wait(args.no_wait);
            return Err(e);
        }
    };

    // Logging problems are reported but never stop the transfer.
    let guard_opt = init_tracing(
        &cfg.effective_log_level(),
        cfg.log_file.as_deref(),
        args.json,
    )
    .unwrap_or_else(|e| {
        out::print_warn(&format!("Failed to initialize logging: {e:#}"));
        None
    });

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn(INTERRUPT_NOTICE);
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            warn!(error = %e, "Failed to install signal handler");
        }
    }

    debug!("Starting nzb_move: {:?}", args);

    let result = process(&args, &mut cfg);

    match &result {
        Ok(report) => {
            info!(action = %report.performed, bytes = ?report.bytes, "Transfer completed");
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "nzb_move failed");
        }
    }

    // Ensure logs are flushed before the (possibly long) wait
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    match result {
        Ok(_) => {
            if let Some(delay) = cfg.close_delay() {
                out::countdown(delay);
            }
            Ok(())
        }
        Err(e) => {
            out::print_error_report(&e, cfg.debug);
            if let NzbMoveError::Transfer { source, .. } = &e
                && let Some(hint) = hint_for(source)
            {
                out::print_info(&format!("hint: {hint}"));
            }
            finish_with_wait(args.no_wait);
            Err(e)
        }
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            PathBuf::from(cfg_env).display()
        ));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("nzb_move config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet. Run without --print-config to create a template.",
                );
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a config path: {e}")),
    }
}

/// Locate the XML config (writing a template on first run) and apply CLI overrides.
fn load_config(args: &Args) -> Result<Config, NzbMoveError> {
    match load_or_init().map_err(NzbMoveError::Config)? {
        LoadResult::Loaded { mut config, path } => {
            args.apply_overrides(&mut config);
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template nzb_move config was written to: {}",
                path.display()
            ));
            out::print_info(&format!(
                "Set <target> (and anything else you need), then run again. To use a different file set {CONFIG_ENV}."
            ));
            Err(NzbMoveError::ConfigMissing(path))
        }
    }
}

fn process(args: &Args, cfg: &mut Config) -> Result<TransferReport, NzbMoveError> {
    out::step_start("Checking configuration");
    if let Err(e) = cfg.validate_and_normalize() {
        out::step_end(StepStatus::Error);
        return Err(NzbMoveError::Config(e));
    }
    out::step_end(StepStatus::Done);

    let source = args.resolved_source().ok_or(NzbMoveError::NoSourceGiven)?;
    if !source.is_file() {
        return Err(NzbMoveError::SourceNotFound(source));
    }
    log_sidecar_summary(&source);

    // An unusable source name fails here, before any prompt.
    let request = TransferRequest::from_source(&source, cfg, None)?;
    let request = request.with_password_suffix(discover_password(&source, cfg)?);
    let dst = request.target_path()?;

    shutdown::ensure_running()?;

    let verb = match request.action {
        nzb_move::FileAction::Move => "Moving",
        nzb_move::FileAction::Copy => "Copying",
    };
    out::step_start(&format!(
        "{verb} '{}' to '{}'",
        source.display(),
        dst.display()
    ));
    let report = match execute(&request.source_path, &dst, request.action) {
        Ok(r) => r,
        Err(e) => {
            out::step_end(StepStatus::Error);
            return Err(e);
        }
    };

    if report.fell_back(request.action) {
        out::step_end(StepStatus::Warn);
        out::print_warn("Moving failed, the file was copied instead; the source was left in place.");
    } else {
        out::step_end(StepStatus::Done);
    }
    out::print_user(&format!("{} -> {}", source.display(), dst.display()));
    Ok(report)
}

/// Returns the `{{password}}` suffix to append, if any.
/// Only a password typed at the prompt is appended; an extracted one is already
/// in the name or in the NZB itself.
fn discover_password(source: &Path, cfg: &Config) -> Result<Option<String>, NzbMoveError> {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    out::step_start("Looking for a password");
    if let Some(pw) = extract_password(&file_name, source, cfg.password_extraction_method) {
        out::step_end(StepStatus::Done);
        out::print_info(&format!("Password found: {pw}"));
        return Ok(None);
    }
    out::step_end(StepStatus::Warn);

    if !cfg.ask_for_password {
        out::print_info("No password found.");
        return Ok(None);
    }
    let typed = out::prompt_password();
    // Ctrl-C does not unblock a pending line read; the line is discarded.
    shutdown::ensure_running()?;
    match typed {
        Ok(Some(pw)) => Ok(Some(password_suffix(&pw))),
        Ok(None) => Ok(None),
        Err(e) => {
            warn!(error = %e, "Could not read password from stdin");
            Ok(None)
        }
    }
}

fn log_sidecar_summary(source: &Path) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let is_nzb = source
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("nzb"));
    if !is_nzb {
        return;
    }
    match NzbDocument::load(source) {
        Ok(doc) => debug!(
            files = doc.files.len(),
            bytes = doc.total_bytes(),
            meta = doc.metadata.len(),
            "NZB summary"
        ),
        Err(e) => debug!(error = %e, "NZB could not be parsed"),
    }
}

fn finish_with_wait(no_wait: bool) {
    if !no_wait {
        out::wait_for_keypress();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_notice_mentions_pending_prompt() {
        assert!(INTERRUPT_NOTICE.contains("press Enter"));
    }
}
