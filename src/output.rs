use owo_colors::OwoColorize;
use std::error::Error as StdError;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// True when a human can answer prompts.
pub fn stdin_is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as "Moved X -> Y" which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Warn,
    Error,
}

/// Begin a step line: "Moving file ... " (status follows on the same line).
pub fn step_start(msg: &str) {
    print!("{msg} ... ");
    let _ = io::stdout().flush();
}

/// Finish the line opened by `step_start`.
pub fn step_end(status: StepStatus) {
    let label = match status {
        StepStatus::Done => "DONE",
        StepStatus::Warn => "WARN",
        StepStatus::Error => "ERROR",
    };
    if !is_tty() {
        println!("{label}");
        return;
    }
    match status {
        StepStatus::Done => println!("{}", label.green().bold()),
        StepStatus::Warn => println!("{}", label.yellow().bold()),
        StepStatus::Error => println!("{}", label.red().bold()),
    }
}

/// Lines of an error report. The cause chain is listed only when `detailed` is set.
pub fn error_report_lines(err: &(dyn StdError + 'static), detailed: bool) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    if detailed {
        let mut cur = err.source();
        while let Some(cause) = cur {
            lines.push(format!("  caused by: {cause}"));
            cur = cause.source();
        }
    } else if err.source().is_some() {
        lines.push("  (enable debug for details)".to_string());
    }
    lines
}

/// Print an error block on stderr.
pub fn print_error_report(err: &(dyn StdError + 'static), detailed: bool) {
    let mut lines = error_report_lines(err, detailed).into_iter();
    if let Some(head) = lines.next() {
        print_error(&head);
    }
    for line in lines {
        eprintln!("{line}");
    }
}

/// Block until Enter is pressed. Returns immediately when stdin is not a terminal.
pub fn wait_for_keypress() {
    if !stdin_is_interactive() {
        return;
    }
    print_user("Press Enter to exit...");
    let mut buf = String::new();
    let _ = io::stdin().lock().read_line(&mut buf);
}

/// Print a "Closing in N..." countdown, one tick per second.
pub fn countdown(delay: Duration) {
    let secs = delay.as_secs();
    for remaining in (1..=secs).rev() {
        print!("\rClosing in {remaining}... ");
        let _ = io::stdout().flush();
        thread::sleep(Duration::from_secs(1));
    }
    if secs > 0 {
        println!();
    }
}

/// Read one password line from `reader`. Blank input means "no password".
pub fn read_password_from<R: BufRead>(mut reader: R) -> io::Result<Option<String>> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let trimmed = line.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Ask the user for a password on stdin.
pub fn prompt_password() -> io::Result<Option<String>> {
    if !stdin_is_interactive() {
        return Ok(None);
    }
    print!("Password (leave empty for none): ");
    io::stdout().flush()?;
    read_password_from(io::stdin().lock())
}
