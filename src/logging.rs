//! Logger setup and file-based decision logging.

use std::io::Write;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::gate::SendVerdict;

/// Initialize terminal logging for embedding hosts that bring no logger of
/// their own. Later calls are ignored once a logger is installed.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Append a decision record to ~/.local/share/mail-sendgate/decisions.log.
/// Best-effort: failures are silently ignored (logging must never block the send).
pub fn log_decision(verdict: &SendVerdict) {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/mail-sendgate");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_path = log_dir.join("decisions.log");
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };

    // Compact single-line reason for the log
    let reason_oneline = verdict.reason.replace('\n', "; ");
    let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let _ = writeln!(
        file,
        "{ts}\t{decision}\t{reason}",
        decision = verdict.decision.as_str(),
        reason = reason_oneline,
    );
}
