//! mail-sendgate: a send-intercept gate for mail clients.
//!
//! The gate runs once per send attempt. It extracts the project number from
//! the subject line (the first parenthesized token), then checks that the
//! number also appears in the body whenever the body carries a
//! meeting-recording link, and in the file names of spreadsheet/PDF
//! attachments. An unsatisfied check raises a modal confirmation dialog, and
//! the user's answer (or a configured policy when the dialog cannot open)
//! resolves the attempt to a single allow/block decision reported back to
//! the host.
//!
//! # Architecture
//!
//! - **[`host`]** — Adapter traits for the mail client: item property fetches and the dialog surface.
//! - **[`extract`]** — Project-number extraction from the subject line.
//! - **[`rules`]** — Validation rules: recording-link body check, attachment-name check.
//! - **[`gate`]** — The pipeline: rule driving, confirmation gate, decision types.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Logger setup and per-send decision logging.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Project-number extraction from the subject line.
pub mod extract;
/// Send pipeline, confirmation gate, and decision types.
pub mod gate;
/// Host adapter traits and error taxonomy.
pub mod host;
/// Logger setup and file-based decision logging.
pub mod logging;
/// Send-validation rule trait and implementations.
pub mod rules;

use std::sync::Arc;

use gate::{SendGuard, SendVerdict};
use host::{DialogHost, MailItem};

/// Validate one send attempt with the default configuration.
///
/// This is the main entry point for embedding hosts and simple usage. For a
/// deployment with user configuration, build a [`SendGuard`] from
/// [`config::Config::load`] directly.
pub async fn validate_send(
    item: Option<&dyn MailItem>,
    dialogs: Arc<dyn DialogHost>,
) -> SendVerdict {
    let config = config::Config::default_config();
    let guard = SendGuard::from_config(&config, dialogs);
    let verdict = guard.run(item).await;
    logging::log_decision(&verdict);
    verdict
}
