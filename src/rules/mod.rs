//! Send-validation rules: per-check logic deciding whether a send may proceed.
//!
//! Each check is a `SendRule` built from its config section. A rule fetches
//! what it needs from the host item and either passes the send through,
//! skips itself when the host cannot supply the data, or escalates to the
//! confirmation gate.

/// Spreadsheet/PDF attachment-name check.
pub mod attachment;
/// Meeting-recording-link body check.
pub mod body_link;

use async_trait::async_trait;

use crate::config::FailurePolicy;
use crate::host::MailItem;

/// Outcome of evaluating one rule against the in-flight item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule holds; continue without user interaction.
    Satisfied { reason: String },
    /// The rule could not be checked (host retrieval failed); fail open.
    Skipped { reason: String },
    /// The rule does not hold; ask the user before sending.
    NeedsConfirmation { reason: String },
}

/// Trait for send-validation rules.
#[async_trait]
pub trait SendRule: Send + Sync {
    /// Short rule name used in logs.
    fn name(&self) -> &'static str;

    /// Policy when this rule escalates but the dialog cannot be opened.
    fn on_dialog_failure(&self) -> FailurePolicy;

    /// Evaluate the rule for `item` with the extracted `project_id`.
    async fn evaluate(&self, item: &dyn MailItem, project_id: &str) -> RuleOutcome;
}

/// Literal project-number containment with configurable case folding.
pub(crate) fn contains_id(haystack: &str, id: &str, ignore_case: bool) -> bool {
    if ignore_case {
        haystack.to_lowercase().contains(&id.to_lowercase())
    } else {
        haystack.contains(id)
    }
}
