//! Spreadsheet/PDF attachment-name check.
//!
//! Attachments whose file name ends in a configured extension must carry the
//! project number from the subject in at least one name; otherwise the
//! sender is asked to confirm.

use async_trait::async_trait;
use log::{debug, warn};

use crate::config::{AttachmentConfig, FailurePolicy};
use crate::host::MailItem;
use crate::rules::{RuleOutcome, SendRule, contains_id};

pub struct AttachmentRule {
    extensions: Vec<String>,
    id_match_ignores_case: bool,
    on_dialog_failure: FailurePolicy,
}

impl AttachmentRule {
    pub fn from_config(config: &AttachmentConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            id_match_ignores_case: config.id_match_ignores_case,
            on_dialog_failure: config.on_dialog_failure,
        }
    }

    /// Exact-case suffix match against the configured extensions.
    fn is_relevant(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

#[async_trait]
impl SendRule for AttachmentRule {
    fn name(&self) -> &'static str {
        "attachments"
    }

    fn on_dialog_failure(&self) -> FailurePolicy {
        self.on_dialog_failure
    }

    async fn evaluate(&self, item: &dyn MailItem, project_id: &str) -> RuleOutcome {
        let attachments = match item.attachments().await {
            Ok(attachments) => attachments,
            Err(e) => {
                warn!("attachment retrieval failed: {e}");
                return RuleOutcome::Skipped {
                    reason: format!("attachments unavailable: {e}"),
                };
            }
        };

        let relevant: Vec<_> = attachments
            .iter()
            .filter(|a| self.is_relevant(&a.name))
            .collect();
        if relevant.is_empty() {
            return RuleOutcome::Satisfied {
                reason: "no spreadsheet or PDF attachments".into(),
            };
        }

        debug!(
            "checking {} spreadsheet/PDF attachment name(s) for project number",
            relevant.len()
        );
        if relevant
            .iter()
            .any(|a| contains_id(&a.name, project_id, self.id_match_ignores_case))
        {
            return RuleOutcome::Satisfied {
                reason: "project number present in attachment name".into(),
            };
        }

        RuleOutcome::NeedsConfirmation {
            reason: format!(
                "{} spreadsheet/PDF attachment(s) without project number {project_id:?}",
                relevant.len()
            ),
        }
    }
}
