//! The send-validation pipeline: intercept, extract, check, confirm, decide.

pub mod confirm;
pub mod decision;

pub use confirm::ConfirmationGate;
pub use decision::{ConfirmationResult, Decision, SendResponse, SendVerdict};

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::{Config, FailurePolicy};
use crate::extract;
use crate::host::{DialogHost, MailItem};
use crate::rules::attachment::AttachmentRule;
use crate::rules::body_link::BodyLinkRule;
use crate::rules::{RuleOutcome, SendRule};

/// The send-intercept pipeline.
///
/// One [`run`](SendGuard::run) per send attempt; each call resolves to
/// exactly one [`SendVerdict`]. Rules run in order and each unsatisfied rule
/// raises the confirmation gate before the next rule is considered.
pub struct SendGuard {
    rules: Vec<Box<dyn SendRule>>,
    gate: ConfirmationGate,
}

impl SendGuard {
    /// Build the pipeline from configuration and the host dialog capability.
    pub fn from_config(config: &Config, dialogs: Arc<dyn DialogHost>) -> Self {
        let mut rules: Vec<Box<dyn SendRule>> = Vec::new();
        if config.body_link.enabled {
            rules.push(Box::new(BodyLinkRule::from_config(&config.body_link)));
        }
        if config.attachments.enabled {
            rules.push(Box::new(AttachmentRule::from_config(&config.attachments)));
        }
        Self {
            rules,
            gate: ConfirmationGate::from_config(&config.dialog, dialogs),
        }
    }

    /// Validate one send attempt.
    ///
    /// `item` is the host's current mail item, or `None` when the host has
    /// none — which allows the send, since there is nothing to validate.
    pub async fn run(&self, item: Option<&dyn MailItem>) -> SendVerdict {
        let Some(item) = item else {
            warn!("no mail item available");
            return self.finish(SendVerdict::allow("no mail item available"));
        };

        let subject = match item.subject().await {
            Ok(subject) => subject,
            Err(e) => {
                warn!("subject retrieval failed: {e}");
                return self.finish(SendVerdict::allow(format!("subject unavailable: {e}")));
            }
        };

        let verdict = match extract::project_id(&subject) {
            None => {
                info!("no project number in subject {subject:?}");
                SendVerdict::allow("no project number in subject")
            }
            Some(project_id) => {
                info!("project number {project_id:?} extracted from subject");
                self.check_rules(item, project_id).await
            }
        };
        self.finish(verdict)
    }

    /// Run the enabled rules in order, raising the confirmation gate for
    /// each unsatisfied one.
    async fn check_rules(&self, item: &dyn MailItem, project_id: &str) -> SendVerdict {
        for rule in &self.rules {
            match rule.evaluate(item, project_id).await {
                RuleOutcome::Satisfied { reason } => {
                    debug!("rule {}: {reason}", rule.name());
                }
                RuleOutcome::Skipped { reason } => {
                    warn!("rule {} skipped: {reason}", rule.name());
                }
                RuleOutcome::NeedsConfirmation { reason } => {
                    warn!("rule {}: {reason}", rule.name());
                    match self.gate.confirm().await {
                        ConfirmationResult::Confirmed => continue,
                        ConfirmationResult::Cancelled => {
                            return SendVerdict::block(format!("{reason}; user cancelled"));
                        }
                        ConfirmationResult::DialogFailed => match rule.on_dialog_failure() {
                            FailurePolicy::Block => {
                                return SendVerdict::block(format!(
                                    "{reason}; confirmation dialog failed"
                                ));
                            }
                            FailurePolicy::Allow => {
                                warn!(
                                    "rule {}: dialog failed, configured to allow",
                                    rule.name()
                                );
                                continue;
                            }
                        },
                    }
                }
            }
        }
        SendVerdict::allow("all checks passed")
    }

    /// The single emission point: every path funnels its verdict through here.
    fn finish(&self, verdict: SendVerdict) -> SendVerdict {
        info!(
            "send decision: {} ({})",
            verdict.decision.label(),
            verdict.reason
        );
        verdict
    }
}
