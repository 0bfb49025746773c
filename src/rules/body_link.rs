//! Meeting-recording-link body check.
//!
//! A body that carries a recording link must also carry the project number
//! from the subject; otherwise the sender is asked to confirm.

use async_trait::async_trait;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{BodyLinkConfig, FailurePolicy};
use crate::host::{BodyCoercion, MailItem};
use crate::rules::{RuleOutcome, SendRule, contains_id};

pub struct BodyLinkRule {
    link_patterns: Vec<Regex>,
    id_match_ignores_case: bool,
    on_dialog_failure: FailurePolicy,
}

impl BodyLinkRule {
    pub fn from_config(config: &BodyLinkConfig) -> Self {
        let link_patterns = config
            .link_patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(&regex::escape(p))
                    .case_insensitive(config.link_match_ignores_case)
                    .build()
                    .expect("escaped link pattern must compile")
            })
            .collect();
        Self {
            link_patterns,
            id_match_ignores_case: config.id_match_ignores_case,
            on_dialog_failure: config.on_dialog_failure,
        }
    }

    fn has_link(&self, body: &str) -> bool {
        self.link_patterns.iter().any(|re| re.is_match(body))
    }
}

#[async_trait]
impl SendRule for BodyLinkRule {
    fn name(&self) -> &'static str {
        "body-link"
    }

    fn on_dialog_failure(&self) -> FailurePolicy {
        self.on_dialog_failure
    }

    async fn evaluate(&self, item: &dyn MailItem, project_id: &str) -> RuleOutcome {
        let body = match item.body(BodyCoercion::PlainText).await {
            Ok(body) => body,
            Err(e) => {
                warn!("body retrieval failed: {e}");
                return RuleOutcome::Skipped {
                    reason: format!("body unavailable: {e}"),
                };
            }
        };

        if !self.has_link(&body) {
            return RuleOutcome::Satisfied {
                reason: "no recording link in body".into(),
            };
        }

        debug!("recording link detected; checking body for project number");
        if contains_id(&body, project_id, self.id_match_ignores_case) {
            return RuleOutcome::Satisfied {
                reason: "project number present alongside recording link".into(),
            };
        }

        RuleOutcome::NeedsConfirmation {
            reason: format!("recording link in body without project number {project_id:?}"),
        }
    }
}
