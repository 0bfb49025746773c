//! Confirmation gate: one dialog, one message, one close.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::config::DialogConfig;
use crate::gate::ConfirmationResult;
use crate::host::{DialogHost, DialogOptions};

/// Message the dialog page posts when the user chooses to send anyway.
const CONFIRM_MESSAGE: &str = "confirmed";

/// Presents the modal dialog and resolves the user's answer.
pub struct ConfirmationGate {
    dialogs: Arc<dyn DialogHost>,
    url: String,
    options: DialogOptions,
    timeout: Option<Duration>,
}

impl ConfirmationGate {
    pub fn from_config(config: &DialogConfig, dialogs: Arc<dyn DialogHost>) -> Self {
        Self {
            dialogs,
            url: config.url.clone(),
            options: DialogOptions {
                height: config.height,
                width: config.width,
                display_in_iframe: config.display_in_iframe,
            },
            timeout: (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs)),
        }
    }

    /// Open the dialog and await exactly one response message.
    pub async fn confirm(&self) -> ConfirmationResult {
        let mut dialog = match self.dialogs.open(&self.url, self.options.clone()).await {
            Ok(dialog) => dialog,
            Err(e) => {
                error!("failed to open confirmation dialog: {e}");
                return ConfirmationResult::DialogFailed;
            }
        };

        let message = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, dialog.next_message()).await {
                Ok(received) => received,
                Err(_) => {
                    warn!("no dialog response within {limit:?}; treating as cancel");
                    dialog.close().await;
                    return ConfirmationResult::Cancelled;
                }
            },
            None => dialog.next_message().await,
        };
        dialog.close().await;

        match message {
            Ok(m) if m == CONFIRM_MESSAGE => {
                info!("user confirmed send");
                ConfirmationResult::Confirmed
            }
            Ok(m) => {
                info!("user cancelled send (dialog response {m:?})");
                ConfirmationResult::Cancelled
            }
            Err(e) => {
                warn!("dialog closed without a response: {e}");
                ConfirmationResult::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::config::Config;
    use crate::host::{DialogHandle, HostError, HostResult};

    /// What the scripted dialog does after opening.
    #[derive(Clone, Copy)]
    enum Script {
        Reply(&'static str),
        Hang,
        DropChannel,
    }

    /// Scripted dialog host: `script` of `None` fails the open.
    struct ScriptedDialogs {
        script: Option<Script>,
        opens: AtomicUsize,
        closes: Arc<AtomicUsize>,
    }

    impl ScriptedDialogs {
        fn new(script: Option<Script>) -> Arc<Self> {
            Arc::new(Self {
                script,
                opens: AtomicUsize::new(0),
                closes: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    struct ScriptedHandle {
        script: Script,
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DialogHandle for ScriptedHandle {
        async fn next_message(&mut self) -> HostResult<String> {
            match self.script {
                Script::Reply(message) => Ok(message.to_string()),
                Script::Hang => std::future::pending().await,
                Script::DropChannel => Err(HostError::DialogClosed),
            }
        }

        async fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl DialogHost for ScriptedDialogs {
        async fn open(
            &self,
            _url: &str,
            _options: DialogOptions,
        ) -> HostResult<Box<dyn DialogHandle>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Some(script) => Ok(Box::new(ScriptedHandle {
                    script,
                    closes: Arc::clone(&self.closes),
                })),
                None => Err(HostError::DialogOpen("no dialog surface".into())),
            }
        }
    }

    fn gate(dialogs: Arc<ScriptedDialogs>) -> ConfirmationGate {
        ConfirmationGate::from_config(&Config::default_config().dialog, dialogs)
    }

    #[tokio::test]
    async fn confirmed_message_confirms() {
        let dialogs = ScriptedDialogs::new(Some(Script::Reply("confirmed")));
        let result = gate(Arc::clone(&dialogs)).confirm().await;
        assert_eq!(result, ConfirmationResult::Confirmed);
        assert_eq!(dialogs.opens.load(Ordering::SeqCst), 1);
        assert_eq!(dialogs.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn any_other_message_cancels() {
        let dialogs = ScriptedDialogs::new(Some(Script::Reply("cancelled")));
        let result = gate(Arc::clone(&dialogs)).confirm().await;
        assert_eq!(result, ConfirmationResult::Cancelled);
        assert_eq!(dialogs.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn confirmation_message_is_exact() {
        let dialogs = ScriptedDialogs::new(Some(Script::Reply("Confirmed")));
        let result = gate(dialogs).confirm().await;
        assert_eq!(result, ConfirmationResult::Cancelled);
    }

    #[tokio::test]
    async fn open_failure_reports_dialog_failed() {
        let dialogs = ScriptedDialogs::new(None);
        let result = gate(Arc::clone(&dialogs)).confirm().await;
        assert_eq!(result, ConfirmationResult::DialogFailed);
        assert_eq!(dialogs.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dropped_channel_cancels_and_closes() {
        let dialogs = ScriptedDialogs::new(Some(Script::DropChannel));
        let result = gate(Arc::clone(&dialogs)).confirm().await;
        assert_eq!(result, ConfirmationResult::Cancelled);
        assert_eq!(dialogs.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timeout_cancels_and_closes() {
        let dialogs = ScriptedDialogs::new(Some(Script::Hang));
        let mut gate = gate(Arc::clone(&dialogs));
        gate.timeout = Some(Duration::from_millis(20));
        let result = gate.confirm().await;
        assert_eq!(result, ConfirmationResult::Cancelled);
        assert_eq!(dialogs.closes.load(Ordering::SeqCst), 1);
    }
}
