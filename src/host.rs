//! Host adapter traits: the seam between the pipeline and the mail client.
//!
//! The pipeline never talks to the client runtime directly. It consumes the
//! in-flight mail item and the dialog surface through these traits, so a
//! deployment binds them to the real client APIs and tests substitute
//! doubles.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by host API calls.
#[derive(Debug, Error)]
pub enum HostError {
    /// A property fetch (subject, body, attachments) failed.
    #[error("{property} retrieval failed: {detail}")]
    Retrieval {
        property: &'static str,
        detail: String,
    },
    /// The dialog surface could not be opened.
    #[error("dialog failed to open: {0}")]
    DialogOpen(String),
    /// The dialog's message channel closed before a message arrived.
    #[error("dialog closed without a response")]
    DialogClosed,
}

pub type HostResult<T> = Result<T, HostError>;

/// Coercion applied by the host when returning the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCoercion {
    /// Body flattened to plain text. The rules always ask for this.
    PlainText,
    /// Raw HTML body.
    Html,
}

/// An attachment as reported by the host. Only the file name is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// File name including extension.
    pub name: String,
}

/// The in-flight mail item of one send attempt.
#[async_trait]
pub trait MailItem: Send + Sync {
    /// Fetch the subject line.
    async fn subject(&self) -> HostResult<String>;

    /// Fetch the body under the given coercion.
    async fn body(&self, coercion: BodyCoercion) -> HostResult<String>;

    /// Fetch attachment metadata.
    async fn attachments(&self) -> HostResult<Vec<AttachmentRef>>;
}

/// Options passed to the host when opening a dialog surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogOptions {
    pub height: u32,
    pub width: u32,
    pub display_in_iframe: bool,
}

/// A dialog opened via [`DialogHost::open`].
///
/// The gate receives exactly one message per dialog and closes the handle
/// afterwards on every path.
#[async_trait]
pub trait DialogHandle: Send {
    /// Await the next message posted by the dialog page.
    async fn next_message(&mut self) -> HostResult<String>;

    /// Close the dialog surface.
    async fn close(&mut self);
}

/// The host's modal dialog capability.
#[async_trait]
pub trait DialogHost: Send + Sync {
    /// Open a dialog at `url` with the given options.
    async fn open(&self, url: &str, options: DialogOptions) -> HostResult<Box<dyn DialogHandle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_options_serialize_to_host_casing() {
        let options = DialogOptions {
            height: 40,
            width: 30,
            display_in_iframe: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"height":40,"width":30,"displayInIframe":true}"#);
    }

    #[test]
    fn host_error_messages() {
        let e = HostError::Retrieval {
            property: "subject",
            detail: "timeout".into(),
        };
        assert_eq!(e.to_string(), "subject retrieval failed: timeout");
        assert_eq!(
            HostError::DialogClosed.to_string(),
            "dialog closed without a response"
        );
    }
}
