use serde::Serialize;

/// Terminal decision for one send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Block,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Block => "block",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Block => "BLOCK",
        }
    }

    /// The completion payload reported to the host send-intercept.
    pub fn response(self) -> SendResponse {
        SendResponse {
            allow_event: self == Decision::Allow,
        }
    }
}

/// A decision paired with the reason that produced it.
#[derive(Debug, Clone)]
pub struct SendVerdict {
    pub decision: Decision,
    pub reason: String,
}

impl SendVerdict {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Allow,
            reason: reason.into(),
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Block,
            reason: reason.into(),
        }
    }
}

/// Payload for the host completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub allow_event: bool,
}

impl SendResponse {
    /// Serialize to the host wire format.
    pub fn to_json(self) -> String {
        serde_json::to_string(&self).expect("completion payload serializes")
    }
}

/// Outcome of one confirmation-gate invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    /// The user chose to send anyway.
    Confirmed,
    /// The user cancelled, or no confirmation arrived.
    Cancelled,
    /// The dialog surface could not be opened.
    DialogFailed,
}
