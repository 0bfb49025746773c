use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub body_link: BodyLinkConfig,
    #[serde(default)]
    pub attachments: AttachmentConfig,
}

/// Policy applied when a rule escalates but the confirmation dialog cannot
/// be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Veto the send.
    #[default]
    Block,
    /// Let the send proceed.
    Allow,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct DialogConfig {
    /// Confirmation page served into the host dialog surface.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub display_in_iframe: bool,
    /// Seconds to wait for the user's answer. 0 waits indefinitely.
    #[serde(default)]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct BodyLinkConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Substrings that mark the body as carrying a meeting recording.
    #[serde(default)]
    pub link_patterns: Vec<String>,
    #[serde(default)]
    pub link_match_ignores_case: bool,
    #[serde(default)]
    pub id_match_ignores_case: bool,
    #[serde(default)]
    pub on_dialog_failure: FailurePolicy,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct AttachmentConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Filename suffixes whose attachments must carry the project number.
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub id_match_ignores_case: bool,
    #[serde(default)]
    pub on_dialog_failure: FailurePolicy,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    dialog: DialogOverlay,
    #[serde(default)]
    body_link: BodyLinkOverlay,
    #[serde(default)]
    attachments: AttachmentOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct DialogOverlay {
    url: Option<String>,
    height: Option<u32>,
    width: Option<u32>,
    display_in_iframe: Option<bool>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct BodyLinkOverlay {
    #[serde(default)]
    replace: bool,
    enabled: Option<bool>,
    #[serde(default)]
    link_patterns: Vec<String>,
    #[serde(default)]
    remove_link_patterns: Vec<String>,
    link_match_ignores_case: Option<bool>,
    id_match_ignores_case: Option<bool>,
    on_dialog_failure: Option<FailurePolicy>,
}

#[derive(Debug, Deserialize, Default)]
struct AttachmentOverlay {
    #[serde(default)]
    replace: bool,
    enabled: Option<bool>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    remove_extensions: Vec<String>,
    id_match_ignores_case: Option<bool>,
    on_dialog_failure: Option<FailurePolicy>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/mail-sendgate/config.toml (if exists)
    ///
    /// User config merges with defaults: lists extend, scalars override.
    /// Set `replace = true` in a rule section to replace its lists entirely.
    /// Use `remove_<field>` lists to subtract specific items from defaults.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/mail-sendgate/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/mail-sendgate/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::error!("config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Dialog: scalar overrides only
        let d = overlay.dialog;
        if let Some(v) = d.url {
            self.dialog.url = v;
        }
        if let Some(v) = d.height {
            self.dialog.height = v;
        }
        if let Some(v) = d.width {
            self.dialog.width = v;
        }
        if let Some(v) = d.display_in_iframe {
            self.dialog.display_in_iframe = v;
        }
        if let Some(v) = d.timeout_secs {
            self.dialog.timeout_secs = v;
        }

        // Body-link rule
        let b = overlay.body_link;
        merge_list(
            &mut self.body_link.link_patterns,
            b.link_patterns,
            &b.remove_link_patterns,
            b.replace,
        );
        if let Some(v) = b.enabled {
            self.body_link.enabled = v;
        }
        if let Some(v) = b.link_match_ignores_case {
            self.body_link.link_match_ignores_case = v;
        }
        if let Some(v) = b.id_match_ignores_case {
            self.body_link.id_match_ignores_case = v;
        }
        if let Some(v) = b.on_dialog_failure {
            self.body_link.on_dialog_failure = v;
        }

        // Attachment rule
        let a = overlay.attachments;
        merge_list(
            &mut self.attachments.extensions,
            a.extensions,
            &a.remove_extensions,
            a.replace,
        );
        if let Some(v) = a.enabled {
            self.attachments.enabled = v;
        }
        if let Some(v) = a.id_match_ignores_case {
            self.attachments.id_match_ignores_case = v;
        }
        if let Some(v) = a.on_dialog_failure {
            self.attachments.on_dialog_failure = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
