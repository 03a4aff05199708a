//! Widget configuration from TOML.
//!
//! Every section is optional; anything left out falls back to the presets.
//!
//! ```toml
//! [keys.form]
//! previous = ["shift+tab", "ctrl+p"]
//! next = ["tab", "ctrl+n"]
//! submit = ["enter"]
//!
//! [keys.tabs]
//! next = ["right", "l"]
//!
//! [tabs]
//! active = "#ff5f87"
//! inactive = "240"
//!
//! [form]
//! max_field_width = 60
//! ```

use std::path::{Path, PathBuf};

use chatui_runtime::ChordParseError;
use chatui_style::{Color, ColorParseError};
use serde::Deserialize;
use thiserror::Error;

use crate::field::FormField;
use crate::form::{DEFAULT_MAX_FIELD_WIDTH, Form};
use crate::item::ItemCollection;
use crate::key::{Binding, KeyMap};
use crate::picker::Picker;
use crate::tabs::{TabStrip, TabStyles};

/// Errors from loading widget configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The text is not valid TOML or has the wrong shape.
    #[error("invalid widget config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A key chord could not be parsed.
    #[error("bad chord in [keys.{section}] {action}: {source}")]
    Chord {
        /// Keymap section (`form`, `picker` or `tabs`).
        section: &'static str,
        /// Action name (`previous`, `next` or `submit`).
        action: &'static str,
        /// Underlying error.
        source: ChordParseError,
    },
    /// A color could not be parsed.
    #[error("bad color in [tabs]: {0}")]
    Color(#[from] ColorParseError),
    /// `max_field_width` was zero.
    #[error("form.max_field_width must be at least 1")]
    ZeroWidth,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    keys: RawKeys,
    tabs: RawTabs,
    form: RawForm,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawKeys {
    form: RawKeyMap,
    picker: RawKeyMap,
    tabs: RawKeyMap,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawKeyMap {
    previous: Option<Vec<String>>,
    next: Option<Vec<String>>,
    submit: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTabs {
    active: Option<String>,
    inactive: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawForm {
    max_field_width: Option<usize>,
}

impl RawKeyMap {
    fn resolve(&self, section: &'static str, base: KeyMap) -> Result<KeyMap, ConfigError> {
        let rebind = |action: &'static str, chords: Option<&Vec<String>>, binding: Binding| {
            let Some(chords) = chords else {
                return Ok(binding);
            };
            let help = binding.get_help().clone();
            Binding::new()
                .try_keys(chords.as_slice())
                .map(|b| b.help(help.key, help.desc))
                .map_err(|source| ConfigError::Chord {
                    section,
                    action,
                    source,
                })
        };
        Ok(KeyMap {
            previous: rebind("previous", self.previous.as_ref(), base.previous)?,
            next: rebind("next", self.next.as_ref(), base.next)?,
            submit: rebind("submit", self.submit.as_ref(), base.submit)?,
        })
    }
}

/// Resolved widget configuration.
///
/// # Example
///
/// ```rust
/// use chatui_widgets::WidgetConfig;
///
/// let config = WidgetConfig::from_toml_str("[form]\nmax_field_width = 24").unwrap();
/// assert_eq!(config.max_field_width, 24);
/// assert_eq!(config.form_keys, chatui_widgets::KeyMap::form());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Keymap for forms.
    pub form_keys: KeyMap,
    /// Keymap for pickers.
    pub picker_keys: KeyMap,
    /// Keymap for tab strips.
    pub tab_keys: KeyMap,
    /// Tab strip styles.
    pub tab_styles: TabStyles,
    /// Upper bound on form field width.
    pub max_field_width: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            form_keys: KeyMap::form(),
            picker_keys: KeyMap::picker(),
            tab_keys: KeyMap::tabs(),
            tab_styles: TabStyles::default(),
            max_field_width: DEFAULT_MAX_FIELD_WIDTH,
        }
    }
}

impl WidgetConfig {
    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;

        let mut tab_styles = TabStyles::default();
        if let Some(color) = &raw.tabs.active {
            tab_styles.active = tab_styles.active.foreground(color.parse::<Color>()?);
        }
        if let Some(color) = &raw.tabs.inactive {
            tab_styles.inactive = tab_styles.inactive.foreground(color.parse::<Color>()?);
        }

        let max_field_width = match raw.form.max_field_width {
            Some(0) => return Err(ConfigError::ZeroWidth),
            Some(w) => w,
            None => DEFAULT_MAX_FIELD_WIDTH,
        };

        let config = Self {
            form_keys: raw.keys.form.resolve("form", KeyMap::form())?,
            picker_keys: raw.keys.picker.resolve("picker", KeyMap::picker())?,
            tab_keys: raw.keys.tabs.resolve("tabs", KeyMap::tabs())?,
            tab_styles,
            max_field_width,
        };
        tracing::debug!(max_field_width, "loaded widget config");
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build a form with this configuration.
    pub fn form(&self, fields: Vec<FormField>) -> Form {
        Form::new(fields)
            .with_key_map(self.form_keys.clone())
            .with_max_field_width(self.max_field_width)
    }

    /// Build a picker with this configuration.
    pub fn picker(&self, items: impl Into<ItemCollection>) -> Picker {
        Picker::new(items).with_key_map(self.picker_keys.clone())
    }

    /// Build a tab strip with this configuration.
    pub fn tabs<S: Into<String>>(&self, labels: impl IntoIterator<Item = S>) -> TabStrip {
        TabStrip::new(labels)
            .with_key_map(self.tab_keys.clone())
            .with_styles(self.tab_styles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyAction;
    use chatui_runtime::KeyMsg;

    fn key(text: &str) -> KeyMsg {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_config_is_presets() {
        assert_eq!(WidgetConfig::from_toml_str("").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_override_one_action() {
        let config = WidgetConfig::from_toml_str(
            r#"
[keys.tabs]
next = ["l"]
"#,
        )
        .unwrap();
        assert_eq!(config.tab_keys.action_for(&key("l")), Some(KeyAction::Next));
        assert_eq!(config.tab_keys.action_for(&key("right")), None);
        assert_eq!(config.tab_keys.action_for(&key("left")), Some(KeyAction::Previous));
        assert_eq!(config.tab_keys.next.get_help().desc, "next tab");
    }

    #[test]
    fn test_configured_submit_enables_binding() {
        let config = WidgetConfig::from_toml_str("[keys.tabs]\nsubmit = [\"enter\"]").unwrap();
        assert_eq!(config.tab_keys.action_for(&key("enter")), Some(KeyAction::Submit));
    }

    #[test]
    fn test_bad_chord_is_rejected() {
        let err = WidgetConfig::from_toml_str("[keys.picker]\nnext = [\"hyper+j\"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Chord {
                section: "picker",
                action: "next",
                source: ChordParseError::UnknownModifier(_),
            }
        ));
    }

    #[test]
    fn test_empty_chord_list_is_rejected() {
        let err = WidgetConfig::from_toml_str("[keys.form]\nsubmit = []").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Chord {
                section: "form",
                action: "submit",
                source: ChordParseError::Empty,
            }
        ));
    }

    #[test]
    fn test_tab_colors() {
        let config = WidgetConfig::from_toml_str("[tabs]\nactive = \"#ff0000\"\ninactive = \"8\"").unwrap();
        assert_eq!(config.tab_styles.active.get_foreground(), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(config.tab_styles.inactive.get_foreground(), Some(Color::Ansi(8)));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = WidgetConfig::from_toml_str("[tabs]\nactive = \"mauve\"").unwrap_err();
        assert!(matches!(err, ConfigError::Color(_)));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let err = WidgetConfig::from_toml_str("[theme]\nx = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let err = WidgetConfig::from_toml_str("[form]\nmax_field_width = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWidth));
    }

    #[test]
    fn test_builders_apply_config() {
        let config = WidgetConfig::from_toml_str("[form]\nmax_field_width = 12").unwrap();
        let form = config.form(vec![FormField::new("a")]);
        assert_eq!(form.field(0).unwrap().width(), 12);
        let tabs = config.tabs(["a", "b"]);
        assert_eq!(tabs.key_map, KeyMap::tabs());
        let picker = config.picker(vec![crate::Item::from("x")]);
        assert_eq!(picker.key_map, KeyMap::picker());
    }
}
