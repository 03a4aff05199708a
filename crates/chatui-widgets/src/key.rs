//! Keybinding definitions and matching utilities.
//!
//! A [`Binding`] is a set of parsed key chords plus help text. A [`KeyMap`]
//! groups the three navigation actions every widget understands: move to the
//! previous element, move to the next one, and submit.
//!
//! # Example
//!
//! ```rust
//! use chatui_runtime::{KeyCode, KeyMsg};
//! use chatui_widgets::key::{Binding, KeyAction, KeyMap, matches};
//!
//! let up = Binding::new().keys(&["k", "up"]).help("↑/k", "move up");
//! let down = Binding::new().keys(&["j", "down"]).help("↓/j", "move down");
//!
//! assert!(matches(&KeyMsg::from_char('k'), &[&up, &down]));
//! assert!(matches(&KeyMsg::from_code(KeyCode::Down), &[&up, &down]));
//! assert!(!matches(&KeyMsg::from_char('x'), &[&up, &down]));
//!
//! let form = KeyMap::form();
//! assert_eq!(form.action_for(&KeyMsg::from_code(KeyCode::Tab)), Some(KeyAction::Next));
//! ```

use chatui_runtime::{ChordParseError, KeyMsg};

/// Help information for a keybinding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key(s) to display in help text (e.g., "↑/k").
    pub key: String,
    /// Description of what the binding does.
    pub desc: String,
}

impl Help {
    /// Creates new help information.
    #[must_use]
    pub fn new(key: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: desc.into(),
        }
    }
}

/// A keybinding with associated help text.
///
/// A binding matches when it is enabled and one of its chords equals the
/// incoming key. A binding with no chords never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    keys: Vec<KeyMsg>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a new empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chords for this binding from their text form.
    ///
    /// Unparseable chords are skipped and logged. Use [`Binding::try_keys`]
    /// when the chords come from user configuration.
    ///
    /// ```rust
    /// use chatui_widgets::key::Binding;
    ///
    /// let binding = Binding::new().keys(&["k", "up", "ctrl+p"]);
    /// assert_eq!(binding.get_keys().len(), 3);
    /// ```
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys
            .iter()
            .filter_map(|text| match text.parse::<KeyMsg>() {
                Ok(key) => Some(key),
                Err(err) => {
                    tracing::warn!(chord = %text, error = %err, "skipping key chord");
                    None
                }
            })
            .collect();
        self
    }

    /// Sets the chords for this binding, failing on the first bad chord.
    ///
    /// An empty list is rejected; a bound action needs at least one chord.
    pub fn try_keys<S: AsRef<str>>(mut self, keys: &[S]) -> Result<Self, ChordParseError> {
        if keys.is_empty() {
            return Err(ChordParseError::Empty);
        }
        self.keys = keys
            .iter()
            .map(|text| text.as_ref().parse())
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Sets already-built chords.
    #[must_use]
    pub fn chords(mut self, keys: impl IntoIterator<Item = KeyMsg>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }

    /// Sets the help text for this binding.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help::new(key, desc);
        self
    }

    /// Creates a disabled binding.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns the chords for this binding.
    #[must_use]
    pub fn get_keys(&self) -> &[KeyMsg] {
        &self.keys
    }

    /// Returns the help information for this binding.
    #[must_use]
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// Returns whether this binding is enabled.
    ///
    /// A binding is enabled if it's not explicitly disabled and has at least one key.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether `key` triggers this binding.
    #[must_use]
    pub fn matches(&self, key: &KeyMsg) -> bool {
        self.enabled() && self.keys.contains(key)
    }
}

/// Checks if the given key matches any of the given bindings.
///
/// Only enabled bindings are considered.
pub fn matches(key: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(key))
}

/// A logical navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move to the previous element.
    Previous,
    /// Move to the next element.
    Next,
    /// Confirm the current element.
    Submit,
}

/// Bindings for the three navigation actions.
///
/// Every widget owns its own copy; the presets return a fresh value on each
/// call, so customizing one widget never affects another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    /// Move to the previous element.
    pub previous: Binding,
    /// Move to the next element.
    pub next: Binding,
    /// Confirm the current element.
    pub submit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::form()
    }
}

impl KeyMap {
    /// Form navigation: tab / shift+tab between fields, enter submits.
    pub fn form() -> Self {
        Self {
            previous: Binding::new()
                .keys(&["shift+tab", "up"])
                .help("shift+tab", "previous field"),
            next: Binding::new().keys(&["tab", "down"]).help("tab", "next field"),
            submit: Binding::new().keys(&["enter"]).help("enter", "submit"),
        }
    }

    /// List navigation for the picker. Letters are left free for the query.
    pub fn picker() -> Self {
        Self {
            previous: Binding::new().keys(&["up", "ctrl+p"]).help("↑/ctrl+p", "up"),
            next: Binding::new().keys(&["down", "ctrl+n"]).help("↓/ctrl+n", "down"),
            submit: Binding::new().keys(&["enter"]).help("enter", "select"),
        }
    }

    /// Tab strip navigation. Tabs have nothing to submit.
    pub fn tabs() -> Self {
        Self {
            previous: Binding::new()
                .keys(&["left", "shift+tab"])
                .help("←", "previous tab"),
            next: Binding::new().keys(&["right", "tab"]).help("→", "next tab"),
            submit: Binding::new().disabled(),
        }
    }

    /// The action `key` triggers, checked in Previous, Next, Submit order.
    pub fn action_for(&self, key: &KeyMsg) -> Option<KeyAction> {
        [
            (KeyAction::Previous, &self.previous),
            (KeyAction::Next, &self.next),
            (KeyAction::Submit, &self.submit),
        ]
        .into_iter()
        .find(|(_, binding)| binding.matches(key))
        .map(|(action, _)| action)
    }

    /// Returns bindings for the short help view.
    pub fn short_help(&self) -> Vec<&Binding> {
        [&self.previous, &self.next, &self.submit]
            .into_iter()
            .filter(|b| b.enabled() && !b.get_help().key.is_empty())
            .collect()
    }

    /// One-line help text, e.g. `"tab next field • enter submit"`.
    pub fn help_line(&self) -> String {
        self.short_help()
            .iter()
            .map(|b| format!("{} {}", b.get_help().key, b.get_help().desc))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatui_runtime::KeyCode;

    fn key(text: &str) -> KeyMsg {
        text.parse().unwrap()
    }

    #[test]
    fn test_binding_new() {
        let binding = Binding::new();
        assert!(binding.get_keys().is_empty());
        assert!(!binding.enabled());
    }

    #[test]
    fn test_binding_with_keys() {
        let binding = Binding::new().keys(&["k", "up"]);
        assert_eq!(binding.get_keys(), &[key("k"), key("up")]);
        assert!(binding.enabled());
    }

    #[test]
    fn test_binding_skips_bad_chords() {
        let binding = Binding::new().keys(&["k", "hyper+k", ""]);
        assert_eq!(binding.get_keys(), &[key("k")]);
    }

    #[test]
    fn test_binding_try_keys_reports_error() {
        let err = Binding::new().try_keys(&["k", "hyper+k"]).unwrap_err();
        assert_eq!(err, ChordParseError::UnknownModifier("hyper".into()));
    }

    #[test]
    fn test_binding_try_keys_rejects_empty_list() {
        let err = Binding::new().try_keys::<&str>(&[]).unwrap_err();
        assert_eq!(err, ChordParseError::Empty);
    }

    #[test]
    fn test_binding_disabled_never_matches() {
        let binding = Binding::new().keys(&["q"]).disabled();
        assert!(!binding.enabled());
        assert!(!binding.matches(&key("q")));
    }

    #[test]
    fn test_binding_set_enabled() {
        let mut binding = Binding::new().keys(&["q"]).disabled();
        binding.set_enabled(true);
        assert!(binding.matches(&key("q")));
    }

    #[test]
    fn test_matches_structural() {
        let prev = Binding::new().keys(&["shift+tab"]);
        assert!(matches(&KeyMsg::from_code(KeyCode::BackTab), &[&prev]));
        assert!(!matches(&KeyMsg::from_code(KeyCode::Tab), &[&prev]));
    }

    #[test]
    fn test_action_priority_previous_wins() {
        let map = KeyMap {
            previous: Binding::new().keys(&["x"]),
            next: Binding::new().keys(&["x"]),
            submit: Binding::new().keys(&["x"]),
        };
        assert_eq!(map.action_for(&key("x")), Some(KeyAction::Previous));
    }

    #[test]
    fn test_form_preset() {
        let map = KeyMap::form();
        assert_eq!(map.action_for(&key("shift+tab")), Some(KeyAction::Previous));
        assert_eq!(map.action_for(&key("down")), Some(KeyAction::Next));
        assert_eq!(map.action_for(&key("enter")), Some(KeyAction::Submit));
        assert_eq!(map.action_for(&key("a")), None);
    }

    #[test]
    fn test_picker_preset_leaves_letters_free() {
        let map = KeyMap::picker();
        for c in 'a'..='z' {
            assert_eq!(map.action_for(&KeyMsg::from_char(c)), None);
        }
        assert_eq!(map.action_for(&key("ctrl+n")), Some(KeyAction::Next));
    }

    #[test]
    fn test_tabs_preset_has_no_submit() {
        let map = KeyMap::tabs();
        assert!(!map.submit.enabled());
        assert_eq!(map.action_for(&key("enter")), None);
        assert_eq!(map.action_for(&key("left")), Some(KeyAction::Previous));
    }

    #[test]
    fn test_presets_are_independent() {
        let mut a = KeyMap::form();
        let b = KeyMap::form();
        a.next.set_enabled(false);
        assert!(b.next.enabled());
        assert_ne!(a, b);
    }

    #[test]
    fn test_help_line_skips_disabled() {
        assert_eq!(KeyMap::tabs().help_line(), "← previous tab • → next tab");
    }
}
