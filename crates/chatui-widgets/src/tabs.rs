//! Cyclic tab strip.
//!
//! Unlike the form, navigation wraps around: moving past the last tab lands
//! on the first and vice versa.

use chatui_runtime::{Cmd, KeyMsg, Message, Model};
use chatui_style::{Color, Position, Style, join_horizontal};

use crate::key::{KeyAction, KeyMap};

/// Emitted when navigation changes the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChangedMsg {
    /// The new active index.
    pub index: usize,
}

/// Active and inactive tab styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStyles {
    /// Style of the active tab.
    pub active: Style,
    /// Style of every other tab.
    pub inactive: Style,
}

impl Default for TabStyles {
    fn default() -> Self {
        Self {
            active: Style::new()
                .bold()
                .foreground(Color::Ansi(212))
                .padding((0, 1)),
            inactive: Style::new().faint().padding((0, 1)),
        }
    }
}

/// A row of labels with one active.
#[derive(Debug, Clone)]
pub struct TabStrip {
    labels: Vec<String>,
    active: usize,
    /// Rendering styles.
    pub styles: TabStyles,
    /// Navigation keys.
    pub key_map: KeyMap,
}

impl TabStrip {
    /// Creates a strip with the first tab active.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            active: 0,
            styles: TabStyles::default(),
            key_map: KeyMap::tabs(),
        }
    }

    /// Use different styles.
    #[must_use]
    pub fn with_styles(mut self, styles: TabStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Use a different keymap.
    #[must_use]
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// The labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the active tab.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Label of the active tab.
    pub fn active_label(&self) -> Option<&str> {
        self.labels.get(self.active).map(String::as_str)
    }

    /// Activate tab `index`, wrapping past the end.
    pub fn set_active(&mut self, index: usize) {
        if !self.labels.is_empty() {
            self.active = index % self.labels.len();
        }
    }

    /// Activate the next tab, wrapping to the first.
    pub fn next(&mut self) {
        if !self.labels.is_empty() {
            self.active = (self.active + 1) % self.labels.len();
        }
    }

    /// Activate the previous tab, wrapping to the last.
    pub fn previous(&mut self) {
        let count = self.labels.len();
        if count > 0 {
            self.active = (self.active + count - 1) % count;
        }
    }

    /// Handle navigation keys.
    pub fn update(&mut self, msg: Message) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        let before = self.active;
        match self.key_map.action_for(key)? {
            KeyAction::Previous => self.previous(),
            KeyAction::Next => self.next(),
            KeyAction::Submit => {}
        }
        if self.active == before {
            return None;
        }
        tracing::debug!(index = self.active, "tab changed");
        Some(Cmd::message(TabChangedMsg { index: self.active }))
    }

    /// Render every label side by side.
    pub fn view(&self) -> String {
        let rendered: Vec<String> = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == self.active {
                    self.styles.active.render(label)
                } else {
                    self.styles.inactive.render(label)
                }
            })
            .collect();
        let parts: Vec<&str> = rendered.iter().map(String::as_str).collect();
        join_horizontal(Position::Top, &parts)
    }
}

impl Model for TabStrip {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        TabStrip::update(self, msg)
    }

    fn view(&self) -> String {
        TabStrip::view(self)
    }
}
