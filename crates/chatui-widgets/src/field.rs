//! Single-line text input.
//!
//! A [`FormField`] is a labeled edit buffer with a cursor. It only reacts to
//! input while focused; the owner (a form or a picker) decides which field has
//! focus and intercepts navigation keys before they reach the field.

use chatui_runtime::{Cmd, KeyMsg, Message, Model, PasteMsg};
use chatui_style::Style;
use unicode_width::UnicodeWidthChar;

use crate::key::{Binding, matches};

/// How typed text is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// Show text as typed.
    #[default]
    Normal,
    /// Show one echo character per typed character.
    Password,
}

/// Editing keys for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKeyMap {
    /// Move cursor forward one character.
    pub character_forward: Binding,
    /// Move cursor backward one character.
    pub character_backward: Binding,
    /// Delete word backward.
    pub delete_word_backward: Binding,
    /// Delete text after cursor.
    pub delete_after_cursor: Binding,
    /// Delete text before cursor.
    pub delete_before_cursor: Binding,
    /// Delete character backward.
    pub delete_character_backward: Binding,
    /// Delete character forward.
    pub delete_character_forward: Binding,
    /// Move to start of line.
    pub line_start: Binding,
    /// Move to end of line.
    pub line_end: Binding,
}

impl Default for FieldKeyMap {
    fn default() -> Self {
        Self {
            character_forward: Binding::new().keys(&["right", "ctrl+f"]),
            character_backward: Binding::new().keys(&["left", "ctrl+b"]),
            delete_word_backward: Binding::new().keys(&["alt+backspace", "ctrl+w"]),
            delete_after_cursor: Binding::new().keys(&["ctrl+k"]),
            delete_before_cursor: Binding::new().keys(&["ctrl+u"]),
            delete_character_backward: Binding::new().keys(&["backspace", "ctrl+h"]),
            delete_character_forward: Binding::new().keys(&["delete", "ctrl+d"]),
            line_start: Binding::new().keys(&["home", "ctrl+a"]),
            line_end: Binding::new().keys(&["end", "ctrl+e"]),
        }
    }
}

/// Styles used when rendering a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStyles {
    /// Typed text.
    pub text: Style,
    /// Placeholder shown while empty.
    pub placeholder: Style,
    /// The cell under the cursor.
    pub cursor: Style,
}

impl Default for FieldStyles {
    fn default() -> Self {
        Self {
            text: Style::new(),
            placeholder: Style::new().faint(),
            cursor: Style::new().reverse(),
        }
    }
}

/// A labeled single-line input.
#[derive(Debug, Clone)]
pub struct FormField {
    label: String,
    prompt: String,
    placeholder: String,
    value: Vec<char>,
    pos: usize,
    width: usize,
    char_limit: usize,
    focus: bool,
    echo_mode: EchoMode,
    echo_character: char,
    /// Editing keys.
    pub key_map: FieldKeyMap,
    /// Rendering styles.
    pub styles: FieldStyles,
}

impl FormField {
    /// Creates an empty, unfocused field.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: String::new(),
            placeholder: String::new(),
            value: Vec::new(),
            pos: 0,
            width: 0,
            char_limit: 0,
            focus: false,
            echo_mode: EchoMode::Normal,
            echo_character: '*',
            key_map: FieldKeyMap::default(),
            styles: FieldStyles::default(),
        }
    }

    /// Text shown while the field is empty.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Text drawn before the input, e.g. `"> "`.
    #[must_use]
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = text.into();
        self
    }

    /// Display mode for typed text.
    #[must_use]
    pub fn echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// Shorthand for [`EchoMode::Password`].
    #[must_use]
    pub fn password(self) -> Self {
        self.echo_mode(EchoMode::Password)
    }

    /// Maximum number of characters; 0 means unlimited.
    #[must_use]
    pub fn char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Render width of the input area in columns; 0 means unbounded.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = Self::sanitize(value.chars());
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Move the cursor to the start.
    pub fn cursor_start(&mut self) {
        self.pos = 0;
    }

    /// Move the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.pos = self.value.len();
    }

    /// Render width of the input area.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the render width of the input area.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Give the field focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Whether the field has focus.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    // Newlines and tabs become spaces, other control characters are dropped.
    fn sanitize(chars: impl Iterator<Item = char>) -> Vec<char> {
        chars
            .filter_map(|c| match c {
                '\n' | '\r' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect()
    }

    fn insert(&mut self, chars: impl Iterator<Item = char>) {
        let mut incoming = Self::sanitize(chars);
        if self.char_limit > 0 {
            incoming.truncate(self.char_limit.saturating_sub(self.value.len()));
        }
        let n = incoming.len();
        self.value.splice(self.pos..self.pos, incoming);
        self.pos += n;
    }

    fn delete_word_backward(&mut self) {
        if self.pos == 0 {
            return;
        }
        if self.echo_mode == EchoMode::Password {
            self.delete_before_cursor();
            return;
        }
        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.pos);
        self.pos = start;
    }

    fn delete_before_cursor(&mut self) {
        self.value.drain(..self.pos);
        self.pos = 0;
    }

    fn delete_after_cursor(&mut self) {
        self.value.truncate(self.pos);
    }

    fn handle_key(&mut self, key: &KeyMsg) {
        let km = &self.key_map;
        if matches(key, &[&km.delete_word_backward]) {
            self.delete_word_backward();
        } else if matches(key, &[&km.delete_character_backward]) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if matches(key, &[&km.delete_character_forward]) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if matches(key, &[&km.character_backward]) {
            self.pos = self.pos.saturating_sub(1);
        } else if matches(key, &[&km.character_forward]) {
            self.set_cursor(self.pos + 1);
        } else if matches(key, &[&km.line_start]) {
            self.cursor_start();
        } else if matches(key, &[&km.line_end]) {
            self.cursor_end();
        } else if matches(key, &[&km.delete_before_cursor]) {
            self.delete_before_cursor();
        } else if matches(key, &[&km.delete_after_cursor]) {
            self.delete_after_cursor();
        } else if let Some(c) = key.text() {
            self.insert(std::iter::once(c));
        }
    }

    /// Apply a key or paste. Ignored while unfocused.
    pub fn update(&mut self, msg: Message) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        if let Some(paste) = msg.downcast_ref::<PasteMsg>() {
            self.insert(paste.0.chars());
        } else if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key);
        }
        None
    }

    fn shown(&self) -> Vec<char> {
        match self.echo_mode {
            EchoMode::Normal => self.value.clone(),
            EchoMode::Password => vec![self.echo_character; self.value.len()],
        }
    }

    // Visible slice [start, end) keeping the cursor cell on screen.
    fn window(&self, shown: &[char]) -> (usize, usize) {
        if self.width == 0 {
            return (0, shown.len());
        }
        let cells = |s: &[char]| s.iter().map(|c| c.width().unwrap_or(0)).sum::<usize>();
        let cursor_cell = usize::from(self.focus);

        let mut start = 0;
        while start < self.pos && cells(&shown[start..self.pos]) + cursor_cell > self.width {
            start += 1;
        }
        let mut end = start;
        let mut used = 0;
        while end < shown.len() {
            let w = shown[end].width().unwrap_or(0);
            if used + w > self.width {
                break;
            }
            used += w;
            end += 1;
        }
        (start, end)
    }

    fn placeholder_view(&self) -> String {
        let mut chars: Vec<char> = self.placeholder.chars().collect();
        if self.width > 0 {
            let text: String = chars.iter().collect();
            chars = chatui_style::truncate(&text, self.width).chars().collect();
        }
        let mut out = String::new();
        let rest: String = if self.focus {
            let first = chars.first().copied().unwrap_or(' ');
            out.push_str(&self.styles.cursor.render(&first.to_string()));
            chars.iter().skip(1).collect()
        } else {
            chars.iter().collect()
        };
        out.push_str(&self.styles.placeholder.render(&rest));
        out
    }

    /// Render the prompt and the visible part of the buffer.
    pub fn view(&self) -> String {
        let mut out = self.prompt.clone();

        let body = if self.value.is_empty() && !self.placeholder.is_empty() {
            self.placeholder_view()
        } else {
            let shown = self.shown();
            let (start, end) = self.window(&shown);
            let pos = self.pos.clamp(start, end);
            let before: String = shown[start..pos].iter().collect();
            let mut body = self.styles.text.render(&before);
            if self.focus {
                let under = if pos < end { shown[pos].to_string() } else { " ".to_string() };
                body.push_str(&self.styles.cursor.render(&under));
                let after: String = shown[(pos + 1).min(end)..end].iter().collect();
                body.push_str(&self.styles.text.render(&after));
            } else {
                let after: String = shown[pos..end].iter().collect();
                body.push_str(&self.styles.text.render(&after));
            }
            body
        };
        out.push_str(&body);

        if self.width > 0 {
            let used = chatui_style::visible_width(&out) - chatui_style::visible_width(&self.prompt);
            out.push_str(&" ".repeat(self.width.saturating_sub(used)));
        }
        out
    }
}

impl Model for FormField {
    fn init(&self) -> Option<Cmd> {
        None
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        FormField::update(self, msg)
    }

    fn view(&self) -> String {
        FormField::view(self)
    }
}
