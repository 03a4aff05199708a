//! Multi-field input form.
//!
//! Focus moves between fields with the Previous and Next bindings and clamps
//! at both ends. Submit is gated: it only fires from the last field, and only
//! when that field is non-empty. Everything else goes to the active field.
//!
//! # Example
//!
//! ```rust
//! use chatui_runtime::{Dispatcher, KeyCode, KeyMsg};
//! use chatui_widgets::{Form, FormField};
//!
//! let form = Form::new(vec![FormField::new("Team"), FormField::new("Token").password()]);
//! let mut d = Dispatcher::new(form).with_viewport(60, 20);
//! for c in "acme".chars() {
//!     d.send(KeyMsg::from_char(c));
//! }
//! d.send(KeyMsg::from_code(KeyCode::Tab));
//! for c in "s3cret".chars() {
//!     d.send(KeyMsg::from_char(c));
//! }
//! d.send(KeyMsg::from_code(KeyCode::Enter));
//! d.run_until_idle();
//! assert!(d.model().is_submitted());
//! assert_eq!(d.model().values(), vec!["acme", "s3cret"]);
//! ```

use chatui_runtime::{Cmd, KeyMsg, Message, Model, WindowSizeMsg, window_size};
use chatui_style::{Border, Color, Position, Style, join_vertical, place};

use crate::field::FormField;
use crate::key::{KeyAction, KeyMap};

/// Default upper bound on a field's render width, in columns.
pub const DEFAULT_MAX_FIELD_WIDTH: usize = 40;

// Border plus horizontal padding around each field.
const FIELD_CHROME: usize = 4;

/// Clears every field and starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetFormMsg;

/// Emitted once a gated submit succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmittedMsg {
    /// Field values in declaration order.
    pub values: Vec<String>,
}

/// Styles for the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStyles {
    /// Inactive field box.
    pub field: Style,
    /// Active field box.
    pub active: Style,
    /// Active field box when submit is blocked.
    pub blocked: Style,
    /// Field labels.
    pub label: Style,
    /// Help line under the fields.
    pub help: Style,
}

impl Default for FormStyles {
    fn default() -> Self {
        let boxed = Style::new().border(Border::rounded()).padding((0, 1));
        Self {
            field: boxed.clone().border_foreground(Color::Ansi(240)),
            active: boxed.clone().border_foreground(Color::Ansi(212)),
            blocked: boxed.border_foreground(Color::Ansi(1)),
            label: Style::new().bold(),
            help: Style::new().faint(),
        }
    }
}

/// An ordered set of fields with one active at a time.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    active: usize,
    submitted: bool,
    viewport: Option<WindowSizeMsg>,
    max_field_width: usize,
    show_help: bool,
    /// Navigation keys.
    pub key_map: KeyMap,
    /// Rendering styles.
    pub styles: FormStyles,
}

impl Form {
    /// Creates a form with the first field focused.
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            active: 0,
            submitted: false,
            viewport: None,
            max_field_width: DEFAULT_MAX_FIELD_WIDTH,
            show_help: true,
            key_map: KeyMap::form(),
            styles: FormStyles::default(),
        };
        form.apply_width(DEFAULT_MAX_FIELD_WIDTH);
        form.sync_focus();
        form
    }

    /// Use a different keymap.
    #[must_use]
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// Cap field width at `width` columns.
    #[must_use]
    pub fn with_max_field_width(mut self, width: usize) -> Self {
        self.max_field_width = width.max(1);
        self.apply_width(self.field_width());
        self
    }

    /// Show or hide the key help line.
    #[must_use]
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Field at `index`.
    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    /// Index of the active field.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Whether a submit has gone through.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Values in declaration order.
    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(FormField::value).collect()
    }

    /// Value of the field at `index`.
    pub fn value(&self, index: usize) -> Option<String> {
        self.fields.get(index).map(FormField::value)
    }

    /// Last viewport reported to the form.
    pub fn viewport(&self) -> Option<WindowSizeMsg> {
        self.viewport
    }

    /// Move focus to the previous field, stopping at the first.
    pub fn previous_field(&mut self) {
        if self.active > 0 {
            self.active -= 1;
            tracing::debug!(active = self.active, "form focus moved back");
        }
        self.sync_focus();
    }

    /// Move focus to the next field, stopping at the last.
    pub fn next_field(&mut self) {
        if self.active + 1 < self.fields.len() {
            self.active += 1;
            tracing::debug!(active = self.active, "form focus moved forward");
        }
        self.sync_focus();
    }

    /// Whether submit would go through right now.
    pub fn can_submit(&self) -> bool {
        self.active + 1 == self.fields.len()
            && self.fields.get(self.active).is_some_and(|f| !f.is_empty())
    }

    /// Whether the active field is the last one and still empty.
    pub fn is_blocked(&self) -> bool {
        self.active + 1 == self.fields.len()
            && self.fields.get(self.active).is_some_and(FormField::is_empty)
    }

    /// Attempt the gated submit.
    ///
    /// On success marks the form submitted and returns a command delivering
    /// [`FormSubmittedMsg`]. Otherwise nothing changes.
    pub fn submit(&mut self) -> Option<Cmd> {
        if !self.can_submit() {
            tracing::debug!(active = self.active, "form submit blocked");
            return None;
        }
        self.submitted = true;
        let values = self.values();
        tracing::debug!(fields = values.len(), "form submitted");
        Some(Cmd::message(FormSubmittedMsg { values }))
    }

    /// Clear every field, focus the first and ask for a fresh size.
    pub fn reset(&mut self) -> Option<Cmd> {
        for field in &mut self.fields {
            field.reset();
        }
        self.active = 0;
        self.submitted = false;
        self.sync_focus();
        tracing::debug!("form reset");
        Some(window_size())
    }

    /// Record the viewport and recompute field widths.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Some(WindowSizeMsg { width, height });
        self.apply_width(self.field_width());
    }

    fn field_width(&self) -> usize {
        self.viewport.map_or(self.max_field_width, |vp| {
            usize::from(vp.width)
                .saturating_sub(FIELD_CHROME)
                .clamp(1, self.max_field_width)
        })
    }

    fn apply_width(&mut self, width: usize) {
        for field in &mut self.fields {
            field.set_width(width);
        }
    }

    fn sync_focus(&mut self) {
        let active = self.active;
        for (i, field) in self.fields.iter_mut().enumerate() {
            if i == active {
                field.focus();
            } else {
                field.blur();
            }
        }
    }

    /// Handle one message.
    pub fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<ResetFormMsg>() {
            return self.reset();
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.resize(size.width, size.height);
            return None;
        }
        if self.fields.is_empty() || self.submitted {
            return None;
        }

        let mut cmd = None;
        match msg.downcast_ref::<KeyMsg>().and_then(|k| self.key_map.action_for(k)) {
            Some(KeyAction::Previous) => self.previous_field(),
            Some(KeyAction::Next) => self.next_field(),
            Some(KeyAction::Submit) => cmd = self.submit(),
            None => {
                if let Some(field) = self.fields.get_mut(self.active) {
                    cmd = field.update(msg);
                }
            }
        }
        self.sync_focus();
        cmd
    }

    /// Render the fields, centered in the viewport.
    pub fn view(&self) -> String {
        let width = self.field_width();
        let blocks: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let style = if i != self.active {
                    &self.styles.field
                } else if self.is_blocked() {
                    &self.styles.blocked
                } else {
                    &self.styles.active
                };
                let body = format!("{}\n{}", self.styles.label.render(field.label()), field.view());
                let inner = u16::try_from(width + 2).unwrap_or(u16::MAX);
                style.clone().width(inner).render(&body)
            })
            .collect();

        let mut parts: Vec<&str> = blocks.iter().map(String::as_str).collect();
        let help = self.styles.help.render(&self.key_map.help_line());
        if self.show_help && !self.fields.is_empty() {
            parts.push(&help);
        }
        let block = join_vertical(Position::Left, &parts);

        match self.viewport {
            Some(vp) => place(
                usize::from(vp.width),
                usize::from(vp.height),
                Position::Center,
                Position::Center,
                &block,
            ),
            None => block,
        }
    }
}

impl Model for Form {
    /// Starts from a clean form: every buffer is cleared and a size
    /// measurement is requested.
    fn init(&self) -> Option<Cmd> {
        Some(Cmd::message(ResetFormMsg))
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        Form::update(self, msg)
    }

    fn view(&self) -> String {
        Form::view(self)
    }
}
