#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! # chatui-runtime
//!
//! The interaction model shared by the chatui widgets, following The Elm
//! Architecture:
//!
//! - **Message** - every input (keys, pastes, resizes, lifecycle requests)
//! - **Model** - a widget: `init`, `update(msg) -> Option<Cmd>`, `view`
//! - **Cmd** - deferred effects returned from `update`, run by the host
//! - **Dispatcher** - a single-widget event loop over an in-memory queue
//!
//! ## Example
//!
//! ```rust
//! use chatui_runtime::{Cmd, KeyMsg, Message, Model};
//!
//! struct Counter { presses: usize }
//!
//! impl Model for Counter {
//!     fn init(&self) -> Option<Cmd> { None }
//!
//!     fn update(&mut self, msg: Message) -> Option<Cmd> {
//!         if msg.is::<KeyMsg>() {
//!             self.presses += 1;
//!         }
//!         None
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{} presses", self.presses)
//!     }
//! }
//! ```

pub mod command;
pub mod dispatcher;
pub mod key;
pub mod message;

pub use command::{Cmd, batch, quit, window_size};
pub use dispatcher::{DispatchStats, Dispatcher};
pub use key::{ChordParseError, KeyCode, KeyMsg, Modifiers};
pub use message::{Message, PasteMsg, QuitMsg, WindowSizeMsg};

/// A widget driven by messages.
///
/// `update` is a state transition plus an optional effect for the host to run
/// later. It must not block or perform IO itself.
pub trait Model: Send + 'static {
    /// Return the command to run when the widget is first shown.
    fn init(&self) -> Option<Cmd>;

    /// Apply one message and return any follow-up effect.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the current state.
    fn view(&self) -> String;
}

/// Translate a terminal event into a runtime message.
///
/// Keys become [`KeyMsg`], resizes [`WindowSizeMsg`], bracketed pastes
/// [`PasteMsg`]. Everything else (mouse, focus, key releases) is dropped.
pub fn translate_event(event: crossterm::event::Event) -> Option<Message> {
    use crossterm::event::Event;

    match event {
        Event::Key(key) => KeyMsg::from_crossterm(&key).map(Message::new),
        Event::Resize(width, height) => Some(Message::new(WindowSizeMsg { width, height })),
        Event::Paste(text) => Some(Message::new(PasteMsg(text))),
        _ => None,
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Cmd, Dispatcher, KeyCode, KeyMsg, Message, Model, Modifiers, PasteMsg, WindowSizeMsg,
        batch, quit, window_size,
    };
}
