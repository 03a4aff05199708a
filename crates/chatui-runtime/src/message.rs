//! Message types for the Elm Architecture.
//!
//! Every input a widget reacts to (keys, pastes, viewport changes, lifecycle
//! requests, results of earlier commands) arrives as a [`Message`].

use std::any::Any;
use std::fmt;

use crate::command::Cmd;

/// A type-erased message container.
///
/// Messages can be any type that is `Send + 'static`. Use [`Message::new`] to
/// wrap a value and [`Message::downcast`] or [`Message::downcast_ref`] to get
/// it back.
///
/// # Example
///
/// ```rust
/// use chatui_runtime::Message;
///
/// struct ChannelOpened(u64);
///
/// let msg = Message::new(ChannelOpened(42));
/// if let Some(opened) = msg.downcast::<ChannelOpened>() {
///     assert_eq!(opened.0, 42);
/// }
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Create a new message from any sendable type.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Try to downcast to a specific message type.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Try to get a reference to the message as a specific type.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Check if the message is of a specific type.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

/// Message asking the dispatcher to stop delivering events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Current size of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Viewport width in columns.
    pub width: u16,
    /// Viewport height in rows.
    pub height: u16,
}

/// Text delivered in one piece by a bracketed paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteMsg(pub String);

/// Request for the host to report its viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestWindowSizeMsg;

/// Commands to run, in order, as a single effect.
pub(crate) struct BatchMsg(pub Vec<Cmd>);
