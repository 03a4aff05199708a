//! Commands for side effects.
//!
//! A widget's update never performs IO. Anything it wants done afterwards
//! (report a selection, ask the host for its size, quit) is returned as a
//! [`Cmd`], which the dispatcher runs once the update has finished.

use crate::message::{BatchMsg, Message, QuitMsg, RequestWindowSizeMsg};

/// A deferred effect that produces at most one message when executed.
///
/// Commands are lazy: nothing happens until the dispatcher calls
/// [`Cmd::execute`], and a command can only be executed once.
///
/// # Example
///
/// ```rust
/// use chatui_runtime::{Cmd, Message};
///
/// struct Greeting(&'static str);
///
/// let cmd = Cmd::new(|| Message::new(Greeting("hi")));
/// let msg = cmd.execute().unwrap();
/// assert_eq!(msg.downcast::<Greeting>().unwrap().0, "hi");
/// ```
pub struct Cmd(Box<dyn FnOnce() -> Option<Message> + Send + 'static>);

impl Cmd {
    /// Create a new command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self(Box::new(move || Some(f())))
    }

    /// Create a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Message> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Create a command that simply delivers `msg`.
    pub fn message<M: Send + 'static>(msg: M) -> Self {
        Self::new(move || Message::new(msg))
    }

    /// Execute the command and return the resulting message.
    pub fn execute(self) -> Option<Message> {
        (self.0)()
    }
}

impl std::fmt::Debug for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmd").finish_non_exhaustive()
    }
}

/// Combine several optional commands into one.
///
/// The dispatcher runs the commands in the order given.
pub fn batch(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid.len() {
        0 => None,
        1 => valid.into_iter().next(),
        _ => Some(Cmd::new(move || Message::new(BatchMsg(valid)))),
    }
}

/// Command that signals the dispatcher to stop.
pub fn quit() -> Cmd {
    Cmd::message(QuitMsg)
}

/// Command asking the host to report the current viewport size.
///
/// The dispatcher answers with a [`WindowSizeMsg`](crate::WindowSizeMsg).
pub fn window_size() -> Cmd {
    Cmd::message(RequestWindowSizeMsg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_message_roundtrip() {
        let msg = Cmd::message(7_u32).execute().unwrap();
        assert_eq!(msg.downcast::<u32>(), Some(7));
    }

    #[test]
    fn test_cmd_new_optional_none() {
        assert!(Cmd::new_optional(|| None).execute().is_none());
    }

    #[test]
    fn test_batch_empty_is_none() {
        assert!(batch(vec![None, None]).is_none());
    }

    #[test]
    fn test_batch_single_is_unwrapped() {
        let cmd = batch(vec![None, Some(Cmd::message(1_u8))]).unwrap();
        assert_eq!(cmd.execute().unwrap().downcast::<u8>(), Some(1));
    }

    #[test]
    fn test_batch_many_wraps() {
        let cmd = batch(vec![Some(quit()), Some(window_size())]).unwrap();
        let msg = cmd.execute().unwrap();
        let inner = msg.downcast::<BatchMsg>().unwrap();
        assert_eq!(inner.0.len(), 2);
    }

    #[test]
    fn test_window_size_requests_size() {
        let msg = window_size().execute().unwrap();
        assert!(msg.is::<RequestWindowSizeMsg>());
    }
}
