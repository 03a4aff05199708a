//! Single-widget event loop without a real terminal.
//!
//! The [`Dispatcher`] owns one active [`Model`], feeds it messages one at a
//! time, renders after every update, and runs the commands the model returns.
//! It answers built-in requests itself: a size request is answered with the
//! host viewport it was configured with, and batches are flattened in order.
//! Hosts use it to drive a widget from their own input source; tests use it to
//! exercise widgets end to end.
//!
//! Only the latest render is kept unless history is turned on with
//! [`Dispatcher::with_history`].

use std::collections::VecDeque;

use crate::Model;
use crate::command::Cmd;
use crate::message::{BatchMsg, Message, QuitMsg, RequestWindowSizeMsg, WindowSizeMsg};

/// Counters collected while dispatching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Number of update calls.
    pub updates: usize,
    /// Number of view calls.
    pub renders: usize,
    /// Number of commands executed.
    pub commands_run: usize,
    /// Number of size requests answered.
    pub size_requests: usize,
}

/// Drives a single model from an in-memory message queue.
///
/// # Example
///
/// ```rust
/// use chatui_runtime::{Cmd, Dispatcher, Message, Model, WindowSizeMsg, window_size};
///
/// struct Sized { width: u16 }
///
/// impl Model for Sized {
///     fn init(&self) -> Option<Cmd> { Some(window_size()) }
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
///             self.width = size.width;
///         }
///         None
///     }
///     fn view(&self) -> String { format!("{} cols", self.width) }
/// }
///
/// let mut dispatcher = Dispatcher::new(Sized { width: 0 }).with_viewport(100, 30);
/// dispatcher.init();
/// dispatcher.run_until_idle();
/// assert_eq!(dispatcher.last_view(), Some("100 cols"));
/// ```
pub struct Dispatcher<M: Model> {
    model: M,
    queue: VecDeque<Message>,
    views: Vec<String>,
    keep_history: bool,
    viewport: WindowSizeMsg,
    stats: DispatchStats,
    initialized: bool,
    quit: bool,
}

impl<M: Model> Dispatcher<M> {
    /// Create a dispatcher for `model` with an 80x24 viewport.
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            keep_history: false,
            viewport: WindowSizeMsg {
                width: 80,
                height: 24,
            },
            stats: DispatchStats::default(),
            initialized: false,
            quit: false,
        }
    }

    /// Set the viewport size reported in answer to size requests.
    #[must_use]
    pub fn with_viewport(mut self, width: u16, height: u16) -> Self {
        self.viewport = WindowSizeMsg { width, height };
        self
    }

    /// Keep every render instead of only the latest.
    #[must_use]
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Change the host viewport and deliver the resize to the model.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = WindowSizeMsg { width, height };
        self.send(self.viewport);
    }

    /// Call the model's `init`, render once, and run the returned command.
    ///
    /// Messages produced by `init` are delivered before anything queued
    /// earlier.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.render();
        let queued = std::mem::take(&mut self.queue);
        self.run(cmd);
        self.queue.extend(queued);
    }

    /// Queue a message for delivery.
    pub fn send<T: Send + 'static>(&mut self, msg: T) {
        self.queue.push_back(Message::new(msg));
    }

    /// Queue an already wrapped message.
    pub fn send_message(&mut self, msg: Message) {
        self.queue.push_back(msg);
    }

    /// Translate a terminal event and queue it. Returns whether it was queued.
    pub fn send_event(&mut self, event: crossterm::event::Event) -> bool {
        match crate::translate_event(event) {
            Some(msg) => {
                if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
                    self.viewport = *size;
                }
                self.queue.push_back(msg);
                true
            }
            None => false,
        }
    }

    /// Deliver one queued message. Returns `false` when nothing was delivered.
    pub fn step(&mut self) -> bool {
        if !self.initialized {
            self.init();
        }
        if self.quit {
            return false;
        }
        let Some(msg) = self.queue.pop_front() else {
            return false;
        };

        if msg.is::<QuitMsg>() {
            tracing::debug!("dispatcher received quit");
            self.quit = true;
            return false;
        }

        self.stats.updates += 1;
        let cmd = self.model.update(msg);
        self.render();
        self.run(cmd);
        true
    }

    /// Deliver messages until the queue is empty or quit is requested.
    ///
    /// Returns the number of messages delivered.
    pub fn run_until_idle(&mut self) -> usize {
        let mut delivered = 0;
        while self.step() {
            delivered += 1;
        }
        delivered
    }

    fn render(&mut self) {
        self.stats.renders += 1;
        if !self.keep_history {
            self.views.clear();
        }
        self.views.push(self.model.view());
    }

    fn run(&mut self, cmd: Option<Cmd>) {
        let Some(cmd) = cmd else {
            return;
        };
        self.stats.commands_run += 1;
        let Some(msg) = cmd.execute() else {
            return;
        };

        if msg.is::<RequestWindowSizeMsg>() {
            self.stats.size_requests += 1;
            self.queue.push_back(Message::new(self.viewport));
        } else if msg.is::<QuitMsg>() {
            tracing::debug!("command requested quit");
            self.quit = true;
        } else if msg.is::<BatchMsg>() {
            if let Some(BatchMsg(cmds)) = msg.downcast::<BatchMsg>() {
                for cmd in cmds {
                    self.run(Some(cmd));
                }
            }
        } else {
            self.queue.push_back(msg);
        }
    }

    /// The driven model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the driven model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the dispatcher and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Rendered views, oldest first.
    ///
    /// Holds at most the latest render unless history is on.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// The most recent render.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Whether quit was requested.
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Number of messages waiting for delivery.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The viewport reported to the model.
    pub fn viewport(&self) -> WindowSizeMsg {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyMsg, batch, quit, window_size};

    #[derive(Default)]
    struct Recorder {
        sizes: Vec<(u16, u16)>,
        keys: Vec<String>,
    }

    impl Model for Recorder {
        fn init(&self) -> Option<Cmd> {
            Some(window_size())
        }

        fn update(&mut self, msg: Message) -> Option<Cmd> {
            if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
                self.sizes.push((size.width, size.height));
                return None;
            }
            if let Some(key) = msg.downcast_ref::<KeyMsg>() {
                self.keys.push(key.to_string());
                if key.to_string() == "q" {
                    return Some(quit());
                }
                if key.to_string() == "r" {
                    return batch(vec![Some(window_size()), Some(window_size())]);
                }
            }
            None
        }

        fn view(&self) -> String {
            format!("{} keys", self.keys.len())
        }
    }

    #[test]
    fn test_init_answers_size_request() {
        let mut d = Dispatcher::new(Recorder::default()).with_viewport(120, 40);
        d.init();
        assert_eq!(d.pending(), 1);
        d.run_until_idle();
        assert_eq!(d.model().sizes, vec![(120, 40)]);
        assert_eq!(d.stats().size_requests, 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut d = Dispatcher::new(Recorder::default());
        d.init();
        d.init();
        d.run_until_idle();
        assert_eq!(d.model().sizes.len(), 1);
    }

    #[test]
    fn test_renders_after_every_update() {
        let mut d = Dispatcher::new(Recorder::default()).with_history(true);
        d.send(KeyMsg::from_char('a'));
        d.send(KeyMsg::from_char('b'));
        d.run_until_idle();
        // init render + size + two keys
        assert_eq!(d.views().len(), 4);
        assert_eq!(d.last_view(), Some("2 keys"));
    }

    #[test]
    fn test_only_latest_view_kept_by_default() {
        let mut d = Dispatcher::new(Recorder::default());
        for _ in 0..500 {
            d.send(KeyMsg::from_char('a'));
        }
        d.run_until_idle();
        assert_eq!(d.views().len(), 1);
        assert_eq!(d.last_view(), Some("500 keys"));
        assert_eq!(d.stats().renders, 502);
    }

    #[test]
    fn test_init_messages_precede_queued_input() {
        let mut d = Dispatcher::new(Recorder::default()).with_viewport(7, 3);
        d.send(KeyMsg::from_char('a'));
        d.init();
        assert_eq!(d.pending(), 2);
        d.step();
        assert_eq!(d.model().sizes, vec![(7, 3)]);
        assert!(d.model().keys.is_empty());
    }

    #[test]
    fn test_batch_is_flattened() {
        let mut d = Dispatcher::new(Recorder::default()).with_viewport(10, 5);
        d.send(KeyMsg::from_char('r'));
        d.run_until_idle();
        assert_eq!(d.model().sizes, vec![(10, 5), (10, 5), (10, 5)]);
    }

    #[test]
    fn test_quit_stops_delivery() {
        let mut d = Dispatcher::new(Recorder::default());
        d.send(KeyMsg::from_char('q'));
        d.send(KeyMsg::from_char('x'));
        d.run_until_idle();
        assert!(d.is_quit());
        assert_eq!(d.model().keys, vec!["q".to_string()]);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut d = Dispatcher::new(Recorder::default());
        d.init();
        d.resize(60, 20);
        d.run_until_idle();
        assert_eq!(d.viewport(), WindowSizeMsg { width: 60, height: 20 });
        assert_eq!(d.model().sizes.last(), Some(&(60, 20)));
    }

    #[test]
    fn test_send_event_translates_crossterm() {
        use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

        let mut d = Dispatcher::new(Recorder::default());
        assert!(d.send_event(Event::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE))));
        assert!(d.send_event(Event::Resize(33, 11)));
        assert!(!d.send_event(Event::FocusGained));
        d.run_until_idle();
        assert_eq!(d.model().keys, vec!["z".to_string()]);
        assert_eq!(d.viewport(), WindowSizeMsg { width: 33, height: 11 });
    }
}
