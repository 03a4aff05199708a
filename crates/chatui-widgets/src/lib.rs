#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

//! # chatui-widgets
//!
//! Interactive widgets for a terminal chat client:
//!
//! - **Picker** - a fuzzy-filtered list driven by a free-text query
//! - **Form** - text fields with focus cycling and a gated submit
//! - **TabStrip** - a wrap-around selector with active/inactive styling
//!
//! All three implement [`chatui_runtime::Model`]: feed them messages with
//! `update`, render them with `view`, and run the commands they return.
//! Results leave a widget as messages ([`ItemSelectedMsg`],
//! [`FormSubmittedMsg`], [`TabChangedMsg`]) rather than callbacks.
//!
//! ## Example
//!
//! ```rust
//! use chatui_runtime::{Dispatcher, KeyCode, KeyMsg};
//! use chatui_widgets::TabStrip;
//!
//! let mut d = Dispatcher::new(TabStrip::new(["general", "random", "dev"]));
//! d.send(KeyMsg::from_code(KeyCode::Left));
//! d.run_until_idle();
//! assert_eq!(d.model().active_label(), Some("dev"));
//! ```

pub mod config;
pub mod field;
pub mod form;
pub mod fuzzy;
pub mod item;
pub mod key;
pub mod picker;
pub mod tabs;

pub use config::{ConfigError, WidgetConfig};
pub use field::{EchoMode, FieldKeyMap, FieldStyles, FormField};
pub use form::{DEFAULT_MAX_FIELD_WIDTH, Form, FormStyles, FormSubmittedMsg, ResetFormMsg};
pub use fuzzy::{FuzzyMatcher, Match, MatchError, NucleoMatcher};
pub use item::{Item, ItemCollection};
pub use key::{Binding, Help, KeyAction, KeyMap};
pub use picker::{ItemSelectedMsg, Picker, PickerStyles};
pub use tabs::{TabChangedMsg, TabStrip, TabStyles};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Form, FormField, FormSubmittedMsg, Item, ItemSelectedMsg, KeyMap, Picker, ResetFormMsg,
        TabChangedMsg, TabStrip, WidgetConfig,
    };
    pub use chatui_runtime::prelude::*;
}
