//! End-to-end widget behavior driven through the dispatcher.

use chatui_runtime::{Cmd, Dispatcher, KeyCode, KeyMsg, Message, Model, PasteMsg, WindowSizeMsg};
use chatui_style::strip_ansi;
use chatui_widgets::{
    Form, FormField, FormSubmittedMsg, FuzzyMatcher, Item, ItemSelectedMsg, Match, MatchError,
    Picker, ResetFormMsg, TabChangedMsg, TabStrip,
};

/// Wraps a widget and records the result messages it emits.
struct Host<W: Model> {
    widget: W,
    selected: Vec<ItemSelectedMsg>,
    submitted: Vec<FormSubmittedMsg>,
    tabs: Vec<TabChangedMsg>,
}

impl<W: Model> Host<W> {
    fn new(widget: W) -> Self {
        Self {
            widget,
            selected: Vec::new(),
            submitted: Vec::new(),
            tabs: Vec::new(),
        }
    }
}

impl<W: Model> Model for Host<W> {
    fn init(&self) -> Option<Cmd> {
        self.widget.init()
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(m) = msg.downcast_ref::<ItemSelectedMsg>() {
            self.selected.push(m.clone());
            return None;
        }
        if let Some(m) = msg.downcast_ref::<FormSubmittedMsg>() {
            self.submitted.push(m.clone());
            return None;
        }
        if let Some(m) = msg.downcast_ref::<TabChangedMsg>() {
            self.tabs.push(*m);
            return None;
        }
        self.widget.update(msg)
    }

    fn view(&self) -> String {
        self.widget.view()
    }
}

fn type_str<M: Model>(d: &mut Dispatcher<M>, s: &str) {
    for c in s.chars() {
        d.send(KeyMsg::from_char(c));
    }
}

fn key<M: Model>(d: &mut Dispatcher<M>, code: KeyCode) {
    d.send(KeyMsg::from_code(code));
}

#[test]
fn test_form_submit_gate_example() {
    let form = Form::new(vec![
        FormField::new("one"),
        FormField::new("two"),
        FormField::new("three"),
    ]);
    let mut d = Dispatcher::new(Host::new(form));
    type_str(&mut d, "a");
    key(&mut d, KeyCode::Tab);
    type_str(&mut d, "b");
    key(&mut d, KeyCode::Tab);
    key(&mut d, KeyCode::Enter);
    d.run_until_idle();

    let host = d.model();
    assert_eq!(host.widget.active(), 2);
    assert!(!host.widget.is_submitted());
    assert!(host.submitted.is_empty());

    type_str(&mut d, "c");
    key(&mut d, KeyCode::Enter);
    d.run_until_idle();

    let host = d.model();
    assert!(host.widget.is_submitted());
    assert_eq!(host.submitted.len(), 1);
    assert_eq!(host.submitted[0].values, vec!["a", "b", "c"]);
}

#[test]
fn test_form_init_receives_host_size() {
    let form = Form::new(vec![FormField::new("Team")]);
    let mut d = Dispatcher::new(form).with_viewport(30, 12);
    d.init();
    d.run_until_idle();
    assert_eq!(d.model().viewport(), Some(WindowSizeMsg { width: 30, height: 12 }));
    assert_eq!(d.model().field(0).map(FormField::width), Some(26));
    assert_eq!(d.stats().size_requests, 1);
}

#[test]
fn test_form_init_clears_prefilled_fields() {
    let mut team = FormField::new("Team");
    team.set_value("stale");
    let mut d = Dispatcher::new(Form::new(vec![team, FormField::new("Token")])).with_viewport(40, 10);
    d.init();
    d.run_until_idle();
    assert_eq!(d.model().values(), vec!["", ""]);
    assert_eq!(d.model().active(), 0);
    assert_eq!(d.stats().size_requests, 1);
}

#[test]
fn test_form_input_before_init_survives_reset() {
    let mut team = FormField::new("Team");
    team.set_value("stale");
    let mut d = Dispatcher::new(Form::new(vec![team]));
    type_str(&mut d, "acme");
    d.run_until_idle();
    assert_eq!(d.model().values(), vec!["acme"]);
}

#[test]
fn test_form_reset_message_restarts() {
    let form = Form::new(vec![FormField::new("a"), FormField::new("b")]);
    let mut d = Dispatcher::new(form).with_viewport(50, 10);
    d.send(PasteMsg("x".into()));
    key(&mut d, KeyCode::Tab);
    d.send(PasteMsg("y".into()));
    key(&mut d, KeyCode::Enter);
    d.send(ResetFormMsg);
    d.run_until_idle();

    let form = d.model();
    assert!(!form.is_submitted());
    assert_eq!(form.values(), vec!["", ""]);
    assert_eq!(form.active(), 0);
    // init and the reset each asked for the size
    assert_eq!(d.stats().size_requests, 2);
}

#[test]
fn test_form_resize_renders_identically() {
    let form = Form::new(vec![FormField::new("Team"), FormField::new("Token").password()]);
    let mut d = Dispatcher::new(form);
    d.init();
    d.resize(72, 20);
    d.run_until_idle();
    let first = d.last_view().map(str::to_owned);
    d.resize(72, 20);
    d.run_until_idle();
    assert_eq!(d.last_view().map(str::to_owned), first);
}

#[test]
fn test_tab_strip_wraparound_example() {
    let mut d = Dispatcher::new(Host::new(TabStrip::new(["A", "B", "C"])));
    key(&mut d, KeyCode::Left);
    d.run_until_idle();
    assert_eq!(d.model().widget.active(), 2);

    key(&mut d, KeyCode::Right);
    d.run_until_idle();
    assert_eq!(d.model().widget.active(), 0);

    let changes: Vec<usize> = d.model().tabs.iter().map(|t| t.index).collect();
    assert_eq!(changes, vec![2, 0]);
}

#[test]
fn test_tab_strip_renders_active_label() {
    let mut d = Dispatcher::new(TabStrip::new(["general", "random"]));
    key(&mut d, KeyCode::Tab);
    d.run_until_idle();
    let view = d.last_view().unwrap_or_default();
    assert_eq!(strip_ansi(view), " general  random ");
    assert!(view.contains("\x1b[1m\x1b[38;5;212mrandom"));
}

#[test]
fn test_picker_select_flow() {
    let picker = Picker::new(vec![
        Item::new("C01", "general"),
        Item::new("C02", "random"),
        Item::new("C03", "dev-random"),
    ]);
    let mut d = Dispatcher::new(Host::new(picker)).with_viewport(40, 10);
    type_str(&mut d, "random");
    key(&mut d, KeyCode::Down);
    key(&mut d, KeyCode::Enter);
    d.run_until_idle();

    let host = d.model();
    assert_eq!(host.widget.visible().len(), 2);
    assert_eq!(host.selected.len(), 1);
    let expected = host.widget.visible()[1].id().to_string();
    assert_eq!(host.selected[0].id, expected);
}

#[test]
fn test_picker_enter_on_empty_list_is_noop() {
    let picker = Picker::new(vec![Item::from("general")]);
    let mut d = Dispatcher::new(Host::new(picker));
    type_str(&mut d, "zzz");
    key(&mut d, KeyCode::Enter);
    d.run_until_idle();
    assert!(d.model().selected.is_empty());
    assert!(strip_ansi(d.last_view().unwrap_or_default()).contains("no matches"));
}

struct Offline;

impl FuzzyMatcher for Offline {
    fn rank(&mut self, _: &str, _: &[&str]) -> Result<Vec<Match>, MatchError> {
        Err(MatchError::Unavailable("scorer offline".into()))
    }
}

#[test]
fn test_failing_matcher_yields_empty_list() {
    let picker = Picker::new(vec![Item::from("general"), Item::from("random")]).with_matcher(Offline);
    let mut d = Dispatcher::new(picker);
    type_str(&mut d, "g");
    d.run_until_idle();
    assert!(d.model().visible_indices().is_empty());

    d.send(KeyMsg::from_code(KeyCode::Backspace));
    d.run_until_idle();
    assert_eq!(d.model().visible_indices(), vec![0, 1]);
}

#[test]
fn test_picker_from_crossterm_events() {
    use crossterm::event::{Event, KeyCode as Ct, KeyEvent, KeyModifiers};

    let picker = Picker::new(vec![Item::from("general"), Item::from("random")]);
    let mut d = Dispatcher::new(picker);
    for c in "ran".chars() {
        d.send_event(Event::Key(KeyEvent::new(Ct::Char(c), KeyModifiers::NONE)));
    }
    d.send_event(Event::Paste("d".into()));
    d.run_until_idle();
    assert_eq!(d.model().query(), "rand");
    assert_eq!(d.model().visible_indices(), vec![1]);
}
