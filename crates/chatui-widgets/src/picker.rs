//! Fuzzy-filtered selectable list.
//!
//! The picker owns a query field and an [`ItemCollection`]. Every change of
//! the query rebuilds the visible rows: an empty query shows every item in
//! collection order, otherwise only matching items are shown, best score
//! first, ties in collection order. Selecting a row emits
//! [`ItemSelectedMsg`]; closing the picker afterwards is up to the host.
//!
//! # Example
//!
//! ```rust
//! use chatui_runtime::{Dispatcher, KeyMsg};
//! use chatui_widgets::{Item, Picker};
//!
//! let picker = Picker::new(vec![
//!     Item::new("C01", "general"),
//!     Item::new("C02", "random"),
//! ]);
//! let mut d = Dispatcher::new(picker);
//! for c in "rnd".chars() {
//!     d.send(KeyMsg::from_char(c));
//! }
//! d.run_until_idle();
//! assert_eq!(d.model().visible_indices(), vec![1]);
//! ```

use chatui_runtime::{Cmd, KeyMsg, Message, Model, WindowSizeMsg, window_size};
use chatui_style::{Color, Style, truncate, visible_width};

use crate::field::FormField;
use crate::fuzzy::{FuzzyMatcher, NucleoMatcher};
use crate::item::{Item, ItemCollection};
use crate::key::{KeyAction, KeyMap};

const DEFAULT_HEIGHT: usize = 10;
const QUERY_PROMPT: &str = "> ";

/// Emitted when a row is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelectedMsg {
    /// Position of the item in the picker's collection.
    pub index: usize,
    /// The item's identity.
    pub id: String,
}

/// Styles for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerStyles {
    /// Title line.
    pub title: Style,
    /// Unselected rows.
    pub normal: Style,
    /// The highlighted row.
    pub selected: Style,
    /// Characters matched by the query.
    pub matched: Style,
    /// Shown when nothing is visible.
    pub no_matches: Style,
}

impl Default for PickerStyles {
    fn default() -> Self {
        Self {
            title: Style::new().bold(),
            normal: Style::new(),
            selected: Style::new().bold().foreground(Color::Ansi(212)),
            matched: Style::new().underline(),
            no_matches: Style::new().faint(),
        }
    }
}

#[derive(Debug, Clone)]
struct Row {
    index: usize,
    indices: Vec<usize>,
}

/// An incrementally filtered list.
pub struct Picker {
    items: ItemCollection,
    query: FormField,
    rows: Vec<Row>,
    cursor: usize,
    offset: usize,
    height: usize,
    width: usize,
    title: String,
    matcher: Box<dyn FuzzyMatcher>,
    /// Navigation keys.
    pub key_map: KeyMap,
    /// Rendering styles.
    pub styles: PickerStyles,
}

impl std::fmt::Debug for Picker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("items", &self.items.len())
            .field("query", &self.query.value())
            .field("visible", &self.rows.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Picker {
    /// Creates a picker over `items` showing everything.
    pub fn new(items: impl Into<ItemCollection>) -> Self {
        let mut query = FormField::new("Filter")
            .prompt(QUERY_PROMPT)
            .placeholder("type to filter");
        query.focus();

        let mut picker = Self {
            items: items.into(),
            query,
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            height: DEFAULT_HEIGHT,
            width: 0,
            title: String::new(),
            matcher: Box::new(NucleoMatcher::new()),
            key_map: KeyMap::picker(),
            styles: PickerStyles::default(),
        };
        picker.refilter();
        picker
    }

    /// Use a different scorer.
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl FuzzyMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self.refilter();
        self
    }

    /// Use a different keymap.
    #[must_use]
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// Show a title above the query.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Number of rows shown at once.
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.set_height(height);
        self
    }

    /// Replace the collection and re-filter with the current query.
    pub fn set_items(&mut self, items: impl Into<ItemCollection>) {
        self.items = items.into();
        self.refilter();
    }

    /// The full collection.
    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    /// Current query text.
    pub fn query(&self) -> String {
        self.query.value()
    }

    /// Collection positions of the visible rows, in display order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }

    /// Visible items, in display order.
    pub fn visible(&self) -> Vec<&Item> {
        self.rows
            .iter()
            .filter_map(|r| self.items.get(r.index))
            .collect()
    }

    /// Highlighted row, as an index into the visible list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The highlighted item.
    pub fn selected_item(&self) -> Option<&Item> {
        self.rows.get(self.cursor).and_then(|r| self.items.get(r.index))
    }

    /// Rows shown at once.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set the number of rows shown at once (at least one).
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_to_cursor();
    }

    /// Columns available to each line; 0 means unbounded.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Limit every rendered line to `width` columns (0 for unbounded).
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        let prompt = visible_width(QUERY_PROMPT);
        self.query.set_width(if width == 0 { 0 } else { width.saturating_sub(prompt).max(1) });
    }

    /// Set the query and rebuild the visible rows.
    pub fn on_query_changed(&mut self, text: &str) {
        if self.query.value() != text {
            self.query.set_value(text);
        }
        self.refilter();
    }

    /// Move the highlight up, stopping at the first row.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.scroll_to_cursor();
    }

    /// Move the highlight down, stopping at the last row.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
        self.scroll_to_cursor();
    }

    /// Select the row at `visible_index`.
    ///
    /// Returns a command delivering [`ItemSelectedMsg`], or `None` when the
    /// index is not a visible row.
    pub fn select(&self, visible_index: usize) -> Option<Cmd> {
        let row = self.rows.get(visible_index)?;
        let item = self.items.get(row.index)?;
        tracing::debug!(index = row.index, id = item.id(), "picker item selected");
        Some(Cmd::message(ItemSelectedMsg {
            index: row.index,
            id: item.id().to_string(),
        }))
    }

    fn refilter(&mut self) {
        let query = self.query.value();
        self.rows = if query.is_empty() {
            (0..self.items.len())
                .map(|index| Row {
                    index,
                    indices: Vec::new(),
                })
                .collect()
        } else {
            let texts = self.items.texts();
            match self.matcher.rank(&query, &texts) {
                Ok(mut matches) => {
                    matches.retain(|m| m.index < texts.len());
                    // one row per item, keeping its best score
                    matches.sort_by(|a, b| a.index.cmp(&b.index).then(b.score.cmp(&a.score)));
                    matches.dedup_by_key(|m| m.index);
                    matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
                    matches
                        .into_iter()
                        .map(|mut m| {
                            m.indices.sort_unstable();
                            m.indices.dedup();
                            Row {
                                index: m.index,
                                indices: m.indices,
                            }
                        })
                        .collect()
                }
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "fuzzy matcher failed, showing no matches");
                    Vec::new()
                }
            }
        };
        self.cursor = 0;
        self.offset = 0;
        tracing::trace!(
            query = %query,
            visible = self.rows.len(),
            total = self.items.len(),
            "picker re-filtered"
        );
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }

    fn chrome_rows(&self) -> usize {
        1 + usize::from(!self.title.is_empty())
    }

    /// Handle navigation, selection and query editing.
    pub fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_height(usize::from(size.height).saturating_sub(self.chrome_rows()));
            self.set_width(usize::from(size.width));
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            match self.key_map.action_for(key) {
                Some(KeyAction::Previous) => {
                    self.cursor_up();
                    return None;
                }
                Some(KeyAction::Next) => {
                    self.cursor_down();
                    return None;
                }
                Some(KeyAction::Submit) => return self.select(self.cursor),
                None => {}
            }
        }

        let before = self.query.value();
        self.query.update(msg);
        let after = self.query.value();
        if before != after {
            self.on_query_changed(&after);
        }
        None
    }

    /// Render the title, query line and visible rows.
    pub fn view(&self) -> String {
        let mut lines = Vec::with_capacity(self.height + 2);
        if !self.title.is_empty() {
            lines.push(self.styles.title.render(&self.title));
        }
        lines.push(self.query.view());

        if self.rows.is_empty() {
            let text = if self.items.is_empty() { "  no items" } else { "  no matches" };
            lines.push(self.styles.no_matches.render(text));
        }

        for (i, row) in self
            .rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
        {
            let Some(item) = self.items.get(row.index) else {
                continue;
            };
            let selected = i == self.cursor;
            let base = if selected { &self.styles.selected } else { &self.styles.normal };
            let prefix = if selected { base.render("▸ ") } else { "  ".to_string() };
            lines.push(format!(
                "{prefix}{}",
                highlight(item.text(), &row.indices, base, &self.styles.matched)
            ));
        }

        if self.width > 0 {
            for line in &mut lines {
                *line = truncate(line, self.width);
            }
        }
        lines.join("\n")
    }
}

// Render `text`, styling chars at `hits` with `hit` and the rest with `base`.
fn highlight(text: &str, hits: &[usize], base: &Style, hit: &Style) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_is_hit = false;
    for (i, c) in text.chars().enumerate() {
        let is_hit = hits.binary_search(&i).is_ok();
        if is_hit != run_is_hit && !run.is_empty() {
            let style = if run_is_hit { hit } else { base };
            out.push_str(&style.render(&run));
            run.clear();
        }
        run_is_hit = is_hit;
        run.push(c);
    }
    if !run.is_empty() {
        let style = if run_is_hit { hit } else { base };
        out.push_str(&style.render(&run));
    }
    out
}

impl Model for Picker {
    fn init(&self) -> Option<Cmd> {
        Some(window_size())
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        Picker::update(self, msg)
    }

    fn view(&self) -> String {
        Picker::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::{Match, MatchError};
    use chatui_style::strip_ansi;

    struct Fixed(Vec<Match>);

    impl FuzzyMatcher for Fixed {
        fn rank(&mut self, _: &str, _: &[&str]) -> Result<Vec<Match>, MatchError> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl FuzzyMatcher for Broken {
        fn rank(&mut self, _: &str, _: &[&str]) -> Result<Vec<Match>, MatchError> {
            Err(MatchError::Unavailable("offline".into()))
        }
    }

    fn hit(index: usize, score: u32) -> Match {
        Match {
            index,
            score,
            indices: Vec::new(),
        }
    }

    fn channels() -> Vec<Item> {
        ["general", "random", "dev-ops", "design"]
            .into_iter()
            .map(Item::from)
            .collect()
    }

    fn type_str(p: &mut Picker, s: &str) {
        for c in s.chars() {
            p.update(Message::new(KeyMsg::from_char(c)));
        }
    }

    fn press(p: &mut Picker, chord: &str) -> Option<Cmd> {
        p.update(Message::new(chord.parse::<KeyMsg>().unwrap()))
    }

    #[test]
    fn test_empty_query_shows_everything_in_order() {
        let p = Picker::new(channels());
        assert_eq!(p.visible_indices(), vec![0, 1, 2, 3]);
        assert_eq!(p.query(), "");
    }

    #[test]
    fn test_typing_filters() {
        let mut p = Picker::new(channels());
        type_str(&mut p, "de");
        let texts: Vec<&str> = p.visible().iter().map(|i| i.text()).collect();
        assert!(texts.contains(&"dev-ops"));
        assert!(texts.contains(&"design"));
        assert!(!texts.contains(&"random"));
    }

    #[test]
    fn test_clearing_query_restores_full_list() {
        let mut p = Picker::new(channels());
        type_str(&mut p, "zz");
        assert!(p.visible_indices().is_empty());
        press(&mut p, "backspace");
        press(&mut p, "backspace");
        assert_eq!(p.visible_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_score_order_with_stable_ties() {
        let matcher = Fixed(vec![hit(3, 10), hit(0, 50), hit(2, 10), hit(1, 10)]);
        let mut p = Picker::new(channels()).with_matcher(matcher);
        p.on_query_changed("x");
        assert_eq!(p.visible_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_matches_are_dropped() {
        let mut p = Picker::new(channels()).with_matcher(Fixed(vec![hit(9, 1), hit(1, 1)]));
        p.on_query_changed("x");
        assert_eq!(p.visible_indices(), vec![1]);
    }

    #[test]
    fn test_failing_matcher_shows_nothing() {
        let mut p = Picker::new(channels()).with_matcher(Broken);
        assert_eq!(p.visible_indices().len(), 4);
        type_str(&mut p, "gen");
        assert!(p.visible_indices().is_empty());
        assert!(press(&mut p, "enter").is_none());
        assert!(strip_ansi(&p.view()).contains("no matches"));
    }

    #[test]
    fn test_cursor_clamps() {
        let mut p = Picker::new(channels());
        press(&mut p, "up");
        assert_eq!(p.cursor(), 0);
        for _ in 0..10 {
            press(&mut p, "down");
        }
        assert_eq!(p.cursor(), 3);
        assert_eq!(p.selected_item().map(Item::text), Some("design"));
    }

    #[test]
    fn test_refilter_resets_cursor() {
        let mut p = Picker::new(channels());
        press(&mut p, "ctrl+n");
        press(&mut p, "ctrl+n");
        assert_eq!(p.cursor(), 2);
        type_str(&mut p, "d");
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn test_select_emits_original_index_and_id() {
        let items = vec![Item::new("C1", "general"), Item::new("C2", "random")];
        let mut p = Picker::new(items);
        type_str(&mut p, "rand");
        let cmd = p.select(0).unwrap();
        let msg = cmd.execute().unwrap().downcast::<ItemSelectedMsg>().unwrap();
        assert_eq!(msg, ItemSelectedMsg { index: 1, id: "C2".into() });
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let p = Picker::new(channels());
        assert!(p.select(4).is_none());
        assert!(Picker::new(Vec::<Item>::new()).select(0).is_none());
    }

    #[test]
    fn test_enter_selects_highlighted() {
        let mut p = Picker::new(channels());
        press(&mut p, "down");
        let msg = press(&mut p, "enter")
            .unwrap()
            .execute()
            .unwrap()
            .downcast::<ItemSelectedMsg>()
            .unwrap();
        assert_eq!(msg.index, 1);
        assert_eq!(msg.id, "random");
    }

    #[test]
    fn test_paste_edits_query() {
        let mut p = Picker::new(channels());
        p.update(Message::new(chatui_runtime::PasteMsg("random".into())));
        assert_eq!(p.query(), "random");
        assert_eq!(p.visible_indices(), vec![1]);
    }

    #[test]
    fn test_set_items_refilters() {
        let mut p = Picker::new(channels());
        type_str(&mut p, "gen");
        p.set_items(vec![Item::from("generic"), Item::from("other")]);
        assert_eq!(p.visible_indices(), vec![0]);
    }

    #[test]
    fn test_resize_bounds_rows_and_scrolls() {
        let items: Vec<Item> = (0..20).map(|i| Item::from(format!("chan-{i:02}"))).collect();
        let mut p = Picker::new(items);
        p.update(Message::new(WindowSizeMsg { width: 40, height: 4 }));
        assert_eq!(p.height(), 3);
        for _ in 0..5 {
            press(&mut p, "down");
        }
        let view = strip_ansi(&p.view());
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  chan-03");
        assert_eq!(lines[3], "▸ chan-05");
    }

    #[test]
    fn test_view_highlights_matches() {
        let mut p = Picker::new(vec![Item::from("random")]);
        type_str(&mut p, "rd");
        let view = p.view();
        assert!(view.contains("\x1b[4m"));
        assert!(strip_ansi(&view).ends_with("▸ random"));
    }

    #[test]
    fn test_view_empty_collection() {
        let p = Picker::new(Vec::<Item>::new()).with_title("Channels");
        let view = strip_ansi(&p.view());
        assert_eq!(view.lines().next(), Some("Channels"));
        assert!(view.contains("no items"));
    }

    #[test]
    fn test_repeated_match_shows_one_row() {
        let mut p = Picker::new(channels()).with_matcher(Fixed(vec![hit(1, 10), hit(0, 5), hit(1, 30)]));
        p.on_query_changed("x");
        assert_eq!(p.visible_indices(), vec![1, 0]);
    }

    #[test]
    fn test_lines_fit_viewport_width() {
        let mut p = Picker::new(vec![Item::from("a-rather-long-channel-name"), Item::from("dev")]);
        p.update(Message::new(WindowSizeMsg { width: 12, height: 10 }));
        let view = strip_ansi(&p.view());
        assert!(view.lines().all(|l| visible_width(l) <= 12));
        assert!(view.lines().any(|l| l.ends_with('…')));

        type_str(&mut p, "aratherlongchannel");
        let view = p.view();
        assert_eq!(p.visible_indices(), vec![0]);
        assert!(view.lines().all(|l| visible_width(l) <= 12));
    }

    #[test]
    fn test_highlight_runs() {
        let out = highlight("abc", &[0, 1], &Style::new(), &Style::new().bold());
        assert_eq!(out, "\x1b[1mab\x1b[0mc");
    }
}
