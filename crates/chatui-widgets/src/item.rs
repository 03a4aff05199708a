//! Selectable entries.

/// One selectable entry: display text plus a caller-chosen identity.
///
/// The identity is what gets reported back when the item is selected, so a
/// picker over channels can carry channel ids while showing channel names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    id: String,
    text: String,
}

impl Item {
    /// Creates an item with a distinct identity.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// The identity reported on selection.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text shown and matched against.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::new(text, text)
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::new(text.clone(), text)
    }
}

/// An ordered, indexable list of items.
///
/// Order is fixed once built; replace the whole collection to change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<Item>,
}

impl ItemCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Display texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(Item::text).collect()
    }
}

impl From<Vec<Item>> for ItemCollection {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl<T: Into<Item>> FromIterator<T> for ItemCollection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
