//! Items being ordered
//!
//! An item is an opaque line of text. Identity is value equality, so two
//! input lines with the same text are the same item.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A distinct value being placed into the final order
///
/// Cloning is cheap: the text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Arc<str>);

impl Item {
    /// Creates an item from any text
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// Returns the item text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collapses duplicates, keeping the first occurrence of each value
pub fn dedupe<I>(items: I) -> Vec<Item>
where
    I: IntoIterator,
    I::Item: Into<Item>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Into::into)
        .filter(|item: &Item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Item::new("apple"), Item::from(String::from("apple")));
        assert_ne!(Item::new("apple"), Item::new("Apple"));
    }

    #[test]
    fn display_is_raw_text() {
        assert_eq!(Item::new("red fox").to_string(), "red fox");
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let items = dedupe(["b", "a", "b", "c", "a"]);
        let texts: Vec<_> = items.iter().map(Item::as_str).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn dedupe_empty() {
        assert!(dedupe(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Item::new("x")).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
