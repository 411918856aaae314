//! Nested style rule tree
//!
//! A `StyleRuleTree` maps selector fragments or property names to either a
//! leaf value or a nested tree. Keys keep their first-insertion order, and
//! assigning an existing key replaces its value in place, matching how a
//! JavaScript object literal behaves.

use std::fmt;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::Deserialize;

/// Leaf value of a style declaration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(from = "RawValue"))]
pub enum StyleValue {
    /// Text emitted verbatim, units included (`"12px"`)
    Text(String),
    /// Number emitted unit-less
    Number(f64),
}

/// JSON shapes accepted for a leaf
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

#[cfg(feature = "serde")]
impl From<RawValue> for StyleValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Text(text) => Self::Text(text),
            RawValue::Number(number) => Self::Number(number),
            RawValue::Flag(flag) => Self::Text(flag.to_string()),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Value stored under a key of a `StyleRuleTree`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(untagged))]
pub enum StyleNode {
    /// Property declaration
    Value(StyleValue),
    /// Nested selector group
    Rules(StyleRuleTree),
}

impl From<StyleValue> for StyleNode {
    fn from(value: StyleValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! node_from_value {
    ($($ty:ty),*) => {
        $(impl From<$ty> for StyleNode {
            fn from(value: $ty) -> Self {
                Self::Value(StyleValue::from(value))
            }
        })*
    };
}

node_from_value!(&str, String, f64, i32, u32);

impl From<StyleRuleTree> for StyleNode {
    fn from(tree: StyleRuleTree) -> Self {
        Self::Rules(tree)
    }
}

/// Insertion-ordered tree of style rules
///
/// With the `serde` feature a tree deserializes from a JSON object in source
/// key order. Strings, numbers and booleans become leaves, objects become
/// nested groups; `null` and arrays are rejected.
///
/// # Example
///
/// ```rust
/// use toastr_core::style::StyleRuleTree;
///
/// let tree = StyleRuleTree::new().rule(
///     ".box",
///     StyleRuleTree::new()
///         .property("color", "#fff")
///         .rule("&:hover", StyleRuleTree::new().property("opacity", 1)),
/// );
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(transparent))]
pub struct StyleRuleTree {
    entries: IndexMap<String, StyleNode>,
}

impl StyleRuleTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `node` to `key`, replacing any earlier value in place
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<StyleNode>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Builder form of [`insert`](Self::insert) for a declaration
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(name, StyleNode::Value(value.into()));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a nested group
    #[must_use]
    pub fn rule(mut self, selector: impl Into<String>, rules: Self) -> Self {
        self.insert(selector, StyleNode::Rules(rules));
        self
    }

    /// Look up the node stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleNode> {
        self.entries.get(key)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Number of direct entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut tree = StyleRuleTree::new()
            .property("color", "red")
            .property("margin", 0);
        tree.insert("color", "blue");

        let keys: Vec<_> = tree.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["color", "margin"]);
        assert_eq!(tree.get("color"), Some(&StyleNode::from("blue")));
    }

    #[test]
    fn numbers_print_unitless() {
        assert_eq!(StyleValue::from(99999).to_string(), "99999");
        assert_eq!(StyleValue::from(0.8).to_string(), "0.8");
        assert_eq!(StyleValue::from(1.0).to_string(), "1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_preserves_key_order() {
        let tree: StyleRuleTree = serde_json::from_str(
            r##"{".b": {"z-index": 3, "color": "#000", "&:hover": {"opacity": 1}}, ".a": {"bold": true}}"##,
        )
        .unwrap();

        let keys: Vec<_> = tree.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, [".b", ".a"]);

        let Some(StyleNode::Rules(inner)) = tree.get(".b") else {
            panic!("expected nested rules");
        };
        let inner_keys: Vec<_> = inner.iter().map(|(key, _)| key).collect();
        assert_eq!(inner_keys, ["z-index", "color", "&:hover"]);
        assert_eq!(inner.get("z-index"), Some(&StyleNode::from(3)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_null_and_arrays() {
        let result = serde_json::from_str::<StyleRuleTree>(r#"{".a": {"color": null}}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<StyleRuleTree>(r#"{".a": {"margin": [0, 1]}}"#);
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_booleans_as_text() {
        let tree: StyleRuleTree = serde_json::from_str(r#"{".a": {"visible": true}}"#).unwrap();
        let Some(StyleNode::Rules(inner)) = tree.get(".a") else {
            panic!("expected nested rules");
        };
        assert_eq!(inner.get("visible"), Some(&StyleNode::from("true")));
    }
}
