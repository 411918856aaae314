//! Nested style configuration and its CSS compiler.
//!
//! Styles are authored as a [`StyleRuleTree`], nesting selectors the way a
//! preprocessor would, and compiled once per initialization into plain CSS
//! text with [`compile`].
//!
//! ## Nesting rules
//!
//! - A nested key is joined to its parent with a space (descendant selector)
//! - A nested key starting with `&.` or `&:` attaches directly to its parent
//! - Leaf values are declarations of the innermost enclosing selector

pub mod compiler;
pub mod tree;

pub use compiler::{compile, flatten, FlatRule, FlattenedStyleMap};
pub use tree::{StyleNode, StyleRuleTree, StyleValue};
