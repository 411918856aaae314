//! Style tree to CSS text compiler
//!
//! Compilation runs in two passes. [`flatten`] walks the tree and groups every
//! declaration under the space-joined path of the keys above it; [`compile`]
//! then turns each group into one rule block, collapsing combinator markers
//! (`.parent &.child` becomes `.parent.child`, `.parent &:hover` becomes
//! `.parent:hover`).

use ahash::RandomState;
use indexmap::IndexMap;

use super::tree::{StyleNode, StyleRuleTree, StyleValue};
use crate::utils::StyleError;

/// Separator appended after each key while accumulating a selector prefix
const PREFIX_SEPARATOR: char = ' ';

/// Declarations collected under one selector prefix
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRule {
    /// Space-joined key path, with its trailing separator
    pub prefix: String,
    /// Declarations in first-assignment order; a later write keeps the slot
    pub declarations: IndexMap<String, StyleValue, RandomState>,
}

impl FlatRule {
    /// Selector text for this rule with combinator markers collapsed
    #[must_use]
    pub fn selector(&self) -> String {
        collapse_combinators(self.prefix.trim_end())
    }
}

/// Declarations of a style tree grouped by selector prefix
///
/// Rules appear in the order their prefix first received a declaration.
#[derive(Debug, Clone, Default)]
pub struct FlattenedStyleMap {
    rules: IndexMap<String, FlatRule, RandomState>,
}

impl FlattenedStyleMap {
    fn record(&mut self, prefix: &str, property: &str, value: &StyleValue) {
        let rule = self
            .rules
            .entry(prefix.to_string())
            .or_insert_with(|| FlatRule {
                prefix: prefix.to_string(),
                declarations: IndexMap::default(),
            });
        rule.declarations.insert(property.to_string(), value.clone());
    }

    /// Rule for an exact prefix (including the trailing separator)
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&FlatRule> {
        self.rules.get(prefix)
    }

    /// Rules in emission order
    pub fn rules(&self) -> impl Iterator<Item = &FlatRule> {
        self.rules.values()
    }

    /// Number of distinct prefixes
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no declaration was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Group every declaration of `tree` under its accumulated selector prefix
#[must_use]
pub fn flatten(tree: &StyleRuleTree) -> FlattenedStyleMap {
    let mut flat = FlattenedStyleMap::default();
    let mut prefix = String::new();
    flatten_into(tree, &mut prefix, &mut flat);
    flat
}

fn flatten_into(tree: &StyleRuleTree, prefix: &mut String, flat: &mut FlattenedStyleMap) {
    for (key, node) in tree.iter() {
        match node {
            StyleNode::Rules(children) => {
                let restore = prefix.len();
                prefix.push_str(key);
                prefix.push(PREFIX_SEPARATOR);
                flatten_into(children, prefix, flat);
                prefix.truncate(restore);
            }
            StyleNode::Value(value) => flat.record(prefix, key, value),
        }
    }
}

/// Compile a style tree into CSS source text
///
/// Each selector prefix becomes one block:
///
/// ```text
/// <selector> {
///   <property>: <value>;
/// }
/// ```
///
/// Blocks are separated by a newline and the text ends right after the last
/// closing brace. An empty tree compiles to an empty string.
///
/// # Errors
///
/// Returns [`StyleError`] when a declaration sits at the root of the tree, a
/// property name is empty, or a value contains `{`, `}` or `;`.
///
/// # Example
///
/// ```rust
/// use toastr_core::style::{compile, StyleRuleTree};
///
/// let tree = StyleRuleTree::new().rule(
///     ".toast",
///     StyleRuleTree::new()
///         .property("opacity", 0.8)
///         .rule("&.-error", StyleRuleTree::new().property("color", "red")),
/// );
///
/// let css = compile(&tree)?;
/// assert_eq!(css, ".toast {\n  opacity: 0.8;\n}\n.toast.-error {\n  color: red;\n}");
/// # Ok::<(), toastr_core::StyleError>(())
/// ```
pub fn compile(tree: &StyleRuleTree) -> Result<String, StyleError> {
    let flat = flatten(tree);
    let mut css = String::new();

    for rule in flat.rules() {
        let selector = rule.selector();
        if selector.is_empty() {
            let property = rule
                .declarations
                .keys()
                .next()
                .cloned()
                .unwrap_or_default();
            return Err(StyleError::DeclarationOutsideRule { property });
        }

        if !css.is_empty() {
            css.push('\n');
        }
        css.push_str(&selector);
        css.push_str(" {\n");

        for (property, value) in &rule.declarations {
            let value = value.to_string();
            validate_declaration(&selector, property, &value)?;
            css.push_str("  ");
            css.push_str(property);
            css.push_str(": ");
            css.push_str(&value);
            css.push_str(";\n");
        }
        css.push('}');
    }

    Ok(css)
}

fn validate_declaration(selector: &str, property: &str, value: &str) -> Result<(), StyleError> {
    if property.trim().is_empty() {
        return Err(StyleError::EmptyProperty {
            selector: selector.to_string(),
        });
    }
    if value.contains(['{', '}', ';']) {
        return Err(StyleError::InvalidValue {
            selector: selector.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Bind ` &.` and ` &:` markers directly to the following selector character
fn collapse_combinators(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;

    while let Some(at) = rest.find(" &") {
        let after = &rest[at + 2..];
        if after.starts_with(['.', ':']) {
            out.push_str(&rest[..at]);
        } else {
            out.push_str(&rest[..at + 2]);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapse_binds_class_and_pseudo() {
        assert_eq!(collapse_combinators(".parent &.child"), ".parent.child");
        assert_eq!(collapse_combinators(".parent &:hover"), ".parent:hover");
        assert_eq!(collapse_combinators(".a &.b &:focus"), ".a.b:focus");
    }

    #[test]
    fn collapse_leaves_other_ampersands() {
        assert_eq!(collapse_combinators(".a & > .b"), ".a & > .b");
        assert_eq!(collapse_combinators("&.root"), "&.root");
        assert_eq!(collapse_combinators(".a .b"), ".a .b");
    }

    #[test]
    fn flatten_accumulates_prefix() {
        let tree = StyleRuleTree::new().rule(
            ".container",
            StyleRuleTree::new().rule(
                ".notification",
                StyleRuleTree::new().rule("&.error", StyleRuleTree::new().property("color", "red")),
            ),
        );

        let flat = flatten(&tree);
        assert_eq!(flat.len(), 1);
        let rule = flat.get(".container .notification &.error ").unwrap();
        assert_eq!(rule.selector(), ".container .notification.error");
    }

    #[test]
    fn flatten_merges_same_prefix() {
        let tree = StyleRuleTree::new()
            .rule(".a", StyleRuleTree::new().property("color", "red"))
            .rule(".b", StyleRuleTree::new().property("color", "blue"));
        let mut tree = tree;
        tree.insert(".a", StyleRuleTree::new().property("margin", 0));

        let flat = flatten(&tree);
        assert_eq!(flat.len(), 2);
        let first = flat.rules().next().unwrap();
        assert_eq!(first.prefix, ".a ");
        let declarations: Vec<_> = first.declarations.iter().collect();
        assert_eq!(
            declarations,
            [(&"margin".to_string(), &StyleValue::from(0))]
        );
    }

    #[test]
    fn nested_rule_emitted_before_parent_declarations_that_follow() {
        let tree = StyleRuleTree::new().rule(
            ".a",
            StyleRuleTree::new()
                .rule("&:hover", StyleRuleTree::new().property("opacity", 1))
                .property("color", "red"),
        );

        assert_eq!(
            compile(&tree).unwrap(),
            ".a:hover {\n  opacity: 1;\n}\n.a {\n  color: red;\n}"
        );
    }

    #[test]
    fn root_declaration_is_rejected() {
        let tree = StyleRuleTree::new().property("color", "red");
        assert_eq!(
            compile(&tree),
            Err(StyleError::DeclarationOutsideRule {
                property: "color".to_string()
            })
        );
    }

    #[test]
    fn breaking_values_are_rejected() {
        let tree = StyleRuleTree::new().rule(
            ".a",
            StyleRuleTree::new().property("color", "red; } body { color: blue"),
        );
        assert!(matches!(
            compile(&tree),
            Err(StyleError::InvalidValue { .. })
        ));

        let tree = StyleRuleTree::new().rule(".a", StyleRuleTree::new().property(" ", "red"));
        assert!(matches!(
            compile(&tree),
            Err(StyleError::EmptyProperty { .. })
        ));
    }
}
