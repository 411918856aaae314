//! Style compiler behavior on realistic and generated style trees.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use toastr_core::style::{compile, flatten, StyleNode, StyleRuleTree, StyleValue};
use toastr_core::toast::default_style;

const DEFAULT_CSS: &str = "\
.mini-toastr {
  position: fixed;
  z-index: 99999;
  right: 12px;
  top: 12px;
}
.mini-toastr__notification {
  cursor: pointer;
  padding: 12px 18px;
  margin: 0 0 6px 0;
  background-color: #000;
  opacity: 0.8;
  color: #fff;
  border-radius: 3px;
  box-shadow: #3c3b3b 0 0 12px;
  width: 300px;
}
.mini-toastr__notification.-error {
  background-color: #D5122B;
}
.mini-toastr__notification.-warn {
  background-color: #F5AA1E;
}
.mini-toastr__notification.-success {
  background-color: #7AC13E;
}
.mini-toastr__notification.-info {
  background-color: #4196E1;
}
.mini-toastr__notification:hover {
  opacity: 1;
  box-shadow: #000 0 0 12px;
}
.mini-toastr-notification__title {
  font-weight: 500;
}
.mini-toastr-notification__message {
  display: inline-block;
  vertical-align: middle;
  width: 240px;
  padding: 0 12px;
}";

#[test]
fn default_stylesheet_compiles() {
    assert_eq!(compile(&default_style()).unwrap(), DEFAULT_CSS);
}

#[test]
fn empty_tree_compiles_to_empty_text() {
    assert_eq!(compile(&StyleRuleTree::new()).unwrap(), "");
}

#[test]
fn nested_keys_become_descendant_selector() {
    let tree = StyleRuleTree::new().rule(
        "A",
        StyleRuleTree::new().rule("B", StyleRuleTree::new().property("prop", "v")),
    );

    assert_eq!(compile(&tree).unwrap(), "A B {\n  prop: v;\n}");
}

#[test]
fn combinator_binds_to_parent() {
    let tree = StyleRuleTree::new().rule(
        "A",
        StyleRuleTree::new().rule("&.x", StyleRuleTree::new().property("prop", "v")),
    );

    let css = compile(&tree).unwrap();
    assert!(css.contains("A.x {\n  prop: v;\n}"));
    assert!(!css.contains("A .x"));
}

#[test]
fn three_level_compound_selector() {
    let tree = StyleRuleTree::new().rule(
        ".container",
        StyleRuleTree::new().rule(
            ".notification",
            StyleRuleTree::new()
                .rule("&.error", StyleRuleTree::new().property("color", "red"))
                .rule("&:hover", StyleRuleTree::new().property("opacity", 1)),
        ),
    );

    assert_eq!(
        compile(&tree).unwrap(),
        ".container .notification.error {\n  color: red;\n}\n\
         .container .notification:hover {\n  opacity: 1;\n}"
    );
}

#[test]
fn depth_one_leaves_form_single_block() {
    let tree = StyleRuleTree::new().rule(
        ".only",
        StyleRuleTree::new()
            .property("a", 1)
            .property("b", "2px")
            .property("c", 0.5),
    );

    let css = compile(&tree).unwrap();
    assert_eq!(css.matches('{').count(), 1);
    assert_eq!(css, ".only {\n  a: 1;\n  b: 2px;\n  c: 0.5;\n}");
}

#[test]
fn duplicate_property_overwrites_in_place() {
    let mut rules = StyleRuleTree::new()
        .property("color", "red")
        .property("margin", 0);
    rules.insert("color", "blue");
    let tree = StyleRuleTree::new().rule(".a", rules);

    assert_eq!(
        compile(&tree).unwrap(),
        ".a {\n  color: blue;\n  margin: 0;\n}"
    );
}

#[test]
fn separate_branches_merge_into_one_prefix() {
    // ".x .y" at the root and ".x" > ".y" flatten to the same prefix
    let tree = StyleRuleTree::new()
        .rule(".x .y", StyleRuleTree::new().property("color", "red"))
        .rule(
            ".x",
            StyleRuleTree::new().rule(
                ".y",
                StyleRuleTree::new()
                    .property("color", "green")
                    .property("margin", 0),
            ),
        );

    let flat = flatten(&tree);
    assert_eq!(flat.len(), 1);
    let rule = flat.get(".x .y ").unwrap();
    let declarations: Vec<_> = rule
        .declarations
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();
    assert_eq!(
        declarations,
        vec![
            ("color", StyleValue::from("green")),
            ("margin", StyleValue::from(0)),
        ]
    );
    assert_eq!(
        compile(&tree).unwrap(),
        ".x .y {\n  color: green;\n  margin: 0;\n}"
    );
}

#[cfg(feature = "serde")]
#[test]
fn json_tree_compiles_in_source_order() {
    let tree: StyleRuleTree = serde_json::from_str(
        r#"{
            ".toast": {
                "z-index": 10,
                "&.-error": { "background-color": "red" },
                "color": "white"
            }
        }"#,
    )
    .unwrap();

    assert!(matches!(tree.get(".toast"), Some(StyleNode::Rules(_))));
    assert_eq!(
        compile(&tree).unwrap(),
        ".toast {\n  z-index: 10;\n  color: white;\n}\n.toast.-error {\n  background-color: red;\n}"
    );
}

fn selector_key() -> impl Strategy<Value = String> {
    prop_oneof!["\\.[a-z]{1,6}", "&\\.[a-z]{1,6}", "&:(hover|focus|active)"]
}

fn declaration() -> impl Strategy<Value = (String, StyleValue)> {
    (
        "[a-z]{1,8}(-[a-z]{1,6})?",
        prop_oneof![
            "[a-z0-9#]{1,8}".prop_map(StyleValue::Text),
            (0u32..1000).prop_map(StyleValue::from),
        ],
    )
}

fn rules(depth: u32) -> BoxedStrategy<StyleRuleTree> {
    let leaves = prop::collection::vec(declaration(), 1..5).prop_map(|declarations| {
        declarations
            .into_iter()
            .fold(StyleRuleTree::new(), |tree, (name, value)| {
                tree.property(name, value)
            })
    });
    if depth == 0 {
        return leaves.boxed();
    }
    (
        leaves,
        prop::collection::vec((selector_key(), rules(depth - 1)), 0..3),
    )
        .prop_map(|(tree, children)| {
            children
                .into_iter()
                .fold(tree, |tree, (key, child)| tree.rule(key, child))
        })
        .boxed()
}

fn style_tree() -> impl Strategy<Value = StyleRuleTree> {
    prop::collection::vec(("\\.[a-z]{1,6}", rules(2)), 0..4).prop_map(|roots| {
        roots
            .into_iter()
            .fold(StyleRuleTree::new(), |tree, (key, child)| tree.rule(key, child))
    })
}

proptest! {
    #[test]
    fn compile_is_deterministic(tree in style_tree()) {
        let first = compile(&tree).unwrap();
        let second = compile(&tree.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_balanced(tree in style_tree()) {
        let css = compile(&tree).unwrap();
        prop_assert_eq!(css.matches('{').count(), css.matches('}').count());
        prop_assert_eq!(css.matches('{').count(), flatten(&tree).len());
        prop_assert!(!css.contains(" &."));
        prop_assert!(!css.contains(" &:"));
        let closed = css.is_empty() || css.ends_with('}');
        prop_assert!(closed, "css must end right after a closing brace: {:?}", css);
    }
}
