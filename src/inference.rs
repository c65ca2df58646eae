//! Static shape inference for `{{ }}` templates.
//!
//! The template is never executed. Four regex passes feed one first-write-wins
//! builder, in a fixed order:
//! 1. `each` loops → arrays (element shape from the loop body)
//! 2. bare references → `string`, or `boolean` when the same path is also an
//!    `if`/`unless` guard anywhere in the text
//! 3. `if`/`unless` guards not seen yet → `boolean`
//!
//! Since earlier passes win, a path used both as a loop target and a bare
//! reference stays an array.
pub mod arr;

use std::collections::HashSet;

use crate::extract::{self, Pattern};
use crate::ir::{insert_if_absent, Fields, Kind, Schema, Ty};
use crate::path::Path;

pub use arr::infer_element;

// ------------------------------- Front API -------------------------------- //

/// Accumulates one template's shape. Steps must run in order; `infer` does.
pub struct Inference<'t> {
    text: &'t str,
    root: Fields,
}

impl<'t> Inference<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text, root: Fields::new() }
    }

    pub fn observe_loops(&mut self) {
        for found in Pattern::Loop.scan(self.text) {
            let item = infer_element(found.body.unwrap_or_default());
            self.insert(&found.path, Ty::Array(item));
        }
    }

    pub fn observe_variables(&mut self) {
        let guards: HashSet<Path> = extract::guard_paths(self.text);
        for found in Pattern::Variable.scan(self.text) {
            let kind = if guards.contains(&found.path) { Kind::Boolean } else { Kind::String };
            self.insert(&found.path, Ty::Leaf(kind));
        }
    }

    pub fn observe_guards(&mut self) {
        let guards = Pattern::If.scan(self.text).chain(Pattern::Unless.scan(self.text));
        for found in guards {
            if found.path.is_self_reference() {
                continue;
            }
            self.insert(&found.path, Ty::Leaf(Kind::Boolean));
        }
    }

    pub fn solve(self) -> Schema {
        Schema { root: self.root }
    }

    fn insert(&mut self, path: &Path, node: Ty) {
        if !insert_if_absent(&mut self.root, path, node) {
            tracing::debug!(%path, "conflicting shape ignored; first write wins");
        }
    }
}

/// Infer the data shape `text` expects.
pub fn infer(text: &str) -> Schema {
    let mut inf = Inference::new(text);
    inf.observe_loops();
    inf.observe_variables();
    inf.observe_guards();
    let schema = inf.solve();
    tracing::trace!(fields = schema.root.len(), "inferred template shape");
    schema
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Item;

    fn fields(pairs: Vec<(&str, Ty)>) -> Fields {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    const S: Ty = Ty::Leaf(Kind::String);
    const B: Ty = Ty::Leaf(Kind::Boolean);

    #[test]
    fn bare_reference_and_guard() {
        let schema = infer("Hi {{name}} {{#if isPro}}X{{/if}}");
        assert_eq!(schema.root, fields(vec![("name", S), ("isPro", B)]));
    }

    #[test]
    fn bare_reference_promoted_when_also_guard() {
        // the guard comes after the reference; promotion is not positional
        let schema = infer("{{active}} ... {{#if active}}on{{/if}}");
        assert_eq!(schema.root, fields(vec![("active", B)]));
    }

    #[test]
    fn primitive_array() {
        let schema = infer("{{#each tags}}{{this}}{{/each}}");
        assert_eq!(schema.root, fields(vec![("tags", Ty::Array(Item::String))]));
    }

    #[test]
    fn record_array() {
        let schema = infer("{{#each items}}{{this.name}} {{this.price}}{{/each}}");
        let item = Item::Object(fields(vec![("name", S), ("price", S)]));
        assert_eq!(schema.root, fields(vec![("items", Ty::Array(item))]));
    }

    #[test]
    fn nested_path() {
        let schema = infer("{{user.profile.name}}");
        let profile = Ty::Object(fields(vec![("name", S)]));
        let user = Ty::Object(fields(vec![("profile", profile)]));
        assert_eq!(schema.root, fields(vec![("user", user)]));
    }

    #[test]
    fn loop_wins_over_later_bare_reference() {
        let schema = infer("{{x}} {{#each x}}{{this}}{{/each}}");
        assert_eq!(schema.root, fields(vec![("x", Ty::Array(Item::String))]));
    }

    #[test]
    fn guard_only_boolean() {
        let schema = infer("{{#unless hasBanner}}none{{/unless}}");
        assert_eq!(schema.root, fields(vec![("hasBanner", B)]));
    }

    #[test]
    fn self_references_stay_out_of_root() {
        let schema = infer("{{#each rows}}{{#if this.visible}}{{this.label}}{{/if}}{{/each}}");
        let item = Item::Object(fields(vec![("label", S)]));
        assert_eq!(schema.root, fields(vec![("rows", Ty::Array(item))]));
    }

    #[test]
    fn field_order_is_loops_then_variables_then_guards() {
        let schema = infer("{{#if flag}}{{/if}}{{title}}{{#each list}}{{this}}{{/each}}");
        assert_eq!(schema.root.keys().collect::<Vec<_>>(), ["list", "title", "flag"]);
    }

    #[test]
    fn nested_loops_are_not_supported() {
        // the inner close marker ends the outer loop
        let schema = infer("{{#each groups}}{{#each this.members}}{{this}}{{/each}}{{/each}}");
        assert_eq!(schema.root, fields(vec![("groups", Ty::Array(Item::String))]));
    }

    #[test]
    fn nested_guard_under_existing_leaf_is_dropped() {
        let schema = infer("{{user}} {{#if user.admin}}!{{/if}}");
        assert_eq!(schema.root, fields(vec![("user", S)]));
    }

    #[test]
    fn malformed_markers_are_silently_omitted() {
        let schema = infer("{{#each items}}{{this}} {{ spaced }} {{#if}} {{a..b}}");
        assert!(schema.is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "{{#each a.b}}{{this.c}}{{/each}}{{d.e}}{{#unless f}}{{/unless}}{{#if d.g}}{{/if}}";
        assert_eq!(infer(text), infer(text));
    }
}
