use crate::extract;
use crate::ir::{insert_if_absent, Fields, Item, Kind, Ty};

/// Element shape for an `each` body.
///
/// A bare `{{this}}` anywhere makes it a primitive list, even if the body
/// also has `{{this.x}}` references. Otherwise every `{{this.x.y}}` suffix
/// becomes a string field of a record, first write wins.
pub fn infer_element(body: &str) -> Item {
    if extract::has_bare_self_reference(body) {
        return Item::String;
    }
    let mut fields = Fields::new();
    for path in extract::self_references(body) {
        insert_if_absent(&mut fields, &path, Ty::Leaf(Kind::String));
    }
    Item::Object(fields)
}
