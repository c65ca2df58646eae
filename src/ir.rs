// Inferred data shape. No regex or template text here.

use indexmap::IndexMap;
use std::fmt;

use crate::path::Path;

/// Insertion-ordered; equality ignores order.
pub type Fields = IndexMap<String, Ty>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Leaf(Kind),
    Object(Fields),
    Array(Item),
}

/// Element shape of an `each` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    String,              // `{{this}}` used bare
    Object(Fields),      // records built from `{{this.x}}`
}

/// Root of an inferred shape; always an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub root: Fields,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Schema {
    pub fn is_empty(&self) -> bool { self.root.is_empty() }

    /// Look up the node at `path`, descending through objects only.
    pub fn get(&self, path: &Path) -> Option<&Ty> {
        let (last, parents) = path.split_last();
        let mut current = &self.root;
        for seg in parents {
            match current.get(seg)? {
                Ty::Object(inner) => current = inner,
                _ => return None,
            }
        }
        current.get(last)
    }
}

/// First-write-wins insert.
///
/// Missing intermediate segments become empty objects. If any intermediate
/// segment already holds a leaf or array, or the final segment is taken, the
/// existing node is kept and `node` is dropped. Returns whether `node` landed.
pub fn insert_if_absent(fields: &mut Fields, path: &Path, node: Ty) -> bool {
    let (last, parents) = path.split_last();
    let mut current = fields;
    for seg in parents {
        let slot = current
            .entry(seg.clone())
            .or_insert_with(|| Ty::Object(Fields::new()));
        match slot {
            Ty::Object(inner) => current = inner,
            _ => {
                tracing::trace!(%path, segment = %seg, "intermediate segment is not an object; dropping");
                return false;
            }
        }
    }
    if current.contains_key(last) {
        tracing::trace!(%path, "already assigned; dropping");
        return false;
    }
    current.insert(last.clone(), node);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(raw: &str) -> Path { Path::parse(raw).unwrap() }

    #[test]
    fn creates_intermediate_objects() {
        let mut fields = Fields::new();
        assert!(insert_if_absent(&mut fields, &p("user.profile.name"), Ty::Leaf(Kind::String)));
        let schema = Schema { root: fields };
        assert_eq!(schema.get(&p("user.profile.name")), Some(&Ty::Leaf(Kind::String)));
        assert!(matches!(schema.get(&p("user.profile")), Some(Ty::Object(_))));
    }

    #[test]
    fn first_write_wins_on_same_path() {
        let mut fields = Fields::new();
        assert!(insert_if_absent(&mut fields, &p("x"), Ty::Array(Item::String)));
        assert!(!insert_if_absent(&mut fields, &p("x"), Ty::Leaf(Kind::String)));
        assert_eq!(fields.get("x"), Some(&Ty::Array(Item::String)));
    }

    #[test]
    fn conflicting_intermediate_keeps_existing() {
        let mut fields = Fields::new();
        insert_if_absent(&mut fields, &p("a"), Ty::Leaf(Kind::String));
        assert!(!insert_if_absent(&mut fields, &p("a.b"), Ty::Leaf(Kind::Boolean)));
        assert_eq!(fields.get("a"), Some(&Ty::Leaf(Kind::String)));

        insert_if_absent(&mut fields, &p("tags"), Ty::Array(Item::String));
        assert!(!insert_if_absent(&mut fields, &p("tags.first"), Ty::Leaf(Kind::String)));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn siblings_share_parent_object() {
        let mut fields = Fields::new();
        insert_if_absent(&mut fields, &p("user.name"), Ty::Leaf(Kind::String));
        insert_if_absent(&mut fields, &p("user.admin"), Ty::Leaf(Kind::Boolean));
        let Some(Ty::Object(user)) = fields.get("user") else { panic!("user is an object") };
        assert_eq!(user.keys().collect::<Vec<_>>(), ["name", "admin"]);
    }

    #[test]
    fn equality_ignores_field_order() {
        let mut a = Fields::new();
        a.insert("x".into(), Ty::Leaf(Kind::String));
        a.insert("y".into(), Ty::Leaf(Kind::Boolean));
        let mut b = Fields::new();
        b.insert("y".into(), Ty::Leaf(Kind::Boolean));
        b.insert("x".into(), Ty::Leaf(Kind::String));
        assert_eq!(Schema { root: a }, Schema { root: b });
    }
}
