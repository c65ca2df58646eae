//! Type-declaration text for an inferred [`Schema`].
//!
//! ```text
//! TemplateData {
//!   name: string;
//!   user: {
//!     admin: boolean;
//!   };
//!   tags: string[];
//!   items: {
//!     title: string;
//!   }[];
//! }
//! ```
use crate::ir::{Fields, Item, Schema, Ty};

const INDENT: &str = "  ";

pub struct Codegen {
    out: String,
    keyword: Option<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new(), keyword: None }
    }

    /// Prefix root headers with a declaration keyword, e.g. `interface`.
    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let keyword = if keyword.trim().is_empty() { None } else { Some(keyword) };
        Self { out: String::new(), keyword }
    }

    /// Append one root declaration. Successive declarations are separated by
    /// a blank line.
    pub fn emit(&mut self, schema: &Schema, root_name: &str) {
        if !self.out.is_empty() {
            self.out.push_str("\n\n");
        }
        if let Some(keyword) = &self.keyword {
            self.out.push_str(keyword);
            self.out.push(' ');
        }
        self.out.push_str(root_name);
        self.out.push_str(" {\n");
        self.emit_fields(&schema.root, 1);
        self.out.push('}');
    }

    pub fn into_string(self) -> String { self.out }

    fn emit_fields(&mut self, fields: &Fields, depth: usize) {
        let pad = INDENT.repeat(depth);
        for (name, ty) in fields {
            match ty {
                Ty::Leaf(kind) => self.line(&pad, name, kind.as_str(), ";"),
                Ty::Array(Item::String) => self.line(&pad, name, "string", "[];"),
                Ty::Array(Item::Object(inner)) => self.block(&pad, name, inner, depth, "}[];"),
                Ty::Object(inner) => self.block(&pad, name, inner, depth, "};"),
            }
        }
    }

    fn line(&mut self, pad: &str, name: &str, ty: &str, suffix: &str) {
        self.out.push_str(&format!("{pad}{name}: {ty}{suffix}\n"));
    }

    fn block(&mut self, pad: &str, name: &str, inner: &Fields, depth: usize, close: &str) {
        self.out.push_str(&format!("{pad}{name}: {{\n"));
        self.emit_fields(inner, depth + 1);
        self.out.push_str(&format!("{pad}{close}\n"));
    }
}

impl Default for Codegen {
    fn default() -> Self { Self::new() }
}

/// Render `schema` as a declaration named `root_name`, no keyword.
pub fn render(schema: &Schema, root_name: &str) -> String {
    let mut cg = Codegen::new();
    cg.emit(schema, root_name);
    cg.into_string()
}
