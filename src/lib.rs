//! Infer the data shape a `{{ }}` template expects, without rendering it.
pub mod path;
pub mod extract;
pub mod ir;
pub mod inference;
pub mod codegen;
pub mod json_schema;
pub mod error;
pub mod cli;

pub use codegen::render;
pub use inference::infer;
pub use ir::{Item, Kind, Schema, Ty};
