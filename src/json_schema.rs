use serde_json::{json, Map, Value};

use crate::ir::{Fields, Item, Schema, Ty};

/// Minimal JSON Schema–ish emission. Property order follows inference order.
pub fn emit_schema(schema: &Schema) -> Value {
    emit_object(&schema.root)
}

fn emit_object(fields: &Fields) -> Value {
    let props = fields
        .iter()
        .map(|(k, ty)| (k.clone(), emit_ty(ty)))
        .collect::<Map<String, Value>>();
    json!({ "type": "object", "properties": props })
}

fn emit_ty(ty: &Ty) -> Value {
    match ty {
        Ty::Leaf(kind) => json!({ "type": kind.as_str() }),
        Ty::Object(fields) => emit_object(fields),
        Ty::Array(Item::String) => json!({ "type": "array", "items": { "type": "string" } }),
        Ty::Array(Item::Object(fields)) => json!({ "type": "array", "items": emit_object(fields) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer;

    #[test]
    fn mirrors_schema_shape() {
        let schema = infer("{{#each items}}{{this.name}}{{/each}}{{user.email}}{{#if vip}}{{/if}}{{#each tags}}{{this}}{{/each}}");
        let v = emit_schema(&schema);
        assert_eq!(v["type"], "object");
        assert_eq!(v["properties"]["items"]["type"], "array");
        assert_eq!(v["properties"]["items"]["items"]["properties"]["name"]["type"], "string");
        assert_eq!(v["properties"]["tags"]["items"]["type"], "string");
        assert_eq!(v["properties"]["user"]["properties"]["email"]["type"], "string");
        assert_eq!(v["properties"]["vip"]["type"], "boolean");
    }

    #[test]
    fn property_order_is_preserved() {
        let schema = infer("{{zeta}} {{alpha}} {{#if mid}}{{/if}}");
        let v = emit_schema(&schema);
        let keys = v["properties"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
