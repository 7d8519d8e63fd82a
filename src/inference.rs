//! Value analyzer: a single JSON document in, a typed schema tree out.
//!
//! Pure function of the input value. Objects keep their document key order,
//! keys are case-normalized (the original key rides along on the [`Field`]),
//! arrays collapse to one element type when every element has the same shape.
pub mod num;
pub mod str;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::ir::{ArrayItems, ArrayNode, Field, NodeKey, ObjectNode, TypeNode};
use crate::naming;

/// Analyze a document root: like [`analyze`], plus the root object is tagged
/// with the `"root"` key at nest level 0.
///
/// Non-object roots are analyzed as usual; rejecting them is the resolver's job.
pub fn analyze_root(v: &Value) -> TypeNode {
    match analyze(v) {
        TypeNode::Object(obj) => TypeNode::Object(ObjectNode {
            nest_level: Some(0),
            original_key: Some(NodeKey::ROOT_NAME.to_string()),
            ..obj
        }),
        other => other,
    }
}

pub fn analyze(v: &Value) -> TypeNode {
    match v {
        Value::Null => TypeNode::Null,
        Value::Bool(_) => TypeNode::Boolean,
        Value::Number(n) => num::classify_number(n),
        Value::String(s) => str::classify_string(s),
        Value::Array(xs) => analyze_array(xs),
        Value::Object(m) => analyze_object(m),
    }
}

fn analyze_array(xs: &[Value]) -> TypeNode {
    if xs.is_empty() {
        return TypeNode::array_of(TypeNode::Any);
    }
    let mut distinct: Vec<TypeNode> = Vec::new();
    for el in xs {
        let ty = analyze(el);
        if !distinct.contains(&ty) {
            distinct.push(ty);
        }
    }
    let items = if distinct.len() == 1 {
        ArrayItems::Homogeneous(Box::new(distinct.remove(0)))
    } else {
        ArrayItems::Heterogeneous(distinct)
    };
    TypeNode::Array(ArrayNode { items })
}

fn analyze_object(map: &Map<String, Value>) -> TypeNode {
    let mut properties = IndexMap::with_capacity(map.len());
    for (k, v) in map {
        let field = Field { original_key: k.clone(), ty: analyze(v) };
        // two keys normalizing to the same name: first one keeps the slot
        properties.entry(naming::to_camel(k)).or_insert(field);
    }
    TypeNode::object(properties)
}

// ------------------------------- Tests ------------------------------------ //
