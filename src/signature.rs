//! Canonical, order-independent signatures for object shapes.
//!
//! A signature is the set of per-field signatures of an object. Nested objects
//! are encoded recursively with their fields sorted, array element shapes are
//! deduplicated and sorted, so two objects declaring the same fields in a
//! different order have equal signatures. Used only for equivalence testing.
use std::collections::BTreeSet;
use std::fmt;

use crate::ir::{ArrayItems, Field, Kind, NodeKey, ObjectNode, ObjectShape, TypeNode};

/// Per-object signature: one entry per declared field.
pub type Signature = BTreeSet<FieldSignature>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldSignature {
    pub name: String,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Primitive(Kind),
    Object(Signature),
    Array(BTreeSet<Shape>),
    /// already reduced sub-shape
    Ref(NodeKey),
}

/// Signature of an object node. A reduced object has no fields of its own and
/// yields the empty set.
pub fn encode_object(obj: &ObjectNode) -> Signature {
    match &obj.shape {
        ObjectShape::Properties(props) => props
            .iter()
            .map(|(name, field)| encode_field(name, field))
            .collect(),
        ObjectShape::Ref(_) => Signature::new(),
    }
}

pub fn encode_field(name: &str, field: &Field) -> FieldSignature {
    FieldSignature { name: name.to_string(), shape: encode_shape(&field.ty) }
}

/// Inline encoding of a node, without a field name prefix.
pub fn encode_shape(ty: &TypeNode) -> Shape {
    match ty {
        TypeNode::Object(obj) => match &obj.shape {
            ObjectShape::Ref(key) => Shape::Ref(key.clone()),
            ObjectShape::Properties(_) => Shape::Object(encode_object(obj)),
        },
        TypeNode::Array(arr) => match &arr.items {
            ArrayItems::Homogeneous(el) => Shape::Array(BTreeSet::from([encode_shape(el)])),
            ArrayItems::Heterogeneous(els) => Shape::Array(els.iter().map(encode_shape).collect()),
            ArrayItems::Ref(key) => Shape::Ref(key.clone()),
        },
        other => Shape::Primitive(other.kind()),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DISPLAY: `name:kind`, `name:{a:..,b:..}`, `name:[..]`
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Primitive(kind) => write!(f, "{kind}"),
            Shape::Object(fields) => {
                f.write_str("{")?;
                write_joined(f, fields)?;
                f.write_str("}")
            }
            Shape::Array(shapes) => {
                f.write_str("[")?;
                write_joined(f, shapes)?;
                f.write_str("]")
            }
            Shape::Ref(key) => write!(f, "&{key}"),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &BTreeSet<T>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Render a whole signature, fields in canonical order.
pub fn render(sig: &Signature) -> String {
    Shape::Object(sig.clone()).to_string()
}
