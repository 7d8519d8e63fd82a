// Strongly-typed schema tree shared by the analyzer, the resolver and codegen.
// No serde_json::Value here.

use std::fmt;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeNode {
    Null,
    Any,
    String,
    Decimal,
    Integer,
    Boolean,
    Date,
    Array(ArrayNode),
    Object(ObjectNode),
}

/// Kind tag of a [`TypeNode`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind { Null, Any, String, Decimal, Integer, Boolean, Date, Array, Object }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayNode {
    #[serde(flatten)]
    pub items: ArrayItems,
}

/// What an array holds. A reduced array carries only the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrayItems {
    #[serde(rename = "elementType")]
    Homogeneous(Box<TypeNode>),
    /// distinct element shapes, in first-seen order
    #[serde(rename = "elementTypes")]
    Heterogeneous(Vec<TypeNode>),
    #[serde(rename = "ref")]
    Ref(NodeKey),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    /// Depth in the document, assigned by reduction (including objects inside
    /// mixed arrays); `None` on raw analyzer output except the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nest_level: Option<usize>,
    /// Only the root is tagged (`"root"`); properties carry their key on [`Field`].
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub original_key: Option<String>,
    #[serde(flatten)]
    pub shape: ObjectShape,
}

/// Either the object's own declared properties or a reference to the
/// canonical definition. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectShape {
    #[serde(rename = "properties")]
    Properties(IndexMap<String, Field>),
    #[serde(rename = "ref")]
    Ref(NodeKey),
}

/// A property of an object, keyed by its normalized name in [`ObjectShape::Properties`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// key exactly as it appeared in the input document
    #[serde(rename = "key")]
    pub original_key: String,
    #[serde(flatten)]
    pub ty: TypeNode,
}

/// `(name, nestLevel)`: the position where a shape was first seen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    pub name: String,
    pub depth: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeNode {
    pub fn kind(&self) -> Kind {
        match self {
            TypeNode::Null => Kind::Null,
            TypeNode::Any => Kind::Any,
            TypeNode::String => Kind::String,
            TypeNode::Decimal => Kind::Decimal,
            TypeNode::Integer => Kind::Integer,
            TypeNode::Boolean => Kind::Boolean,
            TypeNode::Date => Kind::Date,
            TypeNode::Array(_) => Kind::Array,
            TypeNode::Object(_) => Kind::Object,
        }
    }
    pub fn object(properties: IndexMap<String, Field>) -> Self {
        TypeNode::Object(ObjectNode {
            nest_level: None,
            original_key: None,
            shape: ObjectShape::Properties(properties),
        })
    }
    pub fn array_of(element: TypeNode) -> Self {
        TypeNode::Array(ArrayNode { items: ArrayItems::Homogeneous(Box::new(element)) })
    }
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            TypeNode::Object(obj) => Some(obj),
            _ => None,
        }
    }
    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            TypeNode::Array(arr) => Some(arr),
            _ => None,
        }
    }
    /// The reference carried by a reduced object or array.
    pub fn reference(&self) -> Option<&NodeKey> {
        match self {
            TypeNode::Object(ObjectNode { shape: ObjectShape::Ref(key), .. }) => Some(key),
            TypeNode::Array(ArrayNode { items: ArrayItems::Ref(key) }) => Some(key),
            _ => None,
        }
    }
}

impl ObjectNode {
    pub fn properties(&self) -> Option<&IndexMap<String, Field>> {
        match &self.shape {
            ObjectShape::Properties(props) => Some(props),
            ObjectShape::Ref(_) => None,
        }
    }
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Any => "any",
            Kind::String => "string",
            Kind::Decimal => "decimal",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Date => "date",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKey {
    pub const ROOT_NAME: &'static str = "root";

    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self { name: name.into(), depth }
    }
    pub fn root() -> Self {
        Self::new(Self::ROOT_NAME, 0)
    }
    pub fn is_root(&self) -> bool {
        self.depth == 0 && self.name == Self::ROOT_NAME
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.depth)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
