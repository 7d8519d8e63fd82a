//! Structural deduplication of the analyzed schema tree.
//!
//! Two depth-first, pre-order passes over the analyzer output:
//!
//! 1. **Seeding** labels every object (and every homogeneous array element)
//!    with its [`NodeKey`] and registers its [`Signature`] in the seen pool.
//!    First registration for a key wins.
//! 2. **Reduction** rebuilds the tree in the same order. An object whose
//!    signature equals one registered *earlier* under a different name becomes
//!    a reference to that earlier (canonical) definition; otherwise reduction
//!    continues into its fields. Pool entries registered by a collapsed object
//!    or anything below it are retired, so a reference always lands on a node
//!    that kept its properties.
//!
//! Both passes count objects in the same pre-order, so the count doubles as
//! the position of a node in either walk.
//!
//! The input tree is never touched: reduction produces a new tree, so the
//! analyzer result stays available for inspection.
//!
//! Only JSON input reaches this module, and JSON cannot express reference
//! cycles, so both walks terminate.
use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ir::{ArrayItems, ArrayNode, Field, NodeKey, ObjectNode, ObjectShape, TypeNode};
use crate::model::{Model, RefMap};
use crate::naming;
use crate::signature::{self, Signature};

/// Signatures keyed by the position where each shape was first seen, in
/// registration order. Lives for a single reduction only.
#[derive(Debug, Default)]
struct SeenPool {
    entries: IndexMap<NodeKey, SeenShape>,
    visited: usize,
}

#[derive(Debug)]
struct SeenShape {
    signature: Signature,
    /// pre-order position of the registering object
    ordinal: usize,
    /// set once the registering object was collapsed or dropped with a collapsed parent
    retired: bool,
}

struct Reducer {
    pool: SeenPool,
    refs: RefMap,
    visited: usize,
    /// keys already declared by an object that kept its properties
    defined: HashSet<NodeKey>,
}

/// Deduplicate an analyzed document. Fails only when the root is not an object.
pub fn reduce(schema: &TypeNode) -> Result<Model> {
    ensure_object_root(schema)?;

    let mut pool = SeenPool::default();
    pool.seed(schema, NodeKey::ROOT_NAME, 0);
    debug!(shapes = pool.entries.len(), objects = pool.visited, "seeded shape pool");

    let mut reducer = Reducer { pool, refs: RefMap::new(), visited: 0, defined: HashSet::new() };
    let schema = reducer.reduce_node(schema, NodeKey::ROOT_NAME, 0);
    debug!(references = reducer.refs.len(), "reduced schema");

    Ok(Model { schema, refs: reducer.refs })
}

/// Wrap an analyzed document without deduplication.
pub fn passthrough(schema: TypeNode) -> Result<Model> {
    ensure_object_root(&schema)?;
    Ok(Model { schema, refs: RefMap::new() })
}

fn ensure_object_root(schema: &TypeNode) -> Result<()> {
    match schema {
        TypeNode::Object(_) => Ok(()),
        other => Err(Error::InvalidRoot { found: other.kind().as_str() }),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PASS 1: SEEDING
// ————————————————————————————————————————————————————————————————————————————

impl SeenPool {
    fn seed(&mut self, node: &TypeNode, name: &str, depth: usize) {
        match node {
            TypeNode::Object(obj) => {
                let ordinal = self.visited;
                self.visited += 1;
                let key = NodeKey::new(name, depth);
                if !self.entries.contains_key(&key) {
                    let sig = signature::encode_object(obj);
                    trace!(%key, ordinal, signature = %signature::render(&sig), "seen");
                    self.entries.insert(key, SeenShape { signature: sig, ordinal, retired: false });
                }
                if let ObjectShape::Properties(props) = &obj.shape {
                    for (prop, field) in props {
                        self.seed(&field.ty, prop, depth + 1);
                    }
                }
            }
            TypeNode::Array(ArrayNode { items: ArrayItems::Homogeneous(el) }) => {
                self.seed(el, &naming::singularize(name), depth + 1);
            }
            _ => {}
        }
    }

    /// First live entry registered before position `ordinal` whose signature
    /// equals `sig`, skipping entries that share the node's own name.
    fn find_earlier_match(&self, key: &NodeKey, sig: &Signature, ordinal: usize) -> Option<&NodeKey> {
        self.entries
            .iter()
            .take_while(|(_, seen)| seen.ordinal < ordinal)
            .find(|(candidate, seen)| !seen.retired && candidate.name != key.name && seen.signature == *sig)
            .map(|(candidate, _)| candidate)
    }

    fn retire(&mut self, positions: Range<usize>) {
        for (key, seen) in self.entries.iter_mut() {
            if positions.contains(&seen.ordinal) && !seen.retired {
                trace!(%key, "retired");
                seen.retired = true;
            }
        }
    }
}

/// Objects the seeding walk visits inside `node`, `node` included.
fn objects_in(node: &TypeNode) -> usize {
    match node {
        TypeNode::Object(obj) => 1 + objects_below(obj),
        TypeNode::Array(ArrayNode { items: ArrayItems::Homogeneous(el) }) => objects_in(el),
        _ => 0,
    }
}

fn objects_below(obj: &ObjectNode) -> usize {
    obj.properties().map_or(0, |props| props.values().map(|field| objects_in(&field.ty)).sum())
}

// ————————————————————————————————————————————————————————————————————————————
// PASS 2: REDUCTION
// ————————————————————————————————————————————————————————————————————————————

impl Reducer {
    fn reduce_node(&mut self, node: &TypeNode, name: &str, depth: usize) -> TypeNode {
        match node {
            TypeNode::Object(obj) => TypeNode::Object(self.reduce_object(obj, name, depth)),
            TypeNode::Array(arr) => TypeNode::Array(self.reduce_array(arr, name, depth)),
            primitive => primitive.clone(),
        }
    }

    fn reduce_object(&mut self, obj: &ObjectNode, name: &str, depth: usize) -> ObjectNode {
        let key = NodeKey::new(name, depth);
        let ordinal = self.visited;
        self.visited += 1;
        let props = match &obj.shape {
            ObjectShape::Properties(props) => props,
            ObjectShape::Ref(target) => {
                return ObjectNode { nest_level: Some(depth), shape: ObjectShape::Ref(target.clone()), ..obj.clone() };
            }
        };

        if let Some(canonical) = self.canonical_for(&key, obj, ordinal) {
            // the subtree is dropped, skip its positions and retire what it registered
            self.visited += objects_below(obj);
            self.pool.retire(ordinal..self.visited);
            return ObjectNode {
                nest_level: Some(depth),
                original_key: obj.original_key.clone(),
                shape: ObjectShape::Ref(canonical),
            };
        }
        self.defined.insert(key);

        let properties = props
            .iter()
            .map(|(prop, field)| {
                let ty = self.reduce_node(&field.ty, prop, depth + 1);
                (prop.clone(), Field { original_key: field.original_key.clone(), ty })
            })
            .collect();
        ObjectNode {
            nest_level: Some(depth),
            original_key: obj.original_key.clone(),
            shape: ObjectShape::Properties(properties),
        }
    }

    fn reduce_array(&mut self, arr: &ArrayNode, name: &str, depth: usize) -> ArrayNode {
        let items = match &arr.items {
            ArrayItems::Homogeneous(el) => {
                match self.reduce_node(el, &naming::singularize(name), depth + 1) {
                    // a reduced element makes the whole array an alias
                    TypeNode::Object(ObjectNode { shape: ObjectShape::Ref(key), .. }) => ArrayItems::Ref(key),
                    other => ArrayItems::Homogeneous(Box::new(other)),
                }
            }
            // mixed arrays are not seeded, their members are only levelled
            ArrayItems::Heterogeneous(members) => {
                ArrayItems::Heterogeneous(members.iter().map(|member| with_nest_levels(member, depth + 1)).collect())
            }
            ArrayItems::Ref(key) => ArrayItems::Ref(key.clone()),
        };
        ArrayNode { items }
    }

    /// Look for an earlier structurally equal shape; on a match record the
    /// redirection and return the canonical key.
    ///
    /// A key that an earlier object already declares, or that already
    /// redirects somewhere else, is never collapsed: the reference map holds
    /// one target per key.
    fn canonical_for(&mut self, key: &NodeKey, obj: &ObjectNode, ordinal: usize) -> Option<NodeKey> {
        if self.defined.contains(key) {
            return None;
        }
        let sig = signature::encode_object(obj);
        let target = self.pool.find_earlier_match(key, &sig, ordinal)?.clone();
        let canonical = self.refs.resolve(&target).clone();
        if canonical == *key {
            return None;
        }
        if !self.refs.redirect(key.clone(), canonical.clone()) {
            trace!(%key, %canonical, "key already redirects elsewhere, keeping definition");
            return None;
        }
        debug!(%key, %canonical, signature = %signature::render(&sig), "collapsing duplicate shape");
        Some(canonical)
    }
}

/// Copy of `node` with every object tagged with its depth. Used for subtrees
/// that are kept verbatim.
fn with_nest_levels(node: &TypeNode, depth: usize) -> TypeNode {
    match node {
        TypeNode::Object(obj) => {
            let shape = match &obj.shape {
                ObjectShape::Properties(props) => ObjectShape::Properties(
                    props
                        .iter()
                        .map(|(prop, field)| {
                            let ty = with_nest_levels(&field.ty, depth + 1);
                            (prop.clone(), Field { original_key: field.original_key.clone(), ty })
                        })
                        .collect(),
                ),
                ObjectShape::Ref(key) => ObjectShape::Ref(key.clone()),
            };
            TypeNode::Object(ObjectNode { nest_level: Some(depth), original_key: obj.original_key.clone(), shape })
        }
        TypeNode::Array(arr) => {
            let items = match &arr.items {
                ArrayItems::Homogeneous(el) => ArrayItems::Homogeneous(Box::new(with_nest_levels(el, depth + 1))),
                ArrayItems::Heterogeneous(members) => {
                    ArrayItems::Heterogeneous(members.iter().map(|member| with_nest_levels(member, depth + 1)).collect())
                }
                ArrayItems::Ref(key) => ArrayItems::Ref(key.clone()),
            };
            TypeNode::Array(ArrayNode { items })
        }
        other => other.clone(),
    }
}

// ------------------------------- Tests ------------------------------------ //
