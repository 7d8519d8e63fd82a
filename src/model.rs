//! The artifact handed to emitters: the reduced schema tree plus the
//! reference map.
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::Options;
use crate::ir::{NodeKey, TypeNode};
use crate::naming;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    pub schema: TypeNode,
    pub refs: RefMap,
}

/// Superseded key → canonical key. Kept compressed: no value is ever itself a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RefMap(IndexMap<NodeKey, NodeKey>);

impl RefMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `key` to the end of its chain. A key with no redirection is its
    /// own canonical key.
    pub fn resolve<'a>(&'a self, key: &'a NodeKey) -> &'a NodeKey {
        let mut current = key;
        // bounded by the map size so a malformed map cannot spin forever
        for _ in 0..=self.0.len() {
            match self.0.get(current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        current
    }

    /// Record `from → to`, where `to` is already canonical, and repoint every
    /// entry that targeted `from` so no two-hop chain survives.
    ///
    /// An existing redirection is never replaced: returns `false` when `from`
    /// already points at a different key.
    pub(crate) fn redirect(&mut self, from: NodeKey, to: NodeKey) -> bool {
        if let Some(existing) = self.0.get(&from) {
            return *existing == to;
        }
        for target in self.0.values_mut() {
            if *target == from {
                *target = to.clone();
            }
        }
        self.0.insert(from, to);
        true
    }

    pub fn get(&self, key: &NodeKey) -> Option<&NodeKey> {
        self.0.get(key)
    }
    pub fn contains_key(&self, key: &NodeKey) -> bool {
        self.0.contains_key(key)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey)> {
        self.0.iter()
    }
}

impl Model {
    /// Declared type name behind a reference, using the same naming rules as
    /// the definition site. The root key maps to the configured root name.
    pub fn type_name_of(&self, key: &NodeKey, options: &Options) -> String {
        let canonical = self.refs.resolve(key);
        if canonical.is_root() {
            naming::type_name(&options.root_name)
        } else {
            naming::type_name(&canonical.name)
        }
    }
}
