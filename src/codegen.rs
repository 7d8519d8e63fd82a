//! Code emitters: a [`Model`] in, one source declaration per object shape out.
//!
//! Every emitter shares the same discovery walk ([`collect_classes`]) and the
//! same naming rules, so a reference renders as exactly the name its canonical
//! definition was declared under.
pub mod java;
pub mod typescript;

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::config::Options;
use crate::ir::{ArrayItems, Field, ObjectNode, ObjectShape, TypeNode};
use crate::model::Model;
use crate::naming;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Java,
    TypeScript,
}

/// One generated type, ready to be written to its own file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub file_name: String,
    pub source: String,
}

pub trait Emitter {
    fn language(&self) -> Language;
    fn emit(&self, model: &Model, options: &Options) -> Vec<Declaration>;
}

/// An object shape that gets its own declaration.
#[derive(Debug)]
pub(crate) struct ClassDef<'a> {
    pub name: String,
    pub properties: &'a IndexMap<String, Field>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Language {
    pub fn extension(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::TypeScript => "ts",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Java => "java",
            Language::TypeScript => "typescript",
        })
    }
}

impl Declaration {
    pub(crate) fn new(name: String, language: Language, source: String) -> Self {
        let file_name = format!("{name}.{}", language.extension());
        Self { name, file_name, source }
    }
}

/// Pre-order walk from the root collecting every object that declares its own
/// properties. First declaration of a name wins; aliases are never declared.
pub(crate) fn collect_classes<'a>(model: &'a Model, options: &Options) -> Vec<ClassDef<'a>> {
    struct Walk<'a> {
        seen: HashSet<String>,
        out: Vec<ClassDef<'a>>,
    }

    impl<'a> Walk<'a> {
        fn visit(&mut self, node: &'a TypeNode, type_name: String) {
            match node {
                TypeNode::Object(ObjectNode { shape: ObjectShape::Properties(props), .. }) => {
                    if !self.seen.insert(type_name.clone()) {
                        return;
                    }
                    self.out.push(ClassDef { name: type_name, properties: props });
                    for (prop, field) in props {
                        self.visit(&field.ty, naming::type_name(prop));
                    }
                }
                TypeNode::Array(arr) => {
                    let element_name = naming::type_name(&naming::singularize(&type_name));
                    match &arr.items {
                        ArrayItems::Homogeneous(el) => self.visit(el, element_name),
                        ArrayItems::Heterogeneous(els) => {
                            for el in els {
                                self.visit(el, element_name.clone());
                            }
                        }
                        ArrayItems::Ref(_) => {}
                    }
                }
                _ => {}
            }
        }
    }

    let mut walk = Walk { seen: HashSet::new(), out: Vec::new() };
    walk.visit(&model.schema, naming::type_name(&options.root_name));
    walk.out
}

/// Type name an object node renders as at a use site named `name`.
pub(crate) fn object_type_name(model: &Model, obj: &ObjectNode, name: &str, options: &Options) -> String {
    match &obj.shape {
        ObjectShape::Ref(key) => model.type_name_of(key, options),
        ObjectShape::Properties(_) => naming::type_name(name),
    }
}
