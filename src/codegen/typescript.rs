//! TypeScript emitter: one exported interface per declaration, importing the
//! sibling interfaces it references.
use std::fmt::Write;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Options;
use crate::ir::{ArrayItems, TypeNode};
use crate::model::Model;
use crate::naming;

use super::{collect_classes, object_type_name, ClassDef, Declaration, Emitter, Language};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    fn render_interface(&self, model: &Model, class: &ClassDef<'_>, options: &Options) -> String {
        let mut referenced = IndexSet::new();
        let members: Vec<(String, String)> = class
            .properties
            .iter()
            .map(|(prop, field)| (property_name(prop), self.render_type(model, &field.ty, prop, options, &mut referenced)))
            .collect();
        referenced.shift_remove(&class.name);

        let mut src = String::new();
        for name in &referenced {
            let _ = writeln!(src, "import {{ {name} }} from './{name}';");
        }
        if !referenced.is_empty() {
            src.push('\n');
        }
        let _ = writeln!(src, "export interface {} {{", class.name);
        for (name, ty) in &members {
            let _ = writeln!(src, "\t{name}: {ty};");
        }
        src.push_str("}\n");
        src
    }

    fn render_type(
        &self,
        model: &Model,
        ty: &TypeNode,
        name: &str,
        options: &Options,
        referenced: &mut IndexSet<String>,
    ) -> String {
        match ty {
            TypeNode::String => "string".to_string(),
            TypeNode::Decimal | TypeNode::Integer => "number".to_string(),
            TypeNode::Boolean => "boolean".to_string(),
            TypeNode::Date => "Date".to_string(),
            TypeNode::Null => "null".to_string(),
            TypeNode::Any => "any".to_string(),
            TypeNode::Object(obj) => {
                let type_name = object_type_name(model, obj, name, options);
                referenced.insert(type_name.clone());
                type_name
            }
            TypeNode::Array(arr) => {
                let element_name = naming::singularize(name);
                let element = match &arr.items {
                    ArrayItems::Homogeneous(el) => self.render_type(model, el, &element_name, options, referenced),
                    ArrayItems::Heterogeneous(els) => {
                        let arms: IndexSet<String> = els
                            .iter()
                            .map(|el| self.render_type(model, el, &element_name, options, referenced))
                            .collect();
                        arms.into_iter().collect::<Vec<_>>().join(" | ")
                    }
                    ArrayItems::Ref(key) => {
                        let type_name = model.type_name_of(key, options);
                        referenced.insert(type_name.clone());
                        type_name
                    }
                };
                format!("Array<{element}>")
            }
        }
    }
}

impl Emitter for TypeScriptEmitter {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn emit(&self, model: &Model, options: &Options) -> Vec<Declaration> {
        collect_classes(model, options)
            .iter()
            .map(|class| {
                let source = self.render_interface(model, class, options);
                Declaration::new(class.name.clone(), Language::TypeScript, source)
            })
            .collect()
    }
}

/// Property names that are not plain identifiers are quoted.
fn property_name(name: &str) -> String {
    if IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        serde_json::Value::from(name).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_model;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn emit(doc: serde_json::Value, opts: &Options) -> Vec<Declaration> {
        let model = generate_model(&doc, opts).unwrap();
        TypeScriptEmitter.emit(&model, opts)
    }

    #[test]
    fn interfaces_with_imports() {
        let decls = emit(
            json!({
                "id": 1,
                "tags": ["a", "b"],
                "owner": {"name": "x"},
                "friends": [{"name": "y"}]
            }),
            &Options::default(),
        );
        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[0].source,
            "import { Owner } from './Owner';\n\
             \n\
             export interface Root {\n\
             \tid: number;\n\
             \ttags: Array<string>;\n\
             \towner: Owner;\n\
             \tfriends: Array<Owner>;\n\
             }\n"
        );
        assert_eq!(decls[1].file_name, "Owner.ts");
        assert_eq!(decls[1].source, "export interface Owner {\n\tname: string;\n}\n");
    }

    #[test]
    fn unions_and_primitives() {
        let decls = emit(
            json!({"mixed": [1, 2.5, "a"], "when": "2024-01-01", "gone": null, "empty": [], "ok": true}),
            &Options::default(),
        );
        let src = &decls[0].source;
        assert!(src.contains("\tmixed: Array<number | string>;"));
        assert!(src.contains("\twhen: Date;"));
        assert!(src.contains("\tgone: null;"));
        assert!(src.contains("\tempty: Array<any>;"));
        assert!(src.contains("\tok: boolean;"));
    }

    #[test]
    fn root_name_is_configurable() {
        let opts = Options::default().with_root_name("node");
        let decls = emit(json!({"v": 1, "child": {"v": 2}}), &opts);
        let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Node", "Child"]);
        assert!(decls[0].source.starts_with("import { Child } from './Child';\n\nexport interface Node {"));
    }

    #[test]
    fn odd_keys_are_quoted() {
        assert_eq!(property_name("firstName"), "firstName");
        assert_eq!(property_name("1st"), "\"1st\"");
        assert_eq!(property_name("a b"), "\"a b\"");
    }
}
