//! Java emitter: one `public class` per declaration, private fields with
//! serialization annotations, then getter/setter pairs.
use std::fmt::Write;

use crate::config::{Options, Serializer};
use crate::ir::{ArrayItems, TypeNode};
use crate::model::Model;
use crate::naming;

use super::{collect_classes, object_type_name, ClassDef, Declaration, Emitter, Language};

#[derive(Debug, Clone, Default)]
pub struct JavaEmitter {
    pub serializer: Serializer,
}

/// Imports a class turned out to need while rendering its fields.
#[derive(Debug, Default)]
struct Imports {
    list: bool,
    date: bool,
}

impl JavaEmitter {
    pub fn new(serializer: Serializer) -> Self {
        Self { serializer }
    }

    fn render_class(&self, model: &Model, class: &ClassDef<'_>, options: &Options) -> String {
        let mut imports = Imports::default();
        let fields: Vec<(&str, &str, String)> = class
            .properties
            .iter()
            .map(|(prop, field)| {
                let ty = self.render_type(model, &field.ty, prop, options, &mut imports);
                (prop.as_str(), field.original_key.as_str(), ty)
            })
            .collect();

        let mut header = Vec::new();
        if imports.date {
            header.push("import java.util.Date;".to_string());
        }
        if imports.list {
            header.push("import java.util.List;".to_string());
        }
        if let Some(import) = self.annotation_import() {
            if !fields.is_empty() {
                header.push(format!("import {import};"));
            }
        }

        let mut src = String::new();
        for line in &header {
            let _ = writeln!(src, "{line}");
        }
        if !header.is_empty() {
            src.push('\n');
        }
        let _ = writeln!(src, "public class {} {{", class.name);
        for (name, original_key, ty) in &fields {
            if let Some(annotation) = self.annotation(original_key) {
                let _ = writeln!(src, "    {annotation}");
            }
            let _ = writeln!(src, "    private {ty} {name};");
        }
        for (name, _, ty) in &fields {
            let accessor = naming::capitalize(name);
            src.push('\n');
            let _ = writeln!(src, "    public {ty} get{accessor}() {{");
            let _ = writeln!(src, "        return {name};");
            let _ = writeln!(src, "    }}");
            src.push('\n');
            let _ = writeln!(src, "    public void set{accessor}({ty} {name}) {{");
            let _ = writeln!(src, "        this.{name} = {name};");
            let _ = writeln!(src, "    }}");
        }
        src.push_str("}\n");
        src
    }

    fn render_type(&self, model: &Model, ty: &TypeNode, name: &str, options: &Options, imports: &mut Imports) -> String {
        match ty {
            TypeNode::String => "String".to_string(),
            TypeNode::Decimal => "Double".to_string(),
            TypeNode::Integer => "Integer".to_string(),
            TypeNode::Boolean => "Boolean".to_string(),
            TypeNode::Date => {
                imports.date = true;
                "Date".to_string()
            }
            TypeNode::Null | TypeNode::Any => "Object".to_string(),
            TypeNode::Object(obj) => object_type_name(model, obj, name, options),
            TypeNode::Array(arr) => {
                imports.list = true;
                let element = match &arr.items {
                    ArrayItems::Homogeneous(el) => {
                        self.render_type(model, el, &naming::singularize(name), options, imports)
                    }
                    ArrayItems::Heterogeneous(_) => "Object".to_string(),
                    ArrayItems::Ref(key) => model.type_name_of(key, options),
                };
                format!("List<{element}>")
            }
        }
    }

    fn annotation_import(&self) -> Option<&'static str> {
        match self.serializer {
            Serializer::Jackson => Some("com.fasterxml.jackson.annotation.JsonProperty"),
            Serializer::Gson => Some("com.google.gson.annotations.SerializedName"),
            Serializer::None => None,
        }
    }

    fn annotation(&self, original_key: &str) -> Option<String> {
        let key = escape_java(original_key);
        match self.serializer {
            Serializer::Jackson => Some(format!("@JsonProperty(\"{key}\")")),
            Serializer::Gson => Some(format!("@SerializedName(\"{key}\")")),
            Serializer::None => None,
        }
    }
}

impl Emitter for JavaEmitter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn emit(&self, model: &Model, options: &Options) -> Vec<Declaration> {
        collect_classes(model, options)
            .iter()
            .map(|class| {
                let source = self.render_class(model, class, options);
                Declaration::new(class.name.clone(), Language::Java, source)
            })
            .collect()
    }
}

fn escape_java(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
