//! End-to-end tests: JSON text → model → emitted declarations → files.

use json_model_gen::codegen::{java::JavaEmitter, typescript::TypeScriptEmitter, Emitter};
use json_model_gen::ir::{ArrayItems, NodeKey, ObjectNode, ObjectShape, TypeNode};
use json_model_gen::{generate_model, generate_model_from_str, inference, Error, Model, Options, Serializer};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

fn field<'a>(node: &'a TypeNode, name: &str) -> &'a TypeNode {
    &node.as_object().and_then(ObjectNode::properties).expect("properties")[name].ty
}

/// Every object/array below `node` together with the key it was reduced under.
fn walk<'a>(node: &'a TypeNode, name: &str, depth: usize, out: &mut Vec<(NodeKey, &'a TypeNode)>) {
    match node {
        TypeNode::Object(obj) => {
            out.push((NodeKey::new(name, depth), node));
            if let ObjectShape::Properties(props) = &obj.shape {
                for (prop, f) in props {
                    walk(&f.ty, prop, depth + 1, out);
                }
            }
        }
        TypeNode::Array(arr) => {
            let element = json_model_gen::naming::singularize(name);
            out.push((NodeKey::new(element.clone(), depth + 1), node));
            match &arr.items {
                ArrayItems::Homogeneous(el) => walk(el, &element, depth + 1, out),
                ArrayItems::Heterogeneous(els) => {
                    for el in els {
                        walk(el, &element, depth + 1, out);
                    }
                }
                ArrayItems::Ref(_) => {}
            }
        }
        _ => {}
    }
}

fn sample() -> Value {
    json!({
        "order_id": 1001,
        "placed_at": "2024-03-01T12:00:00Z",
        "total": 99.5,
        "customer": {"name": "Ada", "address": {"street": "Main", "city": "X"}},
        "line_items": [
            {"sku": "A", "qty": 1, "price": 10.5},
            {"sku": "B", "qty": 2, "price": 20.25}
        ],
        "shipments": [
            {"carrier": "ups", "to": {"street": "Side", "city": "Y"}}
        ],
        "billing_address": {"city": "Z", "street": "Back"},
        "notes": [],
        "flags": [true, "maybe"]
    })
}

// ============================================================================
// Model properties
// ============================================================================

#[test]
fn end_to_end_scenario() {
    let model = generate_model(
        &json!({"id": 1, "tags": ["a", "b"], "owner": {"name": "x"}, "friends": [{"name": "y"}]}),
        &Options::default(),
    )
    .unwrap();

    assert_eq!(field(&model.schema, "id"), &TypeNode::Integer);
    assert_eq!(field(&model.schema, "tags"), &TypeNode::array_of(TypeNode::String));
    let owner = field(&model.schema, "owner").as_object().unwrap();
    assert_eq!(owner.properties().unwrap()["name"].ty, TypeNode::String);
    assert_eq!(field(&model.schema, "friends").reference(), Some(&NodeKey::new("owner", 1)));

    let refs: Vec<(String, String)> = model.refs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    assert_eq!(refs, [("friend@2".to_string(), "owner@1".to_string())]);
}

#[test]
fn refs_are_compressed_and_never_self() {
    let model = generate_model(&sample(), &Options::default()).unwrap();
    assert!(!model.refs.is_empty());
    for (from, to) in model.refs.iter() {
        assert_ne!(from, to);
        assert!(!model.refs.contains_key(to));
    }
    let mut nodes = Vec::new();
    walk(&model.schema, NodeKey::ROOT_NAME, 0, &mut nodes);
    for (key, node) in nodes {
        if let Some(target) = node.reference() {
            assert_ne!(target, &key);
            assert!(!model.refs.contains_key(target), "{key} points at superseded {target}");
        }
    }
}

#[test]
fn every_reference_reaches_a_definition() {
    let documents = [
        sample(),
        // inner@3 only exists below the collapsed wrap.b
        json!({"x": {"inner": {"q": true}}, "a": {"inner": {"z": 1}}, "wrap": {"b": {"inner": {"z": 1}}}, "k": {"z": 1}}),
        json!({"x": {"v": 1}, "a": {"geo": {"v": 1}}, "b": {"geo": {"v": 1, "w": 2}}, "later": {"v": 1, "w": 2}}),
    ];
    for doc in &documents {
        let model = generate_model(doc, &Options::default()).unwrap();
        let mut nodes = Vec::new();
        walk(&model.schema, NodeKey::ROOT_NAME, 0, &mut nodes);
        let defined: Vec<NodeKey> = nodes
            .iter()
            .filter(|(_, n)| n.as_object().is_some_and(|o| o.properties().is_some()))
            .map(|(k, _)| k.clone())
            .collect();
        for (key, node) in &nodes {
            if let Some(target) = node.reference() {
                assert!(defined.contains(target), "{key} -> {target} has no definition in {doc}");
                assert_eq!(model.refs.get(key), Some(target), "{key} disagrees with the reference map");
            }
        }
    }
}

#[test]
fn address_shapes_collapse_to_the_first_one() {
    let model = generate_model(&sample(), &Options::default()).unwrap();
    let address = NodeKey::new("address", 2);
    let shipments = field(&model.schema, "shipments");
    let ArrayItems::Homogeneous(shipment) = &shipments.as_array().unwrap().items else {
        panic!("shipment keeps its own definition");
    };
    assert_eq!(field(shipment, "to").reference(), Some(&address));
    assert_eq!(field(&model.schema, "billingAddress").reference(), Some(&address));
}

#[test]
fn disable_reduce_returns_raw_analysis() {
    let doc = sample();
    let model = generate_model(&doc, &Options::default().with_disable_reduce(true)).unwrap();
    assert!(model.refs.is_empty());
    assert_eq!(model.schema, inference::analyze_root(&doc));
    let mut nodes = Vec::new();
    walk(&model.schema, NodeKey::ROOT_NAME, 0, &mut nodes);
    assert!(nodes.iter().all(|(_, n)| n.reference().is_none()));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let runs: Vec<String> = (0..4)
        .map(|_| serde_json::to_string(&generate_model(&sample(), &Options::default()).unwrap()).unwrap())
        .collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn fatal_inputs() {
    let err = generate_model_from_str("[1, 2]", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidRoot { found: "array" }));
    let err = generate_model_from_str("{\"a\": ", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
    let err = generate_model(&json!(1), &Options::default().with_disable_reduce(true)).unwrap_err();
    assert!(matches!(err, Error::InvalidRoot { found: "integer" }));
}

#[test]
fn model_serializes_with_refs() {
    let model: Model = generate_model_from_str(
        r#"{"owner": {"name": "x"}, "friends": [{"name": "y"}]}"#,
        &Options::default(),
    )
    .unwrap();
    let value = serde_json::to_value(&model).unwrap();
    assert_eq!(value["refs"], json!({"friend@2": "owner@1"}));
    assert_eq!(value["schema"]["properties"]["friends"]["ref"], json!("owner@1"));
    assert_eq!(value["schema"]["name"], json!("root"));
}

// ============================================================================
// Emitters
// ============================================================================

#[test]
fn java_declarations_for_sample() {
    let opts = Options::default().with_root_name("order");
    let model = generate_model(&sample(), &opts).unwrap();
    let decls = JavaEmitter::new(Serializer::Jackson).emit(&model, &opts);
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Order", "Customer", "Address", "LineItem", "Shipment"]);

    let order = &decls[0].source;
    assert!(order.contains("@JsonProperty(\"order_id\")\n    private Integer orderId;"));
    assert!(order.contains("private Date placedAt;"));
    assert!(order.contains("private List<LineItem> lineItems;"));
    assert!(order.contains("private Address billingAddress;"));
    assert!(order.contains("private List<Object> notes;"));
    assert!(order.contains("private List<Object> flags;"));
    assert!(decls[4].source.contains("private Address to;"));
}

#[test]
fn typescript_declarations_for_sample() {
    let opts = Options::default();
    let model = generate_model(&sample(), &opts).unwrap();
    let decls = TypeScriptEmitter.emit(&model, &opts);
    let shipment = decls.iter().find(|d| d.name == "Shipment").unwrap();
    assert_eq!(
        shipment.source,
        "import { Address } from './Address';\n\nexport interface Shipment {\n\tcarrier: string;\n\tto: Address;\n}\n"
    );
    let root = &decls[0].source;
    assert!(root.starts_with(
        "import { Customer } from './Customer';\nimport { LineItem } from './LineItem';\nimport { Shipment } from './Shipment';\nimport { Address } from './Address';\n"
    ));
    assert!(root.contains("\tflags: Array<boolean | string>;"));
}

#[test]
fn staged_output_has_one_file_per_declaration() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("output");
    let opts = Options::default();
    let model = generate_model(&sample(), &opts).unwrap();
    let decls = TypeScriptEmitter.emit(&model, &opts);

    json_model_gen::output::stage(&out).unwrap();
    let written = json_model_gen::output::write_declarations(&out, &decls).unwrap();
    assert_eq!(written.len(), decls.len());
    let mut files: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, ["Address.ts", "Customer.ts", "LineItem.ts", "Root.ts", "Shipment.ts"]);
}
