//! Infer a data model from an example JSON document and emit it as source
//! declarations, with repeated sub-structures collapsed into shared types.
//!
//! ```
//! use json_model_gen::{generate_model, Options};
//! use serde_json::json;
//!
//! let doc = json!({"owner": {"name": "x"}, "friends": [{"name": "y"}]});
//! let model = generate_model(&doc, &Options::default()).unwrap();
//! assert_eq!(model.refs.len(), 1);
//! ```
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod inference;
pub mod ir;
pub mod model;
pub mod naming;
pub mod output;
pub mod reduce;
pub mod signature;

use serde_json::Value;
use tracing::info;

pub use crate::config::{Options, Serializer};
pub use crate::error::{Error, Result};
pub use crate::model::{Model, RefMap};

/// Analyze `doc` and, unless disabled, deduplicate its shapes.
pub fn generate_model(doc: &Value, options: &Options) -> Result<Model> {
    let analyzed = inference::analyze_root(doc);
    let model = if options.disable_reduce {
        reduce::passthrough(analyzed)?
    } else {
        reduce::reduce(&analyzed)?
    };
    info!(references = model.refs.len(), reduced = !options.disable_reduce, "model ready");
    Ok(model)
}

/// Parse JSON text, then [`generate_model`].
pub fn generate_model_from_str(src: &str, options: &Options) -> Result<Model> {
    let doc: Value = serde_json::from_str(src)?;
    generate_model(&doc, options)
}
