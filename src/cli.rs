//! Minimal CLI: infer → (schema | java | typescript)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::codegen::{java::JavaEmitter, typescript::TypeScriptEmitter, Emitter};
use crate::config::{Options, Serializer};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a data model from an example JSON document and emit model classes
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the reduced model (schema tree + refs) as JSON
    Schema(SchemaOut),
    /// infer and emit Java classes, one file per class
    Java(JavaOut),
    /// infer and emit TypeScript interfaces, one file per interface
    Typescript(TypeScriptOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// input JSON document, or '-' for stdin
    #[arg(long, short, default_value = "input.txt")]
    input: String,

    /// name of the top-level type
    #[arg(long, env = "SP_ROOT_NAME", default_value = "Root")]
    root_name: String,

    /// keep every object's own definition instead of collapsing duplicates
    #[arg(long, env = "SP_DISABLE_REDUCE", default_value_t = false)]
    disable_reduce: bool,

    /// print progress logs to stderr
    #[arg(long, env = "SP_LOG", default_value_t = false)]
    log: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JavaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// field annotations: jackson, gson or none
    #[arg(long, env = "SP_SERIALIZER", default_value = "jackson")]
    serializer: Serializer,

    /// output directory, cleared before writing
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct TypeScriptOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory, cleared before writing
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn options(&self) -> Options {
        Options::default()
            .with_root_name(self.root_name.clone())
            .with_disable_reduce(self.disable_reduce)
    }

    fn load_model(&self) -> Result<crate::Model> {
        let source = read_source(&self.input)?;
        let model = crate::generate_model_from_str(&source, &self.options())
            .with_context(|| format!("failed to infer a model from {}", self.input))?;
        Ok(model)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Whether the selected subcommand asked for logs.
    pub fn log_enabled(&self) -> bool {
        match &self.cmd {
            Command::Schema(target) => target.input_settings.log,
            Command::Java(target) => target.input_settings.log,
            Command::Typescript(target) => target.input_settings.log,
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let model = target.input_settings.load_model()?;
                let schema_src = serde_json::to_string_pretty(&model)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &schema_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{schema_src}");
                }
            }
            Command::Java(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let emitter = JavaEmitter::new(target.serializer);
                emit_to_dir(&emitter, &target.input_settings, &target.out)?;
            }
            Command::Typescript(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                emit_to_dir(&TypeScriptEmitter, &target.input_settings, &target.out)?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn emit_to_dir(emitter: &dyn Emitter, settings: &InputSettings, out: &Path) -> Result<()> {
    let model = settings.load_model()?;
    let declarations = emitter.emit(&model, &settings.options());
    info!(language = %emitter.language(), declarations = declarations.len(), "emitted");

    crate::output::stage(out)?;
    let written = crate::output::write_declarations(out, &declarations)?;
    for path in &written {
        eprintln!("{} {}", "wrote".green().bold(), path.display());
    }
    Ok(())
}

fn read_source(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read JSON from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read input file {input}"))
}
