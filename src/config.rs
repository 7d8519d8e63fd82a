//! Options consumed by the engine and the emitters.
//!
//! Built once (by the CLI or a library caller) and passed down by reference.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name of the top-level declaration.
    pub root_name: String,
    /// Skip deduplication and keep every shape's own definition.
    pub disable_reduce: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { root_name: "Root".to_string(), disable_reduce: false }
    }
}

impl Options {
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
    pub fn with_disable_reduce(mut self, disable_reduce: bool) -> Self {
        self.disable_reduce = disable_reduce;
        self
    }
}

/// Serialization annotations put on generated Java fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Serializer {
    #[default]
    Jackson,
    Gson,
    None,
}

impl FromStr for Serializer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jackson" => Ok(Serializer::Jackson),
            "gson" => Ok(Serializer::Gson),
            "none" | "" => Ok(Serializer::None),
            _ => Err(Error::UnknownSerializer(s.to_string())),
        }
    }
}

impl fmt::Display for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Serializer::Jackson => "jackson",
            Serializer::Gson => "gson",
            Serializer::None => "none",
        })
    }
}
