//! Output staging: one file per generated declaration.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::Declaration;
use crate::error::{Error, Result};

/// Remove `dir` if present and recreate it empty.
pub fn stage(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "clearing previous output");
        fs::remove_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Write each declaration to `dir/<file_name>`. Returns the written paths in
/// declaration order.
pub fn write_declarations(dir: &Path, declarations: &[Declaration]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(declarations.len());
    for decl in declarations {
        let path = dir.join(&decl.file_name);
        fs::write(&path, &decl.source).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }
    info!(files = written.len(), dir = %dir.display(), "wrote declarations");
    Ok(written)
}
