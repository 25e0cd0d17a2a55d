//! The temporary entry module handed to the bundler.

use log::debug;
use oxipack_core::{OxipackError, Result};
use std::{io::Write, path::Path};
use tempfile::{Builder, NamedTempFile};

const ENTRY_PREFIX: &str = ".oxipack-entry-";

/// One side-effect import per package, in the given order.
pub fn entry_source(packages: &[String]) -> String {
    packages.iter().map(|name| format!("import '{}';\n", escape(name))).collect()
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Writes the entry module into `dir`. The file is deleted when the handle drops.
pub fn write_entry(dir: &Path, packages: &[String]) -> Result<NamedTempFile> {
    let mut entry = Builder::new()
        .prefix(ENTRY_PREFIX)
        .suffix(".js")
        .tempfile_in(dir)
        .map_err(|e| OxipackError::io(dir, e))?;

    let written = entry.write_all(entry_source(packages).as_bytes());
    if let Err(e) = written.and_then(|()| entry.flush()) {
        return Err(OxipackError::io(entry.path(), e));
    }

    debug!("Wrote bundle entry {}", entry.path().display());
    Ok(entry)
}
