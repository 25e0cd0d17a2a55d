use log::{debug, info};
use oxipack_core::{CommandRunner, OxipackError, Result, SystemRunner, VersionLookup, locate_tool};
use std::{fs, path::Path};

use crate::{
    config::Config,
    esbuild::{ESBUILD, ESBUILD_INSTALL_HINT, Esbuild},
    manifest::write_entry,
    types::{BundleOutcome, PlannedPackage},
};

/// Pairs each requested package with its installed version, keeping input order.
pub fn plan_bundle(cfg: &Config, lookup: &VersionLookup) -> Vec<PlannedPackage> {
    cfg.packages
        .iter()
        .map(|name| PlannedPackage { name: name.clone(), version: lookup.version_of(name) })
        .collect()
}

pub fn run_bundle(cfg: &Config) -> Result<BundleOutcome> {
    let binary = locate_tool(ESBUILD, Path::new("."))
        .ok_or(OxipackError::ToolMissing { tool: ESBUILD, install_hint: ESBUILD_INSTALL_HINT })?;
    build_bundle(cfg, &Esbuild::new(binary, &SystemRunner), Path::new("."))
}

/// Writes the entry module into `entry_dir`, bundles it, and removes it again.
///
/// The entry lives in the project so the bundler resolves packages from the
/// project's `node_modules`.
pub fn build_bundle<R: CommandRunner>(
    cfg: &Config,
    esbuild: &Esbuild<'_, R>,
    entry_dir: &Path,
) -> Result<BundleOutcome> {
    if cfg.packages.is_empty() {
        return Err(OxipackError::Bundle("no packages to bundle".to_string()));
    }
    info!("Bundling {} packages into {}", cfg.packages.len(), cfg.out.display());

    let entry = write_entry(entry_dir, &cfg.packages)?;
    let built = esbuild.build(entry.path(), &cfg.out, cfg.minify);

    let entry_path = entry.path().to_path_buf();
    if let Err(e) = entry.close() {
        debug!("Failed to remove entry {}: {}", entry_path.display(), e);
    }
    built?;

    let bytes = fs::metadata(&cfg.out).map_err(|e| OxipackError::io(&cfg.out, e))?.len();
    Ok(BundleOutcome { out: cfg.out.clone(), bytes, minified: cfg.minify })
}
