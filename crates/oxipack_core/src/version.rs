use log::{debug, trace};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::{MODULE_SEARCH_PATH_ENV, UNKNOWN_VERSION};

/// npm's maximum package name length
const MAX_NAME_LEN: usize = 214;

/// Lower-cased prefixes of common package families accepted even when the
/// name does not have a regular npm shape.
const KNOWN_NAME_PREFIXES: &[&str] =
    &["react", "vue", "angular", "jquery", "lodash", "moment", "d3", "rxjs"];

/// Lower-cased suffixes accepted for the same reason.
const KNOWN_NAME_SUFFIXES: &[&str] = &[".js", "-js", "js"];

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Best-effort lookup of installed package versions.
///
/// Candidates are checked in order and the first manifest that exists wins:
/// 1. `<root>/node_modules/<pkg>/package.json`
/// 2. `<root>/node_modules/@types/<pkg>/package.json`
/// 3. `<dir>/<pkg>/package.json` for each directory on the module search path
#[derive(Debug, Clone)]
pub struct VersionLookup {
    project_root: PathBuf,
    search_paths: Vec<PathBuf>,
}

impl VersionLookup {
    pub fn new(project_root: impl Into<PathBuf>, search_paths: Vec<PathBuf>) -> Self {
        Self { project_root: project_root.into(), search_paths }
    }

    /// Reads the module search path from `NODE_PATH`, split with the platform separator.
    pub fn from_env(project_root: impl Into<PathBuf>) -> Self {
        let search_paths: Vec<PathBuf> = env::var_os(MODULE_SEARCH_PATH_ENV)
            .map(|raw| env::split_paths(&raw).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        debug!("Module search path has {} entries", search_paths.len());
        Self::new(project_root, search_paths)
    }

    /// Manifest locations for `name`, in lookup order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let pkg = package_root(name);
        let node_modules = self.project_root.join("node_modules");

        let mut candidates = vec![
            node_modules.join(pkg).join("package.json"),
            node_modules.join("@types").join(types_package_name(pkg)).join("package.json"),
        ];
        candidates.extend(self.search_paths.iter().map(|dir| dir.join(pkg).join("package.json")));
        candidates
    }

    /// Returns the declared version of `name`, or `"unknown version"`.
    ///
    /// Never fails: implausible names, missing manifests, and unreadable or
    /// malformed manifests all degrade to the unknown marker.
    pub fn version_of(&self, name: &str) -> String {
        if !is_plausible_package_name(name) {
            trace!("Skipping version lookup for implausible name '{}'", name);
            return UNKNOWN_VERSION.to_string();
        }

        let Some(manifest) = self.candidates(name).into_iter().find(|p| p.is_file()) else {
            trace!("No manifest found for '{}'", name);
            return UNKNOWN_VERSION.to_string();
        };

        trace!("Reading version of '{}' from {}", name, manifest.display());
        read_version(&manifest).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }
}

fn read_version(manifest: &Path) -> Option<String> {
    let text = fs::read_to_string(manifest).ok()?;
    let parsed: PackageManifest = serde_json::from_str(&text).ok()?;
    parsed.version
}

/// Strips deep-import paths: `lodash/debounce` -> `lodash`, `@scope/pkg/sub` -> `@scope/pkg`.
pub fn package_root(name: &str) -> &str {
    let segments = if name.starts_with('@') { 2 } else { 1 };
    match name.match_indices('/').nth(segments - 1) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// DefinitelyTyped naming: `@scope/pkg` is published as `@types/scope__pkg`.
fn types_package_name(pkg: &str) -> String {
    match pkg.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => pkg.to_string(),
    }
}

/// Heuristic filter for names that came out of noisy regex detection.
pub fn is_plausible_package_name(name: &str) -> bool {
    let pkg = package_root(name);
    if pkg.is_empty() || pkg.len() > MAX_NAME_LEN {
        return false;
    }
    if pkg.chars().any(char::is_whitespace) {
        return false;
    }
    if !pkg.chars().any(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    if is_regular_name(pkg) {
        return true;
    }
    if let Some(scoped) = pkg.strip_prefix('@')
        && let Some((scope, bare)) = scoped.split_once('/')
        && is_regular_name(scope)
        && is_regular_name(bare)
    {
        return true;
    }

    let lower = pkg.to_lowercase();
    KNOWN_NAME_PREFIXES.iter().any(|p| lower.starts_with(p))
        || KNOWN_NAME_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

fn is_regular_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '~' | '-')
    })
}
