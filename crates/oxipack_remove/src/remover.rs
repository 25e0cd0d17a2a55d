use log::{debug, info, warn};
use oxipack_core::{Backup, MatchMode, OxipackError, Result, read_source};
use std::{fs, path::Path};

use crate::{
    config::Config,
    fallback::{comment_out_references, strip_references_aggressively},
    structural::remove_structurally,
    types::{RemovalStrategy, RemoveOutcome},
};

pub fn run_remove(cfg: &Config) -> Result<RemoveOutcome> {
    info!("Removing '{}' from {}", cfg.package, cfg.file.display());
    let source = read_source(&cfg.file)?;

    if cfg.force { remove_forced(cfg, &source) } else { remove_exact(cfg, &source) }
}

fn remove_exact(cfg: &Config, source: &str) -> Result<RemoveOutcome> {
    let Some((code, count)) =
        remove_structurally(&cfg.file, source, &cfg.package, MatchMode::Exact)?
    else {
        return Ok(RemoveOutcome::NotFound);
    };

    write_file(&cfg.file, &code)?;
    Ok(removed(RemovalStrategy::Structural, count, source, &code))
}

/// Tries each strategy against a backup of the file. The file ends up either
/// rewritten or byte-identical to what it was before the call.
fn remove_forced(cfg: &Config, source: &str) -> Result<RemoveOutcome> {
    let backup = Backup::create(&cfg.file)?;

    let Some((strategy, text, count)) = first_rewrite(cfg, source) else {
        warn!("No strategy matched '{}', restoring {}", cfg.package, cfg.file.display());
        backup.restore()?;
        return Ok(RemoveOutcome::NotFound);
    };

    if let Err(e) = write_file(&cfg.file, &text) {
        warn!("Writing {} failed, restoring from {}", cfg.file.display(), backup.path().display());
        backup.restore()?;
        return Err(e);
    }

    Ok(removed(strategy, count, source, &text))
}

fn first_rewrite(cfg: &Config, source: &str) -> Option<(RemovalStrategy, String, usize)> {
    match remove_structurally(&cfg.file, source, &cfg.package, MatchMode::Substring) {
        Ok(Some((code, count))) => return Some((RemovalStrategy::Structural, code, count)),
        Ok(None) => {}
        Err(e) => warn!("Structural removal failed, trying pattern rewrites: {}", e),
    }

    let (text, count) = comment_out_references(source, &cfg.package);
    if count > 0 {
        return Some((RemovalStrategy::CommentedOut, text, count));
    }

    if !cfg.aggressive {
        debug!("Conservative patterns found nothing and --aggressive is off");
        return None;
    }

    let (text, count) = strip_references_aggressively(source, &cfg.package);
    (count > 0).then_some((RemovalStrategy::Aggressive, text, count))
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| OxipackError::io(path, e))
}

fn removed(strategy: RemovalStrategy, count: usize, before: &str, after: &str) -> RemoveOutcome {
    RemoveOutcome::Removed { strategy, count, bytes_before: before.len(), bytes_after: after.len() }
}
