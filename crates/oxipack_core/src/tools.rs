//! Locating and running the external tools oxipack delegates to.

use log::{debug, trace};
use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Output},
};

/// Runs a prepared command and captures its output.
///
/// The seam lets formatter and bundler orchestration be tested without
/// node tooling installed.
pub trait CommandRunner {
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        trace!("Running {:?}", cmd);
        cmd.output()
    }
}

/// Builds an [`ExitStatus`] with the given exit code, for fake runners in tests.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an [`ExitStatus`] with the given exit code, for fake runners in tests.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Finds an executable, preferring the project-local `node_modules/.bin`
/// over whatever is on `PATH`.
pub fn locate_tool(binary: &str, project_root: &Path) -> Option<PathBuf> {
    let bin_dir = project_root.join("node_modules").join(".bin");
    let local_names = if cfg!(windows) {
        vec![format!("{binary}.cmd"), format!("{binary}.exe")]
    } else {
        vec![binary.to_string()]
    };
    for name in local_names {
        let candidate = bin_dir.join(name);
        if candidate.is_file() {
            debug!("Using project-local {}: {}", binary, candidate.display());
            return Some(candidate);
        }
    }

    match which::which(binary) {
        Ok(path) => {
            debug!("Using {} from PATH: {}", binary, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("{} not found: {}", binary, e);
            None
        }
    }
}
