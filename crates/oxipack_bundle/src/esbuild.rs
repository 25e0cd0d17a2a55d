//! Invoking the esbuild executable.

use log::{debug, trace};
use oxipack_core::{CommandRunner, OxipackError, Result};
use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

pub const ESBUILD: &str = "esbuild";
pub const ESBUILD_INSTALL_HINT: &str = "npm i -D esbuild";

/// Global the bundle assigns its module namespace to
pub const GLOBAL_NAME: &str = "VendorBundle";

/// Browser-targeted, self-contained IIFE build of `entry` into `out`.
pub fn esbuild_args(entry: &Path, out: &Path, minify: bool) -> Vec<OsString> {
    let mut outfile = OsString::from("--outfile=");
    outfile.push(out);

    let mut args: Vec<OsString> = vec![
        entry.into(),
        "--bundle".into(),
        "--platform=browser".into(),
        "--format=iife".into(),
        format!("--global-name={GLOBAL_NAME}").into(),
        outfile,
    ];
    if minify {
        args.push("--minify".into());
    }
    args
}

pub struct Esbuild<'r, R: CommandRunner> {
    binary: PathBuf,
    runner: &'r R,
}

impl<'r, R: CommandRunner> Esbuild<'r, R> {
    pub fn new(binary: impl Into<PathBuf>, runner: &'r R) -> Self {
        Self { binary: binary.into(), runner }
    }

    pub fn build(&self, entry: &Path, out: &Path, minify: bool) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(esbuild_args(entry, out, minify));
        trace!("Invoking {:?}", cmd);

        let output = self.runner.output(&mut cmd).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                OxipackError::ToolMissing { tool: ESBUILD, install_hint: ESBUILD_INSTALL_HINT }
            }
            _ => OxipackError::Bundle(format!("could not run {}: {}", self.binary.display(), e)),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(OxipackError::Bundle(if message.is_empty() {
                format!("esbuild exited with {}", output.status)
            } else {
                message.to_string()
            }));
        }

        debug!("esbuild wrote {}", out.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_esbuild_args() {
        let entry = Path::new(".oxipack-entry-1.js");
        let args = strings(esbuild_args(entry, Path::new("out.js"), false));
        assert_eq!(
            args,
            vec![
                ".oxipack-entry-1.js",
                "--bundle",
                "--platform=browser",
                "--format=iife",
                "--global-name=VendorBundle",
                "--outfile=out.js",
            ]
        );
    }

    #[test]
    fn test_esbuild_args_minify() {
        let args = strings(esbuild_args(Path::new("e.js"), Path::new("dist/v.js"), true));
        assert_eq!(args.last().unwrap(), "--minify");
        assert!(args.contains(&"--outfile=dist/v.js".to_string()));
    }
}
