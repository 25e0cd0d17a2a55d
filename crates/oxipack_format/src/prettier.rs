//! Invoking the prettier executable.

use log::{debug, trace};
use oxipack_core::{CommandRunner, OxipackError, Result};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

use crate::types::StyleSource;

pub const PRETTIER: &str = "prettier";
pub const PRETTIER_INSTALL_HINT: &str = "npm i -D prettier";

/// Parser forced on the retry after a dialect-specific attempt fails
pub const FALLBACK_PARSER: &str = "babel";

/// Style used when the project has no prettier configuration
const DEFAULT_STYLE_ARGS: &[&str] = &[
    "--no-config",
    "--tab-width",
    "2",
    "--semi",
    "--single-quote",
    "--trailing-comma",
    "all",
    "--print-width",
    "100",
    "--arrow-parens",
    "avoid",
];

const CONFIG_FILES: &[&str] = &[
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.json5",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.toml",
    ".prettierrc.js",
    ".prettierrc.cjs",
    ".prettierrc.mjs",
    ".prettierrc.ts",
    "prettier.config.js",
    "prettier.config.cjs",
    "prettier.config.mjs",
    "prettier.config.ts",
];

/// Prettier parser for a file, chosen by extension. `None` lets prettier infer it.
pub fn parser_for(file: &Path) -> Option<&'static str> {
    let ext = file.extension()?.to_str()?.to_ascii_lowercase();
    let parser = match ext.as_str() {
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" => "babel",
        "json" => "json",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "md" | "markdown" => "markdown",
        "yaml" | "yml" => "yaml",
        "html" | "htm" => "html",
        "vue" => "vue",
        _ => return None,
    };
    Some(parser)
}

/// Looks for a prettier configuration in the file's directory and each ancestor.
pub fn resolve_style(file: &Path) -> StyleSource {
    let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    let Some(start) = absolute.parent() else {
        return StyleSource::Defaults;
    };

    for dir in start.ancestors() {
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("Using prettier configuration {}", candidate.display());
                return StyleSource::Project(candidate);
            }
        }
        let manifest = dir.join("package.json");
        if has_prettier_key(&manifest) {
            debug!("Using prettier configuration from {}", manifest.display());
            return StyleSource::Project(manifest);
        }
    }

    debug!("No prettier configuration above {}, using default style", file.display());
    StyleSource::Defaults
}

fn has_prettier_key(manifest: &Path) -> bool {
    let Ok(content) = fs::read_to_string(manifest) else {
        return false;
    };
    serde_json::from_str::<serde_json::Value>(&content)
        .map(|value| value.get("prettier").is_some())
        .unwrap_or(false)
}

/// Remediation for the common prettier failures
pub fn hint_for(stderr: &str) -> Option<&'static str> {
    if stderr.contains("SyntaxError") {
        Some("Fix the syntax error in the file and try again")
    } else if stderr.contains("No parser could be inferred")
        || stderr.contains("No parser and no file path")
    {
        Some(
            "Use a file extension prettier recognizes, \
             or set a parser override in the prettier config",
        )
    } else {
        None
    }
}

pub struct Prettier<'r, R: CommandRunner> {
    binary: PathBuf,
    runner: &'r R,
}

impl<'r, R: CommandRunner> Prettier<'r, R> {
    pub fn new(binary: impl Into<PathBuf>, runner: &'r R) -> Self {
        Self { binary: binary.into(), runner }
    }

    fn command(&self, file: &Path, parser: Option<&str>, style: &StyleSource) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(parser) = parser {
            cmd.args(["--parser", parser]);
        }
        if *style == StyleSource::Defaults {
            cmd.args(DEFAULT_STYLE_ARGS);
        }
        cmd.arg(file);
        cmd
    }

    /// Runs prettier on `file` and returns what it printed.
    pub fn format(&self, file: &Path, parser: Option<&str>, style: &StyleSource) -> Result<String> {
        let mut cmd = self.command(file, parser, style);
        trace!("Invoking {:?}", cmd);

        let output = self.runner.output(&mut cmd).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                OxipackError::ToolMissing { tool: PRETTIER, install_hint: PRETTIER_INSTALL_HINT }
            }
            _ => OxipackError::io(&self.binary, e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim().lines().next().unwrap_or("prettier exited with an error");
            return Err(OxipackError::Transform {
                stage: "format",
                message: message.to_string(),
                hint: hint_for(&stderr),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxipack_core::exit_status;
    use std::{cell::RefCell, io, process::Output};
    use tempfile::TempDir;

    struct RecordingRunner {
        calls: RefCell<Vec<Vec<String>>>,
        result: fn() -> io::Result<Output>,
    }

    impl CommandRunner for RecordingRunner {
        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            let args = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
            self.calls.borrow_mut().push(args);
            (self.result)()
        }
    }

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_parser_for_extensions() {
        assert_eq!(parser_for(Path::new("a.ts")), Some("typescript"));
        assert_eq!(parser_for(Path::new("a.TSX")), Some("typescript"));
        assert_eq!(parser_for(Path::new("a.mjs")), Some("babel"));
        assert_eq!(parser_for(Path::new("a.json")), Some("json"));
        assert_eq!(parser_for(Path::new("a.scss")), Some("scss"));
        assert_eq!(parser_for(Path::new("README.md")), Some("markdown"));
        assert_eq!(parser_for(Path::new("ci.yml")), Some("yaml"));
        assert_eq!(parser_for(Path::new("App.vue")), Some("vue"));
        assert_eq!(parser_for(Path::new("Makefile")), None);
        assert_eq!(parser_for(Path::new("a.weird")), None);
    }

    #[test]
    fn test_resolve_style_finds_rc_in_ancestor() {
        let temp_dir = TempDir::new().unwrap();
        let rc = create_test_file(temp_dir.path(), ".prettierrc", "{}");
        fs::create_dir_all(temp_dir.path().join("src/deep")).unwrap();
        let file = create_test_file(&temp_dir.path().join("src/deep"), "a.js", "");

        assert_eq!(resolve_style(&file), StyleSource::Project(rc));
    }

    #[test]
    fn test_resolve_style_package_json_key() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = create_test_file(
            temp_dir.path(),
            "package.json",
            r#"{"name": "app", "prettier": {"semi": false}}"#,
        );
        let file = create_test_file(temp_dir.path(), "a.js", "");

        assert_eq!(resolve_style(&file), StyleSource::Project(manifest));
    }

    #[test]
    fn test_resolve_style_ignores_package_json_without_key() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir_all(&root).unwrap();
        create_test_file(&root, "package.json", r#"{"name": "app"}"#);
        let file = create_test_file(&root, "a.js", "");

        // Ancestors of the temp dir are outside the test's control
        match resolve_style(&file) {
            StyleSource::Defaults => {}
            StyleSource::Project(path) => assert!(!path.starts_with(&root)),
        }
    }

    #[test]
    fn test_default_style_args_are_passed_without_config() {
        let runner = RecordingRunner {
            calls: RefCell::new(vec![]),
            result: || {
                Ok(Output { status: exit_status(0), stdout: b"x;\n".to_vec(), stderr: vec![] })
            },
        };
        let prettier = Prettier::new("prettier", &runner);

        let out = prettier
            .format(Path::new("a.ts"), Some("typescript"), &StyleSource::Defaults)
            .unwrap();

        assert_eq!(out, "x;\n");
        let calls = runner.calls.borrow();
        let args = &calls[0];
        assert_eq!(args[0], "--parser");
        assert_eq!(args[1], "typescript");
        assert!(args.contains(&"--no-config".to_string()));
        assert!(args.contains(&"--single-quote".to_string()));
        assert_eq!(args.last().unwrap(), "a.ts");
    }

    #[test]
    fn test_project_style_lets_prettier_resolve_config() {
        let runner = RecordingRunner {
            calls: RefCell::new(vec![]),
            result: || {
                Ok(Output { status: exit_status(0), stdout: b"x\n".to_vec(), stderr: vec![] })
            },
        };
        let prettier = Prettier::new("prettier", &runner);
        let style = StyleSource::Project(PathBuf::from(".prettierrc"));

        prettier.format(Path::new("a.weird"), None, &style).unwrap();

        assert_eq!(runner.calls.borrow()[0], vec!["a.weird".to_string()]);
    }

    #[test]
    fn test_failure_becomes_transform_error_with_hint() {
        let runner = RecordingRunner {
            calls: RefCell::new(vec![]),
            result: || {
                Ok(Output {
                    status: exit_status(2),
                    stdout: vec![],
                    stderr: b"[error] a.js: SyntaxError: Unexpected token (1:10)\n".to_vec(),
                })
            },
        };
        let prettier = Prettier::new("prettier", &runner);

        let err = prettier
            .format(Path::new("a.js"), Some("babel"), &StyleSource::Defaults)
            .unwrap_err();

        match err {
            OxipackError::Transform { stage, message, hint } => {
                assert_eq!(stage, "format");
                assert!(message.contains("SyntaxError"));
                assert!(hint.is_some());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_spawn_not_found_is_tool_missing() {
        let runner = RecordingRunner {
            calls: RefCell::new(vec![]),
            result: || Err(io::Error::new(ErrorKind::NotFound, "no such file")),
        };
        let prettier = Prettier::new("prettier", &runner);

        let err = prettier.format(Path::new("a.js"), None, &StyleSource::Defaults).unwrap_err();

        assert!(matches!(err, OxipackError::ToolMissing { tool: "prettier", .. }));
        assert_eq!(err.hint(), Some(PRETTIER_INSTALL_HINT));
    }

    #[test]
    fn test_hint_for_unset_parser() {
        let stderr = "[error] No parser could be inferred for file \"/x/Makefile\".";
        assert!(hint_for(stderr).is_some());
        assert!(hint_for("something else").is_none());
    }
}
