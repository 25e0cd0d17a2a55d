use log::{debug, info, warn};
use oxipack_core::{CommandRunner, OxipackError, Result, SystemRunner, locate_tool, read_source};
use std::{fs, path::Path};

use crate::{
    config::Config,
    minify::minify_source,
    prettier::{
        FALLBACK_PARSER, PRETTIER, PRETTIER_INSTALL_HINT, Prettier, parser_for, resolve_style,
    },
    types::{FormatMode, FormatOutcome},
};

pub fn run_format(cfg: &Config) -> Result<FormatOutcome> {
    info!("{} {}", if cfg.minify { "Minifying" } else { "Formatting" }, cfg.file.display());
    let source = read_source(&cfg.file)?;

    let (mode, output) = if cfg.minify {
        (FormatMode::Minified, minify_source(&cfg.file, &source)?)
    } else {
        let binary = locate_tool(PRETTIER, Path::new(".")).ok_or(OxipackError::ToolMissing {
            tool: PRETTIER,
            install_hint: PRETTIER_INSTALL_HINT,
        })?;
        format_source(&Prettier::new(binary, &SystemRunner), &cfg.file, &source)?
    };

    fs::write(&cfg.file, &output).map_err(|e| OxipackError::io(&cfg.file, e))?;

    Ok(FormatOutcome {
        file: cfg.file.clone(),
        mode,
        bytes_before: source.len(),
        bytes_after: output.len(),
    })
}

/// Formats `file` with the project style (or the default one), retrying once with the
/// general-purpose parser when the dialect parser fails.
///
/// The error from the first attempt is the one reported if the retry fails too.
pub fn format_source<R: CommandRunner>(
    prettier: &Prettier<'_, R>,
    file: &Path,
    source: &str,
) -> Result<(FormatMode, String)> {
    let style = resolve_style(file);
    let parser = parser_for(file);

    let (parser, output) = match prettier.format(file, parser, &style) {
        Ok(output) => (parser, output),
        Err(e @ OxipackError::ToolMissing { .. }) => return Err(e),
        Err(e) if parser == Some(FALLBACK_PARSER) => return Err(e),
        Err(e) => {
            warn!(
                "Formatting {} failed ({}), retrying with the {} parser",
                file.display(),
                e,
                FALLBACK_PARSER
            );
            match prettier.format(file, Some(FALLBACK_PARSER), &style) {
                Ok(output) => (Some(FALLBACK_PARSER), output),
                Err(retry) => {
                    debug!("Retry failed too: {}", retry);
                    return Err(e);
                }
            }
        }
    };

    if output.trim().is_empty() && !source.trim().is_empty() {
        return Err(OxipackError::Transform {
            stage: "format",
            message: "prettier produced no output".to_string(),
            hint: Some("Check whether the file is listed in .prettierignore"),
        });
    }

    Ok((FormatMode::Formatted { style, parser }, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StyleSource;
    use oxipack_core::exit_status;
    use std::{
        cell::RefCell,
        collections::VecDeque,
        io,
        path::PathBuf,
        process::{Command, Output},
    };
    use tempfile::TempDir;

    /// Replays queued outputs and records the parser of every call
    struct ScriptedRunner {
        outputs: RefCell<VecDeque<Output>>,
        parsers: RefCell<Vec<Option<String>>>,
    }

    impl ScriptedRunner {
        fn new(outputs: Vec<Output>) -> Self {
            Self { outputs: RefCell::new(outputs.into()), parsers: RefCell::new(vec![]) }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn output(&self, cmd: &mut Command) -> io::Result<Output> {
            let args: Vec<String> =
                cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
            let parser = args.iter().position(|a| a == "--parser").map(|i| args[i + 1].clone());
            self.parsers.borrow_mut().push(parser);
            self.outputs
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| io::Error::other("unexpected extra invocation"))
        }
    }

    fn ok(stdout: &str) -> Output {
        Output { status: exit_status(0), stdout: stdout.as_bytes().to_vec(), stderr: vec![] }
    }

    fn failed(stderr: &str) -> Output {
        Output { status: exit_status(2), stdout: vec![], stderr: stderr.as_bytes().to_vec() }
    }

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_formats_with_dialect_parser() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.ts", "let x:number=1");
        let runner = ScriptedRunner::new(vec![ok("let x: number = 1;\n")]);

        let (mode, output) =
            format_source(&Prettier::new("prettier", &runner), &file, "let x:number=1").unwrap();

        assert_eq!(output, "let x: number = 1;\n");
        match mode {
            FormatMode::Formatted { parser, .. } => assert_eq!(parser, Some("typescript")),
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(*runner.parsers.borrow(), vec![Some("typescript".to_string())]);
    }

    #[test]
    fn test_retries_once_with_fallback_parser() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.ts", "x");
        let runner = ScriptedRunner::new(vec![failed("[error] boom"), ok("x;\n")]);

        let (mode, _) = format_source(&Prettier::new("prettier", &runner), &file, "x").unwrap();

        assert!(matches!(mode, FormatMode::Formatted { parser: Some("babel"), .. }));
        assert_eq!(
            *runner.parsers.borrow(),
            vec![Some("typescript".to_string()), Some("babel".to_string())]
        );
    }

    #[test]
    fn test_reports_first_error_when_retry_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.ts", "x");
        let runner = ScriptedRunner::new(vec![
            failed("[error] a.ts: SyntaxError: Unexpected token (1:1)"),
            failed("[error] a.ts: other"),
        ]);

        let err = format_source(&Prettier::new("prettier", &runner), &file, "x").unwrap_err();

        assert!(err.to_string().contains("SyntaxError"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_no_retry_when_already_using_fallback_parser() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.js", "x");
        let runner = ScriptedRunner::new(vec![failed("[error] boom")]);

        assert!(format_source(&Prettier::new("prettier", &runner), &file, "x").is_err());
        assert_eq!(runner.parsers.borrow().len(), 1);
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.js", "x");
        let runner = ScriptedRunner::new(vec![ok("")]);

        let err = format_source(&Prettier::new("prettier", &runner), &file, "x").unwrap_err();

        assert!(matches!(err, OxipackError::Transform { stage: "format", .. }));
    }

    #[test]
    fn test_project_config_is_detected() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.js", "x");
        create_test_file(temp_dir.path(), ".prettierrc.json", "{}");
        let runner = ScriptedRunner::new(vec![ok("x;\n")]);

        let (mode, _) = format_source(&Prettier::new("prettier", &runner), &file, "x").unwrap();

        assert!(matches!(
            mode,
            FormatMode::Formatted { style: StyleSource::Project(_), parser: Some("babel") }
        ));
    }

    #[test]
    fn test_run_format_minify_rewrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = "// comment\n\
                   function greet(name) {\n  return 'hi ' + name;\n}\n\
                   console.log(greet('you'));\n";
        let file = create_test_file(temp_dir.path(), "a.js", src);

        let outcome = run_format(&Config { file: file.clone(), minify: true }).unwrap();

        assert_eq!(outcome.mode, FormatMode::Minified);
        assert_eq!(outcome.bytes_before, src.len());
        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(outcome.bytes_after, written.len());
        assert!(written.len() < src.len());
        assert!(outcome.percent_change() < 0.0);
    }

    #[test]
    fn test_run_format_minify_error_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(temp_dir.path(), "a.js", "function {{{");

        let err = run_format(&Config { file: file.clone(), minify: true }).unwrap_err();

        assert!(matches!(err, OxipackError::Transform { stage: "minify", .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "function {{{");
    }

    #[test]
    fn test_run_format_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = Config { file: temp_dir.path().join("nope.js"), minify: false };
        assert!(matches!(run_format(&cfg), Err(OxipackError::FileNotFound { .. })));
    }
}
