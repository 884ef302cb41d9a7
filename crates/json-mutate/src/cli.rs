//! Core logic behind the `json-mutate` binary.

use crate::error::CompileError;
use crate::stage::{RewriterConfig, StageError};
use serde_json::Value;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid context: {0}")]
    Context(#[source] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Stage(#[from] StageError),
}

/// Reads the config file, the optional context file and the whole of
/// `input`, then hands them to [`run`].
pub fn run_files(
    config_path: &str,
    context_path: Option<&str>,
    mut input: impl Read,
) -> Result<Vec<u8>, CliError> {
    let config = read_file(config_path)?;
    let context = context_path.map(read_file).transpose()?;

    let mut body = Vec::new();
    input.read_to_end(&mut body).map_err(|source| CliError::Io {
        path: "<stdin>".to_string(),
        source,
    })?;

    run(&config, context.as_deref(), &body)
}

fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

/// Compiles `config` and runs it over `input`.
///
/// The CLI always runs strictly: an empty or non-JSON input is an error
/// rather than being echoed back.
pub fn run(config: &str, context: Option<&str>, input: &[u8]) -> Result<Vec<u8>, CliError> {
    let mut config = RewriterConfig::from_json(config).map_err(CliError::Config)?;
    config.strict = true;
    let rewriter = config.build()?;

    let context = match context {
        Some(text) => serde_json::from_str(text).map_err(CliError::Context)?,
        None => Value::Null,
    };

    let input = trim_ascii(input);
    let rewrite = rewriter.rewrite(input, &context)?;
    tracing::info!(
        actions = rewriter.actions().len(),
        mutated = rewrite.is_mutated(),
        "document processed"
    );
    Ok(rewrite.into_body().into_owned())
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{"actions": [
        {"type": "set", "path": "model", "value": "gpt", "when": "[\"==\", [\"$\", \"/tier\"], \"pro\"]"},
        {"type": "delete", "path": "debug"}
    ]}"#;

    #[test]
    fn runs_actions_with_context() {
        let out = run(CONFIG, Some(r#"{"tier": "pro"}"#), b"  {\"debug\": true}\n").unwrap();
        assert_eq!(out, br#"{"model":"gpt"}"#);
    }

    #[test]
    fn condition_without_context_fails() {
        let err = run(CONFIG, None, br#"{"debug": true}"#).unwrap_err();
        assert!(matches!(err, CliError::Stage(StageError::Apply(_))));
    }

    #[test]
    fn unchanged_input_is_echoed() {
        let out = run(r#"{"actions": []}"#, None, br#"{ "a": 1 }"#).unwrap();
        assert_eq!(out, br#"{ "a": 1 }"#);
    }

    #[test]
    fn reads_files_and_input() {
        let dir = std::env::temp_dir().join(format!("json-mutate-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("config.json");
        let context = dir.join("context.json");
        std::fs::write(&config, CONFIG).unwrap();
        std::fs::write(&context, r#"{"tier": "pro"}"#).unwrap();

        let out = run_files(
            config.to_str().unwrap(),
            Some(context.to_str().unwrap()),
            &b"{\"debug\": 1}"[..],
        )
        .unwrap();
        assert_eq!(out, br#"{"model":"gpt"}"#);

        let missing = dir.join("missing.json");
        let err = run_files(missing.to_str().unwrap(), None, &b"{}"[..]).unwrap_err();
        assert!(matches!(&err, CliError::Io { path, .. } if path.ends_with("missing.json")));
        assert!(err.to_string().contains("missing.json: "), "got: {err}");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(run("{", None, b"{}"), Err(CliError::Config(_))));
        assert!(matches!(run("{}", Some("nope"), b"{}"), Err(CliError::Context(_))));
        assert!(matches!(
            run(r#"{"actions": [{"type": "rename", "path": "a"}]}"#, None, b"{}"),
            Err(CliError::Compile(CompileError::UnsupportedType(_)))
        ));
        assert!(matches!(run("{}", None, b"  "), Err(CliError::Stage(StageError::EmptyBody))));
        assert!(matches!(
            run("{}", None, b"[1,"),
            Err(CliError::Stage(StageError::InvalidJson(_)))
        ));
    }
}
