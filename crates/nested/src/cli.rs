//! `nested-path` — read and edit a JSON document by path.
//!
//! Provides the logic behind the binary so it can be tested without a
//! process:
//!
//! ```text
//! nested-path <get|has|set|delete|entries> [path] [json-value] [--separator S] [--array]
//! ```

use nested_object::{NestedObject, Node, Options, TraverseOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Usage(String),
    UnknownCommand(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
            CliError::UnknownCommand(e) => write!(f, "Unknown command: {e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

pub const USAGE: &str =
    "usage: nested-path <get|has|set|delete|entries> [path] [json-value] [--separator S] [--array]";

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Has,
    Set,
    Delete,
    Entries,
}

impl Command {
    fn parse(name: &str) -> Result<Self, CliError> {
        match name {
            "get" => Ok(Command::Get),
            "has" => Ok(Command::Has),
            "set" => Ok(Command::Set),
            "delete" => Ok(Command::Delete),
            "entries" => Ok(Command::Entries),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub path: String,
    pub value: Option<String>,
    pub options: Options,
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut options = Options::new();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--array" => options = options.array(true),
            "--separator" => {
                let separator = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--separator needs a value".to_string()))?;
                options = options.separator(separator.as_str());
            }
            _ => positional.push(arg.as_str()),
        }
    }
    let mut positional = positional.into_iter();
    let command = Command::parse(positional.next().ok_or_else(|| CliError::Usage(USAGE.to_string()))?)?;
    let path = positional.next().unwrap_or_default().to_string();
    let value = positional.next().map(str::to_string);
    if command == Command::Set && value.is_none() {
        return Err(CliError::Usage("set needs a JSON value".to_string()));
    }
    if let Some(extra) = positional.next() {
        return Err(CliError::Usage(format!("unexpected argument: {extra}")));
    }
    Ok(Invocation {
        command,
        path,
        value,
        options,
    })
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Run one invocation against the JSON document in `input`.
pub fn run(args: &[String], input: &str) -> Result<String, CliError> {
    let invocation = parse_args(args)?;
    let root: Node = serde_json::from_str(input)?;
    let mut doc = NestedObject::with_options(root, invocation.options);
    let path = invocation.path.as_str();
    match invocation.command {
        Command::Get => Ok(match doc.get(path) {
            Some(value) => serde_json::to_string(value)?,
            None => "undefined".to_string(),
        }),
        Command::Has => Ok(doc.has(path).to_string()),
        Command::Set => {
            let value: Node = serde_json::from_str(invocation.value.as_deref().unwrap_or("null"))?;
            Ok(serde_json::to_string(doc.set(path, value))?)
        }
        Command::Delete => {
            doc.delete(path);
            Ok(serde_json::to_string(doc.root())?)
        }
        Command::Entries => {
            let mut lines = Vec::new();
            for (entry, value) in doc.entries(TraverseOptions::leaves()) {
                let joined = entry.as_joined().unwrap_or_default();
                lines.push(format!("{joined}\t{}", serde_json::to_string(value)?));
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_anywhere() {
        let invocation = parse_args(&args(&["--separator", "/", "get", "a/b", "--array"])).unwrap();
        assert_eq!(invocation.command, Command::Get);
        assert_eq!(invocation.path, "a/b");
        assert_eq!(invocation.options, Options::new().separator("/").array(true));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(&[]), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&args(&["frob"])), Err(CliError::UnknownCommand(_))));
        assert!(matches!(parse_args(&args(&["set", "a"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&args(&["get", "a", "b", "c"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&args(&["get", "--separator"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_get_and_has() {
        let doc = r#"{"a": {"b": [1, 2]}}"#;
        assert_eq!(run(&args(&["get", "a.b.1"]), doc).unwrap(), "2");
        assert_eq!(run(&args(&["get", "a.x"]), doc).unwrap(), "undefined");
        assert_eq!(run(&args(&["has", "a.b"]), doc).unwrap(), "true");
        assert_eq!(run(&args(&["has", "a.b.5"]), doc).unwrap(), "false");
    }

    #[test]
    fn test_set_and_delete() {
        assert_eq!(
            run(&args(&["set", "a.0", r#"{"x":1}"#, "--array"]), "{}").unwrap(),
            r#"{"a":[{"x":1}]}"#
        );
        assert_eq!(run(&args(&["delete", "a"]), r#"{"a":1,"b":2}"#).unwrap(), r#"{"b":2}"#);
    }

    #[test]
    fn test_entries() {
        let out = run(&args(&["entries"]), r#"{"a":{"b":1},"c":"x"}"#).unwrap();
        assert_eq!(out, "a.b\t1\nc\t\"x\"");
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(run(&args(&["get", "a"]), "{"), Err(CliError::Json(_))));
        assert!(matches!(run(&args(&["set", "a", "nope"]), "{}"), Err(CliError::Json(_))));
    }
}
