use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) content: String,
}

/// Reads a command's payload from a file path, or from stdin when the path
/// is `-` or absent. `stdin_override` stands in for piped stdin in tests.
pub(crate) fn resolve_source(
    path: Option<&str>,
    stdin_override: Option<String>,
    command: &str,
) -> ClientResult<ResolvedSource> {
    match path {
        Some(path_value) if path_value != "-" => {
            let content = fs::read_to_string(path_value).map_err(|error| {
                ClientError::invalid_argument_with_recovery(
                    &format!("Could not read file `{path_value}`: {error}"),
                    vec![
                        "Verify the path exists and is readable.".to_string(),
                        format!("Rerun `khata {command} <path>`."),
                    ],
                )
            })?;
            Ok(ResolvedSource {
                source_kind: SourceKind::File,
                content,
            })
        }
        _ => {
            let Some(content) = read_stdin(stdin_override)? else {
                return Err(ClientError::invalid_argument_for_command(
                    "No input provided. Pass a file path or pipe input via stdin with `-`.",
                    Some(command),
                ));
            };
            Ok(ResolvedSource {
                source_kind: SourceKind::Stdin,
                content,
            })
        }
    }
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value).filter(|body| !body.trim().is_empty()));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use super::{SourceKind, resolve_source};

    #[test]
    fn dash_reads_the_stdin_override() {
        let resolved = resolve_source(Some("-"), Some("[]".to_string()), "entry add");
        assert!(resolved.is_ok());
        if let Ok(source) = resolved {
            assert_eq!(source.source_kind, SourceKind::Stdin);
            assert_eq!(source.content, "[]");
        }
    }

    #[test]
    fn blank_stdin_is_rejected_with_command_hint() {
        let resolved = resolve_source(None, Some("  \n".to_string()), "invoice");
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.recovery_steps[0].contains("khata invoice --help"));
        }
    }

    #[test]
    fn missing_file_is_an_invalid_argument() {
        let resolved = resolve_source(Some("/definitely/not/here.json"), None, "entry add");
        assert!(resolved.is_err());
        if let Err(error) = resolved {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("/definitely/not/here.json"));
        }
    }
}
