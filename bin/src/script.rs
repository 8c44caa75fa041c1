//! Command scripts for `sistrum run`.
//!
//! ```text
//! # jump to the next comma, then overwrite it
//! sistrum.searchNext {"text": ","}
//! sistrum.replace {"text": ";"}
//! @blur
//! @focus
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Trigger a host command by id.
    Command {
        id: String,
        args: Option<serde_json::Value>,
    },
    /// Focus the editor.
    Focus,
    /// Move focus away from the editor.
    Blur,
}

/// A step with the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub step: Step,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: invalid JSON arguments: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: unknown directive @{directive}")]
    Directive { line: usize, directive: String },

    #[error("line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: sistrum_core::Error,
    },
}

pub fn parse(script: &str) -> Result<Vec<Line>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let number = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let step = if let Some(directive) = text.strip_prefix('@') {
            match directive {
                "focus" => Step::Focus,
                "blur" => Step::Blur,
                _ => {
                    return Err(ScriptError::Directive {
                        line: number,
                        directive: directive.to_string(),
                    })
                },
            }
        } else {
            let (id, args) = match text.split_once(char::is_whitespace) {
                Some((id, args)) => (id, Some(args.trim())),
                None => (text, None),
            };
            let args = args
                .map(serde_json::from_str)
                .transpose()
                .map_err(|source| ScriptError::Json {
                    line: number,
                    source,
                })?;
            Step::Command {
                id: id.to_string(),
                args,
            }
        };
        lines.push(Line { number, step });
    }
    Ok(lines)
}
