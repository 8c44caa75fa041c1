use crate::script::{self, ScriptError, Step};
use sistrum_core::{
    host::{self, drain_requests},
    Action, ContextValue, CursorStyle, Event, MemoryHost, Mode, Session, SessionConfig,
};
use std::{fmt, path::Path, sync::Arc};

/// Final state of the in-memory editor after a script.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub mode: Mode,
    pub cursor_style: Option<CursorStyle>,
    pub contexts: Vec<(String, ContextValue)>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.text)?;
        writeln!(f, "mode: {}", self.mode)?;
        match self.cursor_style {
            Some(style) => writeln!(f, "cursor: {style}")?,
            None => writeln!(f, "cursor: none")?,
        }
        for (key, value) in &self.contexts {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

pub async fn handle(
    config: &SessionConfig,
    text_path: &Path,
    script_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_files(config, text_path, script_path).await?;
    print!("{report}");
    Ok(())
}

/// Like [`run`], reading the marked text and the script from files. A single
/// trailing newline on the text file is ignored.
pub async fn run_files(
    config: &SessionConfig,
    text_path: &Path,
    script_path: &Path,
) -> Result<Report, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(text_path)
        .map_err(|e| format!("Failed to read {}: {e}", text_path.display()))?;
    let script = std::fs::read_to_string(script_path)
        .map_err(|e| format!("Failed to read {}: {e}", script_path.display()))?;

    run(config, text.strip_suffix('\n').unwrap_or(&text), &script).await
}

/// Run `script` against `marked` text. Queued requests are applied after
/// every step, so each step sees the effects of the previous one.
pub async fn run(
    config: &SessionConfig,
    marked: &str,
    script: &str,
) -> Result<Report, Box<dyn std::error::Error>> {
    let lines = script::parse(script)?;

    let host = Arc::new(MemoryHost::new());
    let surface = host.open(marked)?;
    let (sink, mut requests) = host::channel();
    let mut session = Session::with_config(config.clone(), host.clone(), sink);
    session.activate();
    drain_requests(&mut requests, host.as_ref()).await;

    for line in lines {
        tracing::debug!(line = line.number, step = ?line.step, "script step");
        let event = match line.step {
            Step::Command { id, args } => {
                let action = Action::from_command(&config.namespace, &id, args).map_err(
                    |source| ScriptError::Command {
                        line: line.number,
                        source,
                    },
                )?;
                Event::Command(action)
            },
            Step::Focus => Event::ActiveSurfaceChanged(host.focus(Some(surface))),
            Step::Blur => Event::ActiveSurfaceChanged(host.focus(None)),
        };
        session.handle_event(event);
        drain_requests(&mut requests, host.as_ref()).await;
    }

    Ok(Report {
        text: host.marked_text(surface).unwrap_or_default(),
        mode: session.mode(),
        cursor_style: host.cursor_style(surface),
        contexts: host.contexts(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_then_replace() {
        let script = r#"
            # move to the comma and turn it into a semicolon
            sistrum.searchNextMode
            sistrum.searchNext {"text": ","}
            sistrum.replaceMode
            sistrum.replace {"text": ";"}
        "#;
        let report = run(&SessionConfig::default(), "|a, b", script)
            .await
            .unwrap();

        assert_eq!(report.text, "a|; b");
        assert_eq!(report.mode, Mode::Extension);
        assert_eq!(report.cursor_style, Some(CursorStyle::Block));
        assert_eq!(
            report.to_string(),
            "a|; b\n\
             mode: extension\n\
             cursor: block\n\
             sistrum.enabled = true\n\
             sistrum.mode = \"extension\"\n"
        );
    }

    #[tokio::test]
    async fn blurred_editor_ignores_edits() {
        let script = "sistrum.overtypeMode\n@blur\nsistrum.overtype {\"text\": \"Z\"}\n";
        let report = run(&SessionConfig::default(), "a|b", script).await.unwrap();
        assert_eq!(report.text, "a|b");
        assert_eq!(report.mode, Mode::Overtype);
        assert_eq!(report.cursor_style, Some(CursorStyle::Underline));
    }

    #[tokio::test]
    async fn focus_resets_mode() {
        let script = "sistrum.codeMode\n@blur\n@focus\n";
        let report = run(&SessionConfig::default(), "ab", script).await.unwrap();
        assert_eq!(report.mode, Mode::Extension);
        assert_eq!(report.cursor_style, Some(CursorStyle::Block));
    }

    #[tokio::test]
    async fn unknown_command_reports_line() {
        let err = run(&SessionConfig::default(), "ab", "\nsistrum.fly\n")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "line 2: Unknown command: sistrum.fly");
    }

    #[tokio::test]
    async fn handle_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("buffer.txt");
        let script = dir.path().join("keys.txt");
        std::fs::write(&text, "ab|c\n").unwrap();
        std::fs::write(&script, "sistrum.overtype {\"text\": \"Z\"}\n").unwrap();

        let report = run_files(&SessionConfig::default(), &text, &script)
            .await
            .unwrap();
        assert_eq!(report.text, "abZ|");
        assert_eq!(report.mode, Mode::Extension);

        handle(&SessionConfig::default(), &text, &script)
            .await
            .unwrap();

        let missing = dir.path().join("missing.txt");
        let err = handle(&SessionConfig::default(), &missing, &script)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
