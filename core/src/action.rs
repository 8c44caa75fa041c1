use crate::{
    error::{InvalidArgsSnafu, MissingArgsSnafu, Result, UnknownCommandSnafu},
    mode::Mode,
};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};

/// Something a host trigger asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Action {
    /// Change to a different mode
    SetMode(Mode),

    /// Jump each cursor to the next occurrence of `text` on its line
    SearchNext { text: String },

    /// Jump each cursor to the previous occurrence of `text` on its line
    SearchPrev { text: String },

    /// Overwrite the text under each cursor
    Overtype { text: String },

    /// Overwrite the text under each cursor and return to extension mode
    Replace { text: String },
}

/// Argument object of the parameterized commands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TextArgs {
    pub text: String,
}

/// Command names, without the namespace prefix, in registration order.
pub const COMMAND_NAMES: [&str; 11] = [
    "codeMode",
    "extensionMode",
    "overtypeMode",
    "replaceMode",
    "searchNextMode",
    "searchPrevMode",
    "searchNext",
    "searchPrev",
    "overtype",
    "replace",
    "nop",
];

impl Action {
    /// Decode a host command such as `sistrum.searchNext` with its JSON
    /// arguments.
    pub fn from_command(
        namespace: &str,
        command: &str,
        args: Option<serde_json::Value>,
    ) -> Result<Self> {
        let name = command
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('.'))
            .context(UnknownCommandSnafu { command })?;

        let text = || -> Result<String> {
            let args = args.clone().context(MissingArgsSnafu { command })?;
            let args: TextArgs = serde_json::from_value(args).context(InvalidArgsSnafu { command })?;
            Ok(args.text)
        };

        let action = match name {
            "codeMode" => Action::SetMode(Mode::Code),
            "extensionMode" => Action::SetMode(Mode::Extension),
            "overtypeMode" => Action::SetMode(Mode::Overtype),
            "replaceMode" => Action::SetMode(Mode::Replace),
            "searchNextMode" => Action::SetMode(Mode::SearchNext),
            "searchPrevMode" => Action::SetMode(Mode::SearchPrev),
            "nop" => Action::SetMode(Mode::Nop),
            "searchNext" => Action::SearchNext { text: text()? },
            "searchPrev" => Action::SearchPrev { text: text()? },
            "overtype" => Action::Overtype { text: text()? },
            "replace" => Action::Replace { text: text()? },
            _ => return UnknownCommandSnafu { command }.fail(),
        };
        Ok(action)
    }

    /// Command name of this action, without the namespace prefix.
    pub fn command_name(&self) -> &'static str {
        match self {
            Action::SetMode(Mode::Code) => "codeMode",
            Action::SetMode(Mode::Extension) => "extensionMode",
            Action::SetMode(Mode::Overtype) => "overtypeMode",
            Action::SetMode(Mode::Replace) => "replaceMode",
            Action::SetMode(Mode::SearchNext) => "searchNextMode",
            Action::SetMode(Mode::SearchPrev) => "searchPrevMode",
            Action::SetMode(Mode::Nop) => "nop",
            Action::SearchNext { .. } => "searchNext",
            Action::SearchPrev { .. } => "searchPrev",
            Action::Overtype { .. } => "overtype",
            Action::Replace { .. } => "replace",
        }
    }

    /// Whether the command takes a `{ "text": .. }` argument.
    pub fn takes_text(name: &str) -> bool {
        matches!(name, "searchNext" | "searchPrev" | "overtype" | "replace")
    }

    /// Get a brief description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::SetMode(Mode::Code) => "Pass keys through to the editor",
            Action::SetMode(Mode::Extension) => "Return to extension mode",
            Action::SetMode(Mode::Overtype) => "Enter overtype mode",
            Action::SetMode(Mode::Replace) => "Overwrite the next character typed",
            Action::SetMode(Mode::SearchNext) => "Jump forward to the next character typed",
            Action::SetMode(Mode::SearchPrev) => "Jump backward to the next character typed",
            Action::SetMode(Mode::Nop) => "Do nothing",
            Action::SearchNext { .. } => "Jump to the next occurrence on the line",
            Action::SearchPrev { .. } => "Jump to the previous occurrence on the line",
            Action::Overtype { .. } => "Overwrite the text under the cursor",
            Action::Replace { .. } => "Overwrite the text under the cursor once",
        }
    }

    /// Every registrable command as `(id, description)`.
    pub fn registry(namespace: &str) -> Vec<(String, &'static str)> {
        COMMAND_NAMES
            .iter()
            .filter_map(|name| {
                let id = format!("{namespace}.{name}");
                let args = Self::takes_text(name).then(|| serde_json::json!({ "text": "" }));
                let action = Self::from_command(namespace, &id, args).ok()?;
                Some((id, action.description()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn decode_mode_commands() {
        for mode in Mode::ALL {
            let name = Action::SetMode(mode).command_name();
            let action = Action::from_command("sistrum", &format!("sistrum.{name}"), None)
                .expect("mode command should decode without args");
            assert_eq!(action, Action::SetMode(mode));
        }
    }

    #[test]
    fn decode_text_commands() {
        let args = Some(json!({ "text": "x" }));
        assert_eq!(
            Action::from_command("sistrum", "sistrum.searchNext", args.clone()).unwrap(),
            Action::SearchNext { text: "x".into() }
        );
        assert_eq!(
            Action::from_command("sistrum", "sistrum.replace", args).unwrap(),
            Action::Replace { text: "x".into() }
        );
    }

    #[test]
    fn decode_errors() {
        assert!(matches!(
            Action::from_command("sistrum", "other.codeMode", None),
            Err(Error::UnknownCommand { .. })
        ));
        assert!(matches!(
            Action::from_command("sistrum", "sistrum.jump", None),
            Err(Error::UnknownCommand { .. })
        ));
        assert!(matches!(
            Action::from_command("sistrum", "sistrum.overtype", None),
            Err(Error::MissingArgs { .. })
        ));
        assert!(matches!(
            Action::from_command("sistrum", "sistrum.overtype", Some(json!({ "txt": "a" }))),
            Err(Error::InvalidArgs { .. })
        ));
    }

    #[test]
    fn namespace_is_configurable() {
        assert_eq!(
            Action::from_command("ed", "ed.codeMode", None).unwrap(),
            Action::SetMode(Mode::Code)
        );
    }

    #[test]
    fn registry_lists_every_command() {
        let registry = Action::registry("sistrum");
        assert_eq!(registry.len(), COMMAND_NAMES.len());
        assert_eq!(registry[0].0, "sistrum.codeMode");
        assert!(registry.iter().any(|(id, _)| id == "sistrum.nop"));
    }

    #[test]
    fn action_serialization() {
        let serialized = ron::to_string(&Action::SetMode(Mode::Code)).unwrap();
        assert_eq!(serialized, "SetMode(Code)");

        let action: Action = ron::from_str(r#"Overtype(text: "a")"#).unwrap();
        assert_eq!(action, Action::Overtype { text: "a".into() });
    }
}
