//! Message scripts: the ordered messages a session sends.
//!
//! The built-in script reproduces the HMI start-up sequence the recipe
//! service expects:
//!
//! ```text
//! {"hmiEvent":"resetPlant"}
//! {"hmiEvent":"manualSelected"}
//! {"hmiEvent":"recipeSelected"}
//! ```
//!
//! Other sequences can be loaded from a TOML file:
//!
//! ```toml
//! interval_ms = 500
//!
//! [[messages]]
//! hmiEvent = "resetPlant"
//!
//! [[messages]]
//! hmiEvent = "startManualControl"
//! ```
//!
//! Every value in a `[[messages]]` table must be a string.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sockettester_core::Message;
use thiserror::Error;

/// Error type for loading or building a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("I/O error reading script at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse script TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The script contains no messages.
    #[error("script contains no messages")]
    Empty,
}

/// On-disk schema of a script file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptFile {
    /// Pause between consecutive messages, in milliseconds.
    #[serde(default)]
    interval_ms: u64,
    messages: Vec<Message>,
}

/// An ordered, non-empty list of messages plus the pause between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageScript {
    messages: Vec<Message>,
    interval: Duration,
}

impl MessageScript {
    /// Creates a script that sends `messages` back to back.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Empty`] if `messages` is empty.
    pub fn new(messages: Vec<Message>) -> Result<Self, ScriptError> {
        if messages.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self {
            messages,
            interval: Duration::ZERO,
        })
    }

    /// Returns the same script with a pause of `interval` between messages.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// - [`ScriptError::Parse`] for malformed TOML or non-string values.
    /// - [`ScriptError::Empty`] if `messages` is an empty list.
    pub fn from_toml_str(text: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(text)?;
        Ok(Self::new(file.messages)?.with_interval(Duration::from_millis(file.interval_ms)))
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the file cannot be read, plus the errors
    /// of [`MessageScript::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The messages, in send order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Pause between consecutive messages; zero means back to back.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for MessageScript {
    fn default() -> Self {
        Self {
            messages: ["resetPlant", "manualSelected", "recipeSelected"]
                .into_iter()
                .map(|event| Message::single("hmiEvent", event))
                .collect(),
            interval: Duration::ZERO,
        }
    }
}

/// Parses one `--message` argument: a JSON object with string values.
///
/// Used as a clap `value_parser`, so the error is a plain string shown to the
/// user next to the offending argument.
pub fn parse_message_arg(arg: &str) -> Result<Message, String> {
    serde_json::from_str(arg).map_err(|e| format!("expected a JSON object of strings: {e}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_is_hmi_sequence_in_order() {
        let script = MessageScript::default();
        let events: Vec<_> = script
            .messages()
            .iter()
            .map(|m| m.get("hmiEvent").unwrap())
            .collect();
        assert_eq!(events, vec!["resetPlant", "manualSelected", "recipeSelected"]);
    }

    #[test]
    fn test_default_script_has_no_interval() {
        assert_eq!(MessageScript::default().interval(), Duration::ZERO);
    }

    #[test]
    fn test_new_rejects_empty_list() {
        assert!(matches!(MessageScript::new(Vec::new()), Err(ScriptError::Empty)));
    }

    #[test]
    fn test_with_interval_sets_pause() {
        let script = MessageScript::new(vec![Message::single("a", "b")])
            .unwrap()
            .with_interval(Duration::from_millis(250));
        assert_eq!(script.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_toml_parses_messages_and_interval() {
        // Arrange
        let text = r#"
            interval_ms = 500

            [[messages]]
            hmiEvent = "resetPlant"

            [[messages]]
            hmiEvent = "startManualControl"
            operator = "line-2"
        "#;

        // Act
        let script = MessageScript::from_toml_str(text).unwrap();

        // Assert
        assert_eq!(script.interval(), Duration::from_millis(500));
        assert_eq!(script.messages().len(), 2);
        assert_eq!(script.messages()[0], Message::single("hmiEvent", "resetPlant"));
        assert_eq!(script.messages()[1].get("operator"), Some("line-2"));
    }

    #[test]
    fn test_from_toml_interval_defaults_to_zero() {
        let script = MessageScript::from_toml_str("[[messages]]\na = \"b\"\n").unwrap();
        assert_eq!(script.interval(), Duration::ZERO);
    }

    #[test]
    fn test_from_toml_empty_messages_is_rejected() {
        let result = MessageScript::from_toml_str("messages = []\n");
        assert!(matches!(result, Err(ScriptError::Empty)));
    }

    #[test]
    fn test_from_toml_non_string_value_is_parse_error() {
        let result = MessageScript::from_toml_str("[[messages]]\nnumSrv = 1\n");
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_from_toml_unknown_top_level_key_is_parse_error() {
        let result = MessageScript::from_toml_str("port = 1\n[[messages]]\na = \"b\"\n");
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = MessageScript::load(Path::new("/nonexistent/sockettester/script.toml"));
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        // Arrange: write a script into the OS temp directory
        let path = std::env::temp_dir().join(format!(
            "sockettester-script-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[[messages]]\nhmiEvent = \"resetPlant\"\n").unwrap();

        // Act
        let result = MessageScript::load(&path);
        let _ = std::fs::remove_file(&path);

        // Assert
        let script = result.unwrap();
        assert_eq!(script.messages(), &[Message::single("hmiEvent", "resetPlant")]);
    }

    #[test]
    fn test_parse_message_arg_accepts_string_object() {
        let msg = parse_message_arg(r#"{"hmiEvent":"resetPlant"}"#).unwrap();
        assert_eq!(msg, Message::single("hmiEvent", "resetPlant"));
    }

    #[test]
    fn test_parse_message_arg_rejects_non_object() {
        assert!(parse_message_arg("resetPlant").is_err());
        assert!(parse_message_arg(r#"{"n":1}"#).is_err());
    }
}
