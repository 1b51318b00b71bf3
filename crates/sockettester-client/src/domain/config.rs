//! Tester configuration types.
//!
//! [`TesterConfig`] holds every runtime setting of one session.  `main.rs`
//! builds it from CLI arguments; tests build it directly.

use std::fmt;

use crate::domain::script::MessageScript;

/// Host name of the service the tester talks to when none is given.
pub const DEFAULT_HOST: &str = "spinners-dev-python";

/// TCP port of the service's JSON socket.
pub const DEFAULT_PORT: u16 = 10000;

/// What the receiver does with a frame that is not a string-to-string JSON
/// object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DecodeErrorPolicy {
    /// Log a warning, count the frame as skipped, and keep reading.
    #[default]
    Skip,
    /// End the session with [`crate::TesterError::Decode`].
    Abort,
}

impl fmt::Display for DecodeErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// All runtime configuration for one tester session.
///
/// # Example
///
/// ```rust
/// use sockettester_client::domain::TesterConfig;
///
/// let cfg = TesterConfig::default();
/// assert_eq!(cfg.port, 10000);
/// assert_eq!(cfg.script.messages().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TesterConfig {
    /// Host name or IP literal of the peer.
    ///
    /// Resolved at connect time; only the first resolved address is tried.
    pub host: String,

    /// TCP port of the peer.
    pub port: u16,

    /// The messages to send once connected.
    pub script: MessageScript,

    /// Handling of frames that fail to decode.
    pub decode_policy: DecodeErrorPolicy,
}

impl Default for TesterConfig {
    /// | Field          | Default               |
    /// |----------------|-----------------------|
    /// | host           | `spinners-dev-python` |
    /// | port           | `10000`               |
    /// | script         | built-in HMI sequence |
    /// | decode_policy  | `Skip`                |
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            script: MessageScript::default(),
            decode_policy: DecodeErrorPolicy::default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_is_python_devcontainer() {
        let cfg = TesterConfig::default();
        assert_eq!(cfg.host, "spinners-dev-python");
    }

    #[test]
    fn test_default_port_is_10000() {
        let cfg = TesterConfig::default();
        assert_eq!(cfg.port, 10000);
    }

    #[test]
    fn test_default_decode_policy_is_skip() {
        let cfg = TesterConfig::default();
        assert_eq!(cfg.decode_policy, DecodeErrorPolicy::Skip);
    }

    #[test]
    fn test_default_script_is_builtin_sequence() {
        let cfg = TesterConfig::default();
        assert_eq!(cfg.script, MessageScript::default());
    }

    #[test]
    fn test_decode_policy_display_matches_cli_value() {
        assert_eq!(DecodeErrorPolicy::Skip.to_string(), "skip");
        assert_eq!(DecodeErrorPolicy::Abort.to_string(), "abort");
    }
}
