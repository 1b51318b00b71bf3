//! Socket tester — entry point.
//!
//! Connects to a service that speaks newline-delimited JSON over raw TCP,
//! sends it a short script of messages, and prints every frame it sends back
//! until it closes the connection.  Used to check by hand that a service's
//! socket interface is reachable and frames its messages as expected.
//!
//! # Usage
//!
//! ```text
//! sockettester [OPTIONS]
//!
//! Options:
//!   --host <HOST>               Peer host name or IP [default: spinners-dev-python]
//!   --port <PORT>               Peer TCP port [default: 10000]
//!   --script <PATH>             TOML file with the messages to send
//!   -m, --message <JSON>        Message to send; repeat for several
//!   --send-interval-ms <MS>     Pause between messages
//!   --on-decode-error <POLICY>  skip | abort [default: skip]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                         | Default               |
//! |----------------------------------|-----------------------|
//! | `SOCKETTESTER_HOST`              | `spinners-dev-python` |
//! | `SOCKETTESTER_PORT`              | `10000`               |
//! | `SOCKETTESTER_SCRIPT`            | (built-in sequence)   |
//! | `SOCKETTESTER_SEND_INTERVAL_MS`  | (script value or 0)   |
//! | `SOCKETTESTER_ON_DECODE_ERROR`   | `skip`                |
//!
//! # Output
//!
//! stdout carries only the operator lines (`Received: ...` and
//! `Socket disconnected`).  Logs go to stderr; set `RUST_LOG=debug` to see
//! every frame sent and received.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sockettester_client::application::ConsoleReporter;
use sockettester_client::domain::config::{DEFAULT_HOST, DEFAULT_PORT};
use sockettester_client::domain::script::parse_message_arg;
use sockettester_client::domain::{DecodeErrorPolicy, MessageScript, TesterConfig};
use sockettester_client::infrastructure::run_session;
use sockettester_core::Message;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Diagnostic client for newline-delimited JSON socket services.
#[derive(Debug, Parser)]
#[command(
    name = "sockettester",
    about = "Send JSON messages to a socket service and print what it answers",
    version
)]
struct Cli {
    /// Host name or IP address of the service.
    ///
    /// Only the first address the name resolves to is tried.
    #[arg(long, default_value = DEFAULT_HOST, env = "SOCKETTESTER_HOST")]
    host: String,

    /// TCP port of the service.
    #[arg(long, default_value_t = DEFAULT_PORT, env = "SOCKETTESTER_PORT")]
    port: u16,

    /// TOML file listing the messages to send.
    ///
    /// Ignored when `--message` is given.
    #[arg(long, env = "SOCKETTESTER_SCRIPT")]
    script: Option<PathBuf>,

    /// A message to send, as a JSON object of strings.
    ///
    /// Repeat to send several, in order.  Overrides `--script`.
    #[arg(short, long = "message", value_name = "JSON", value_parser = parse_message_arg)]
    messages: Vec<Message>,

    /// Pause between consecutive messages, in milliseconds.
    ///
    /// Overrides `interval_ms` from the script file.
    #[arg(long, env = "SOCKETTESTER_SEND_INTERVAL_MS")]
    send_interval_ms: Option<u64>,

    /// What to do with a received frame that is not a JSON object of strings.
    #[arg(
        long,
        value_enum,
        default_value_t = DecodeErrorPolicy::Skip,
        env = "SOCKETTESTER_ON_DECODE_ERROR"
    )]
    on_decode_error: DecodeErrorPolicy,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`TesterConfig`].
    ///
    /// Message source precedence: `--message`, then `--script`, then the
    /// built-in sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the script file cannot be read or parsed.
    fn into_tester_config(self) -> anyhow::Result<TesterConfig> {
        let script = if !self.messages.is_empty() {
            MessageScript::new(self.messages)?
        } else if let Some(path) = &self.script {
            MessageScript::load(path)
                .with_context(|| format!("invalid message script '{}'", path.display()))?
        } else {
            MessageScript::default()
        };

        let script = match self.send_interval_ms {
            Some(ms) => script.with_interval(Duration::from_millis(ms)),
            None => script,
        };

        Ok(TesterConfig {
            host: self.host,
            port: self.port,
            script,
            decode_policy: self.on_decode_error,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries the operator lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.into_tester_config()?;
    let target = format!("{}:{}", config.host, config.port);

    info!(
        "socket tester starting — peer={target}, messages={}, on-decode-error={}",
        config.script.messages().len(),
        config.decode_policy
    );

    tokio::select! {
        report = run_session(config, ConsoleReporter::stdout()) => {
            let report = report.with_context(|| format!("session with {target} failed"))?;
            info!(
                "session with {} ended: sent={}, received={}, skipped={}",
                report.peer_addr,
                report.frames_sent,
                report.summary.frames,
                report.summary.skipped
            );
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C — stopping");
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
