//! Append-only text log of training diagnostics.
//!
//! Each record is one line, `[<local time, RFC 2822>]: <message>`, flushed
//! as soon as it is written. Write failures are reported through `tracing`
//! and otherwise ignored: the log never changes what the classifier learns.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default file name for the diagnostic log.
pub const DEFAULT_LOG_PATH: &str = "famr.log";

/// Where (and whether) diagnostics are written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticLogConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for DiagnosticLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl DiagnosticLogConfig {
    pub fn enabled_at(path: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            path: path.into(),
        }
    }
}

/// Diagnostic log writer. The file is opened on the first record.
#[derive(Debug)]
pub struct DiagnosticLog {
    config: DiagnosticLogConfig,
    out: Option<BufWriter<File>>,
}

impl DiagnosticLog {
    pub fn new(config: DiagnosticLogConfig) -> Self {
        Self { config, out: None }
    }

    pub fn disabled() -> Self {
        Self::new(DiagnosticLogConfig::default())
    }

    pub fn config(&self) -> &DiagnosticLogConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Append one timestamped line.
    pub fn record(&mut self, message: impl AsRef<str>) {
        if !self.config.enabled {
            return;
        }
        if let Err(e) = self.write_line(message.as_ref()) {
            warn!(path = %self.config.path.display(), error = %e, "diagnostic log write failed");
            self.out = None;
        }
    }

    /// Flush and release the file. A later record reopens it in append mode.
    pub fn close(&mut self) {
        if let Some(mut out) = self.out.take() {
            if let Err(e) = out.flush() {
                warn!(path = %self.config.path.display(), error = %e, "diagnostic log flush failed");
            }
        }
    }

    fn write_line(&mut self, message: &str) -> std::io::Result<()> {
        let out = match self.out.take() {
            Some(out) => out,
            None => BufWriter::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.config.path)?,
            ),
        };
        let out = self.out.insert(out);
        writeln!(out, "[{}]: {}", chrono::Local::now().to_rfc2822(), message)?;
        out.flush()
    }
}

impl Drop for DiagnosticLog {
    fn drop(&mut self) {
        self.close();
    }
}
