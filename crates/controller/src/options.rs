//! Controller options and `patchie.toml` configuration
//!
//! [`PatchOptions`] is what [`PatchController::set_options`] takes: an
//! optional logger. A missing logger leaves the current one in place.
//!
//! [`PatchConfig`] is the declarative counterpart for programs that keep
//! their settings in a file; it can only pick one of the built-in sinks.
//!
//! [`PatchController::set_options`]: crate::PatchController::set_options

use crate::sink::{LogSink, SinkKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Config file name conventionally used for [`PatchConfig`]
pub const CONFIG_FILE_NAME: &str = "patchie.toml";

/// Options accepted by `set_options`
#[derive(Clone, Default)]
pub struct PatchOptions {
    /// Sink for diagnostics. `None` keeps the current sink.
    pub logger: Option<Arc<dyn LogSink>>,
}

impl PatchOptions {
    /// Options that change nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Route diagnostics to `logger`
    pub fn with_logger(self, logger: impl LogSink + 'static) -> Self {
        self.with_shared_logger(Arc::new(logger))
    }

    /// Route diagnostics to an already shared sink
    pub fn with_shared_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Route diagnostics to a built-in sink
    pub fn with_sink_kind(self, kind: SinkKind) -> Self {
        self.with_shared_logger(kind.build())
    }

    /// Options equivalent to a loaded config
    pub fn from_config(config: &PatchConfig) -> Self {
        Self::new().with_sink_kind(config.sink)
    }
}

impl fmt::Debug for PatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchOptions")
            .field("logger", &self.logger.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

/// Errors loading a [`PatchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid
    #[error("Invalid patchie config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Declarative controller configuration
///
/// # Example
///
/// ```toml
/// # Where failed wrap/unwrap diagnostics go:
/// # "stderr" (default), "tracing" or "silent"
/// sink = "stderr"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchConfig {
    /// Built-in sink receiving diagnostics
    #[serde(default)]
    pub sink: SinkKind,
}

impl PatchConfig {
    /// Default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# patchie configuration
#
# Where failed wrap/unwrap diagnostics go:
#   "stderr"  = one line per message on standard error (default)
#   "tracing" = tracing::warn! events, target "patchie"
#   "silent"  = dropped
sink = "stderr"
"#
    }

    /// Parse config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse config from a file path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
