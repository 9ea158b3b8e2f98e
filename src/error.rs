use std::io;

use thiserror::Error;

/// Errors surfaced by logger configuration and sink I/O.
#[derive(Debug, Error)]
pub enum Error {
  /// A format name passed to `configure` or the sink factory was not one of
  /// the accepted vocabulary (`stdout`, `log`, `json`, `tensorboard`).
  #[error("unknown output format: {0:?}")]
  UnknownFormat(String),

  /// `configure` was called while a configured logger was already installed.
  /// Call `reset()` first.
  #[error("logger already configured; call reset() before calling configure() again")]
  AlreadyConfigured,

  /// A value could not be coerced to a float for an event-stream sink.
  #[error("value for key {key:?} is not numeric")]
  NonNumeric { key: String },

  /// An underlying file or stream operation failed.
  #[error(transparent)]
  Io(#[from] io::Error),

  /// A record could not be serialized.
  #[error(transparent)]
  Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
