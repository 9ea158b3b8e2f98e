// Output destinations for buffered key/value batches and free-text messages.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::KvBuffer;

pub mod human;
pub mod json;
#[cfg(feature = "tensorboard")]
pub mod tensorboard;

pub use human::HumanSink;
pub use json::JsonSink;
#[cfg(feature = "tensorboard")]
pub use tensorboard::TensorboardSink;

/// A polymorphic output destination.
///
/// Every method flushes before returning, so a batch that `write_kvs`
/// reported as written survives a crash immediately afterwards. Sinks that
/// only understand tabular data implement `write_seq` as an explicit no-op.
pub trait LogSink: Send {
  /// Persists one full key/value batch. Must tolerate an empty batch.
  fn write_kvs(&mut self, kvs: &KvBuffer) -> Result<()>;

  /// Writes free-text tokens concatenated with no separator, terminated by
  /// a single newline.
  fn write_seq(&mut self, tokens: &[&str]) -> Result<()>;

  /// Releases the underlying file or stream. Idempotent.
  fn close(&mut self) -> Result<()>;
}

/// The output formats the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
  /// Human-readable table on the process's standard output.
  Stdout,
  /// Human-readable table appended to `log.txt` in the log directory.
  LogFile,
  /// One line-delimited JSON record per dump, in `progress.json`.
  Json,
  /// TensorBoard event stream under the `tb/` subdirectory.
  #[cfg(feature = "tensorboard")]
  Tensorboard,
}

impl FromStr for SinkFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "stdout" => Ok(SinkFormat::Stdout),
      "log" => Ok(SinkFormat::LogFile),
      "json" => Ok(SinkFormat::Json),
      #[cfg(feature = "tensorboard")]
      "tensorboard" => Ok(SinkFormat::Tensorboard),
      other => Err(Error::UnknownFormat(other.to_string())),
    }
  }
}

/// Builds the sink for `format`, rooted at `dir`.
///
/// `dir` is created (parents included) if absent; a pre-existing directory
/// is not an error.
pub fn make_sink(format: SinkFormat, dir: &Path) -> Result<Box<dyn LogSink>> {
  fs::create_dir_all(dir)?;
  match format {
    SinkFormat::Stdout => Ok(Box::new(HumanSink::new(io::stdout()))),
    SinkFormat::LogFile => {
      let file = File::create(dir.join("log.txt"))?;
      Ok(Box::new(HumanSink::new(file)))
    }
    SinkFormat::Json => {
      let file = File::create(dir.join("progress.json"))?;
      Ok(Box::new(JsonSink::new(file)))
    }
    #[cfg(feature = "tensorboard")]
    SinkFormat::Tensorboard => {
      let sink = TensorboardSink::new(&dir.join("tb"))?;
      Ok(Box::new(sink))
    }
  }
}
