use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{KvBuffer, KvValue, Level};
use crate::sinks::{HumanSink, LogSink};

/// Buffers one iteration's key/value diagnostics and fans them out to an
/// ordered list of sinks on dump; free-text messages bypass the buffer and
/// go straight to every sink, subject to the severity threshold.
///
/// A `Logger` can be used standalone; the process-wide facade in the crate
/// root operates on one shared instance.
pub struct Logger {
  dir: Option<PathBuf>,
  level: Level,
  sinks: Vec<Box<dyn LogSink>>,
  buffer: KvBuffer,
}

impl Logger {
  /// Creates a logger over the given sinks, thresholded at `Info`.
  pub fn new(dir: Option<PathBuf>, sinks: Vec<Box<dyn LogSink>>) -> Self {
    Self {
      dir,
      level: Level::Info,
      sinks,
      buffer: KvBuffer::new(),
    }
  }

  /// The zero-configuration logger: no directory, one stdout table sink.
  pub fn default_console() -> Self {
    Self::new(None, vec![Box::new(HumanSink::new(io::stdout()))])
  }

  /// Records one diagnostic value for the current iteration. Logging the
  /// same key again before the next dump overwrites the earlier value.
  pub fn log_kv(&mut self, key: impl Into<String>, value: impl Into<KvValue>) {
    self.buffer.insert(key.into(), value.into());
  }

  /// Records every entry of `entries`, with `log_kv` semantics per key.
  pub fn log_kvs<K, V, I>(&mut self, entries: I)
  where
    K: Into<String>,
    V: Into<KvValue>,
    I: IntoIterator<Item = (K, V)>,
  {
    for (key, value) in entries {
      self.log_kv(key, value);
    }
  }

  /// Writes the buffered batch to every sink in order, then clears the
  /// buffer.
  ///
  /// Fan-out is fail-fast: the first sink error aborts the remaining sinks
  /// for this dump. The buffer is cleared regardless of the outcome. When
  /// the threshold is `Disabled` the dump is skipped entirely and the
  /// buffer is retained.
  pub fn dump_kvs(&mut self) -> Result<()> {
    if self.level == Level::Disabled {
      return Ok(());
    }
    let mut outcome = Ok(());
    for sink in &mut self.sinks {
      outcome = sink.write_kvs(&self.buffer);
      if outcome.is_err() {
        break;
      }
    }
    self.buffer.clear();
    outcome
  }

  /// Writes `tokens`, concatenated with no separator, to every sink that
  /// renders free text — provided `level` clears the threshold.
  pub fn log(&mut self, tokens: &[&str], level: Level) -> Result<()> {
    if self.level <= level {
      for sink in &mut self.sinks {
        sink.write_seq(tokens)?;
      }
    }
    Ok(())
  }

  pub fn debug(&mut self, tokens: &[&str]) -> Result<()> {
    self.log(tokens, Level::Debug)
  }

  pub fn info(&mut self, tokens: &[&str]) -> Result<()> {
    self.log(tokens, Level::Info)
  }

  pub fn warn(&mut self, tokens: &[&str]) -> Result<()> {
    self.log(tokens, Level::Warn)
  }

  pub fn error(&mut self, tokens: &[&str]) -> Result<()> {
    self.log(tokens, Level::Error)
  }

  /// Sets the severity threshold for free-text messages (and, at
  /// `Disabled`, for dumps too).
  pub fn set_level(&mut self, level: Level) {
    self.level = level;
  }

  pub fn level(&self) -> Level {
    self.level
  }

  /// The directory log files are written to; `None` for the default
  /// console-only logger.
  pub fn dir(&self) -> Option<&Path> {
    self.dir.as_deref()
  }

  /// A snapshot of the current iteration's buffer.
  pub fn kvs(&self) -> KvBuffer {
    self.buffer.clone()
  }

  /// Closes every sink in order.
  pub fn close(&mut self) -> Result<()> {
    for sink in &mut self.sinks {
      sink.close()?;
    }
    Ok(())
  }
}
