//! A structured, multi-backend key/value logger for long-running iterative
//! workloads (training/evaluation loops and the like).
//!
//! # Features
//! - **Per-iteration buffering**: record diagnostics with [`log_kv`] as they
//!   become available, then [`dump_kvs`] once per iteration; the last write
//!   per key wins.
//! - **Multi-backend fan-out**: one dump lands in every active sink — a
//!   human-readable boxed table (console and/or `log.txt`), line-delimited
//!   JSON records (`progress.json`), and optionally a TensorBoard event
//!   stream (`tb/`, behind the `tensorboard` feature).
//! - **Severity thresholds**: free-text messages ([`debug`]/[`info`]/
//!   [`warn`]/[`error`]) are filtered by an ordered [`Level`]; the
//!   `Disabled` sentinel suppresses dumps as well.
//! - **Process-wide current logger**: [`configure`] once, log from anywhere
//!   through the free functions below, [`reset`] to return to the
//!   console-only default. A [`Logger`] can also be owned and threaded
//!   explicitly.
//!
//! Every write is flushed before the call returns, so durability is
//! observable at the call site. The facade is safe to call from multiple
//! threads (the context is mutex-guarded), but the semantics are
//! single-writer: one current logger, replaced atomically.
//!
//! ```no_run
//! fn main() -> tracklog::Result<()> {
//!   tracklog::configure(Some("/tmp/run-42".into()), None)?;
//!   for epoch in 0..10 {
//!     tracklog::log_kv("epoch", epoch);
//!     tracklog::log_kv("loss", 0.5 / (epoch + 1) as f64);
//!     tracklog::dump_kvs()?;
//!   }
//!   tracklog::info(&["training finished"])?;
//!   tracklog::close()?;
//!   tracklog::reset()
//! }
//! ```

// Public modules that form the API
pub mod error;
pub mod model;
pub mod sinks;

mod context;
mod logger;

// Re-export the primary user-facing types for convenience
pub use context::{configure, init_from_env, reset, LOG_DIR_ENV};
pub use error::{Error, Result};
pub use logger::Logger;
pub use model::{KvBuffer, KvValue, Level};
pub use sinks::{make_sink, HumanSink, JsonSink, LogSink, SinkFormat};
#[cfg(feature = "tensorboard")]
pub use sinks::TensorboardSink;

use std::path::PathBuf;

/// Records one diagnostic value on the current logger. Call once per
/// quantity per iteration; a repeated key overwrites the earlier value.
pub fn log_kv(key: impl Into<String>, value: impl Into<KvValue>) {
  context::with_current(|logger| logger.log_kv(key, value));
}

/// Records a whole mapping of diagnostics, with [`log_kv`] semantics per
/// entry.
pub fn log_kvs<K, V, I>(entries: I)
where
  K: Into<String>,
  V: Into<KvValue>,
  I: IntoIterator<Item = (K, V)>,
{
  context::with_current(|logger| logger.log_kvs(entries));
}

/// Writes all diagnostics buffered this iteration to every active sink and
/// clears the buffer. See [`Logger::dump_kvs`] for the failure policy.
pub fn dump_kvs() -> Result<()> {
  context::with_current(|logger| logger.dump_kvs())
}

/// A read-only snapshot of the current logger's buffer, for introspection
/// and tests.
pub fn get_kvs() -> KvBuffer {
  context::with_current(|logger| logger.kvs())
}

/// Writes `tokens`, concatenated with no separator, to every sink that
/// renders free text — if `level` clears the current threshold.
pub fn log(tokens: &[&str], level: Level) -> Result<()> {
  context::with_current(|logger| logger.log(tokens, level))
}

pub fn debug(tokens: &[&str]) -> Result<()> {
  log(tokens, Level::Debug)
}

pub fn info(tokens: &[&str]) -> Result<()> {
  log(tokens, Level::Info)
}

pub fn warn(tokens: &[&str]) -> Result<()> {
  log(tokens, Level::Warn)
}

pub fn error(tokens: &[&str]) -> Result<()> {
  log(tokens, Level::Error)
}

/// Sets the severity threshold on the current logger.
pub fn set_level(level: Level) {
  context::with_current(|logger| logger.set_level(level));
}

/// The directory the current logger writes files to. `None` when nothing
/// has been configured (console-only default).
pub fn get_dir() -> Option<PathBuf> {
  context::with_current(|logger| logger.dir().map(|d| d.to_path_buf()))
}

/// Closes every sink of the current logger. Call before [`reset`] when
/// file handles must be released deterministically.
pub fn close() -> Result<()> {
  context::with_current(|logger| logger.close())
}
