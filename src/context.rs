// The process-wide current logger and its configure/reset lifecycle.

use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::sinks::{make_sink, SinkFormat};

/// Environment variable naming the log directory. When set, it overrides
/// the timestamped temp-dir fallback in [`configure`] and drives
/// [`init_from_env`] for subprocess-launched workloads.
pub const LOG_DIR_ENV: &str = "TRACKLOG_DIR";

// The formats installed when `configure` is not given an explicit list.
const DEFAULT_FORMATS: &[&str] = &["stdout", "log", "json"];

struct GlobalContext {
  logger: Logger,
  // Stands in for the original's identity check against the default
  // instance: mutating the default logger does not set this.
  configured: bool,
}

static CONTEXT: Lazy<Mutex<GlobalContext>> = Lazy::new(|| {
  Mutex::new(GlobalContext {
    logger: Logger::default_console(),
    configured: false,
  })
});

/// Runs `f` against the current logger while holding the context lock.
pub(crate) fn with_current<T>(f: impl FnOnce(&mut Logger) -> T) -> T {
  let mut ctx = CONTEXT.lock();
  f(&mut ctx.logger)
}

/// Builds sinks for every requested format and installs a new current
/// logger bound to them.
///
/// Fails with [`Error::AlreadyConfigured`] unless the context is still in
/// its default state; call [`reset`] first to reconfigure. An unknown
/// format name or sink I/O failure leaves the context untouched — no
/// partial sink list is ever installed.
///
/// `dir` resolution: the explicit argument, else the [`LOG_DIR_ENV`]
/// environment variable, else a freshly generated timestamped directory
/// under the system temp dir. `formats` defaults to
/// `["stdout", "log", "json"]`.
pub fn configure(dir: Option<PathBuf>, formats: Option<&[&str]>) -> Result<()> {
  let mut ctx = CONTEXT.lock();
  if ctx.configured {
    return Err(Error::AlreadyConfigured);
  }

  let dir = resolve_dir(dir);
  let format_names = formats.unwrap_or(DEFAULT_FORMATS);

  let mut sinks = Vec::with_capacity(format_names.len());
  for name in format_names {
    let format: SinkFormat = name.parse()?;
    sinks.push(make_sink(format, &dir)?);
  }

  let dir_display = dir.display().to_string();
  let mut logger = Logger::new(Some(dir), sinks);
  logger.info(&["Logging to ", dir_display.as_str()])?;

  ctx.logger = logger;
  ctx.configured = true;
  Ok(())
}

/// Reinstalls the default console-only logger as current.
///
/// The replaced logger's sinks are not closed here; callers that need file
/// handles released should call [`crate::close`] before resetting.
pub fn reset() -> Result<()> {
  let mut ctx = CONTEXT.lock();
  ctx.logger = Logger::default_console();
  ctx.configured = false;
  ctx.logger.info(&["Reset logger"])
}

/// Explicit process-start hook: if [`LOG_DIR_ENV`] is set and nothing has
/// been configured yet, configures the logger with that directory.
/// Otherwise a no-op. Lets a parent process inject the log directory into
/// subprocess workloads without any hidden import-time side effect.
pub fn init_from_env() -> Result<()> {
  if let Some(dir) = env::var_os(LOG_DIR_ENV) {
    let configured = CONTEXT.lock().configured;
    if !configured {
      return configure(Some(PathBuf::from(dir)), None);
    }
  }
  Ok(())
}

fn resolve_dir(dir: Option<PathBuf>) -> PathBuf {
  if let Some(dir) = dir {
    return dir;
  }
  if let Some(dir) = env::var_os(LOG_DIR_ENV) {
    return PathBuf::from(dir);
  }
  let stamp = chrono::Local::now().format("tracklog-%Y-%m-%d-%H-%M-%S-%6f");
  env::temp_dir().join(stamp.to_string())
}
