use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Severity threshold for free-text log messages.
///
/// Levels are totally ordered; `Disabled` sits above every real level and is
/// only meaningful as a logger threshold, where it suppresses both free-text
/// messages and key/value dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Debug,
  Info,
  Warn,
  Error,
  Disabled,
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Level::Debug => "DEBUG",
      Level::Info => "INFO",
      Level::Warn => "WARN",
      Level::Error => "ERROR",
      Level::Disabled => "DISABLED",
    };
    f.write_str(s)
  }
}

/// A loggable scalar, tagged at the point of `log_kv`.
///
/// `TensorScalar` marks a float that was extracted from a tensor-like
/// wrapper. It is stored verbatim in the buffer and only coerced to a plain
/// float when a sink serializes it, so buffer snapshots return exactly what
/// was logged.
#[derive(Debug, Clone, PartialEq)]
pub enum KvValue {
  Int(i64),
  Float(f64),
  Str(String),
  TensorScalar(f64),
}

impl KvValue {
  /// Tags a float extracted from a tensor-like scalar wrapper.
  pub fn tensor(value: f64) -> Self {
    KvValue::TensorScalar(value)
  }

  /// Coerces the value to a float, the way event-stream sinks consume it.
  /// Numeric strings parse; anything else is `None`.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      KvValue::Int(v) => Some(*v as f64),
      KvValue::Float(v) | KvValue::TensorScalar(v) => Some(*v),
      KvValue::Str(s) => s.trim().parse().ok(),
    }
  }
}

impl From<i64> for KvValue {
  fn from(value: i64) -> Self {
    KvValue::Int(value)
  }
}

impl From<i32> for KvValue {
  fn from(value: i32) -> Self {
    KvValue::Int(value as i64)
  }
}

impl From<u32> for KvValue {
  fn from(value: u32) -> Self {
    KvValue::Int(value as i64)
  }
}

impl From<f64> for KvValue {
  fn from(value: f64) -> Self {
    KvValue::Float(value)
  }
}

impl From<f32> for KvValue {
  fn from(value: f32) -> Self {
    KvValue::Float(value as f64)
  }
}

impl From<&str> for KvValue {
  fn from(value: &str) -> Self {
    KvValue::Str(value.to_string())
  }
}

impl From<String> for KvValue {
  fn from(value: String) -> Self {
    KvValue::Str(value)
  }
}

impl fmt::Display for KvValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KvValue::Int(v) => write!(f, "{}", v),
      KvValue::Float(v) | KvValue::TensorScalar(v) => write!(f, "{}", v),
      KvValue::Str(s) => f.write_str(s),
    }
  }
}

// Tensor-extracted scalars flatten to plain floats on the wire.
impl Serialize for KvValue {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match self {
      KvValue::Int(v) => serializer.serialize_i64(*v),
      KvValue::Float(v) => serializer.serialize_f64(*v),
      KvValue::Str(s) => serializer.serialize_str(s),
      KvValue::TensorScalar(v) => serializer.serialize_f64(*v),
    }
  }
}

/// The key/value state accumulated for one iteration. Later writes to the
/// same key overwrite earlier ones; sinks decide display order themselves.
pub type KvBuffer = HashMap<String, KvValue>;
