// TensorBoard event-stream output for external visualization tooling.

use std::fs;
use std::path::Path;

use tensorboard_rs::summary_writer::SummaryWriter;

use crate::error::{Error, Result};
use crate::model::KvBuffer;
use crate::sinks::LogSink;

/// Appends every dumped batch to a TensorBoard events file (fixed `events`
/// file-name prefix, supplied by the writer) under the given directory.
///
/// Each batch is recorded at a step that starts at 1 and increases by
/// exactly 1 per `write_kvs` call, whether or not the batch was empty.
pub struct TensorboardSink {
  writer: Option<SummaryWriter>,
  step: usize,
}

impl TensorboardSink {
  pub fn new(dir: &Path) -> Result<Self> {
    fs::create_dir_all(dir)?;
    let writer = SummaryWriter::new(dir);
    Ok(Self {
      writer: Some(writer),
      step: 1,
    })
  }

  /// The step the next `write_kvs` call will record at.
  pub fn step(&self) -> usize {
    self.step
  }
}

impl LogSink for TensorboardSink {
  fn write_kvs(&mut self, kvs: &KvBuffer) -> Result<()> {
    if let Some(writer) = self.writer.as_mut() {
      let mut keys: Vec<_> = kvs.keys().collect();
      keys.sort();
      for key in keys {
        let value = &kvs[key];
        let scalar = value.as_f64().ok_or_else(|| Error::NonNumeric {
          key: key.clone(),
        })?;
        writer.add_scalar(key, scalar as f32, self.step);
      }
      let _ = writer.flush();
    }
    self.step += 1;
    Ok(())
  }

  // Tabular-only sink.
  fn write_seq(&mut self, _tokens: &[&str]) -> Result<()> {
    Ok(())
  }

  fn close(&mut self) -> Result<()> {
    if let Some(mut writer) = self.writer.take() {
      let _ = writer.flush();
    }
    Ok(())
  }
}
