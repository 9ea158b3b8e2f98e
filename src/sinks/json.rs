// Line-delimited JSON record output, one self-describing object per dump.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::Result;
use crate::model::KvBuffer;
use crate::sinks::LogSink;

/// Serializes each dumped batch as one newline-terminated JSON object.
/// Tensor-extracted scalars flatten to plain floats; keys come out in
/// lexicographic order.
pub struct JsonSink<W: Write> {
  out: W,
}

impl<W: Write> JsonSink<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  /// Consumes the sink, returning the underlying stream.
  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write + Send> LogSink for JsonSink<W> {
  fn write_kvs(&mut self, kvs: &KvBuffer) -> Result<()> {
    let record: BTreeMap<_, _> = kvs.iter().collect();
    serde_json::to_writer(&mut self.out, &record)?;
    self.out.write_all(b"\n")?;
    self.out.flush()?;
    Ok(())
  }

  // Tabular-only sink.
  fn write_seq(&mut self, _tokens: &[&str]) -> Result<()> {
    Ok(())
  }

  fn close(&mut self) -> Result<()> {
    self.out.flush()?;
    Ok(())
  }
}
