// Human-readable boxed-table output, for the console or a plain text file.

use std::io::Write;

use crate::error::Result;
use crate::model::{KvBuffer, KvValue};
use crate::sinks::LogSink;

// Strings wider than this are cut to 20 chars plus an ellipsis marker.
const TRUNCATE_AT: usize = 23;
const TRUNCATE_TO: usize = 20;

/// Renders each dumped batch as a boxed table with lexicographically sorted
/// keys, and free-text messages as plain lines. Bound to any `io::Write`
/// stream; the factory uses stdout and `log.txt`.
pub struct HumanSink<W: Write> {
  out: W,
}

impl<W: Write> HumanSink<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  /// Consumes the sink, returning the underlying stream.
  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write + Send> LogSink for HumanSink<W> {
  fn write_kvs(&mut self, kvs: &KvBuffer) -> Result<()> {
    // Nothing to tabulate; an empty table has no well-defined widths.
    if kvs.is_empty() {
      return Ok(());
    }

    let mut rows: Vec<(String, String)> = kvs
      .iter()
      .map(|(key, val)| {
        let valstr = match val {
          KvValue::Float(v) | KvValue::TensorScalar(v) => {
            format!("{:<8}", format_compact_float(*v))
          }
          other => other.to_string(),
        };
        (truncate(key), truncate(&valstr))
      })
      .collect();
    rows.sort();

    let keywidth = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let valwidth = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let dashes = "-".repeat(keywidth + valwidth + 7);
    let mut table = String::with_capacity((rows.len() + 2) * (dashes.len() + 1));
    table.push_str(&dashes);
    for (key, val) in &rows {
      table.push('\n');
      table.push_str(&format!(
        "| {:<kw$} | {:<vw$} |",
        key,
        val,
        kw = keywidth,
        vw = valwidth
      ));
    }
    table.push('\n');
    table.push_str(&dashes);
    table.push('\n');

    self.out.write_all(table.as_bytes())?;
    self.out.flush()?;
    Ok(())
  }

  fn write_seq(&mut self, tokens: &[&str]) -> Result<()> {
    for token in tokens {
      self.out.write_all(token.as_bytes())?;
    }
    self.out.write_all(b"\n")?;
    self.out.flush()?;
    Ok(())
  }

  fn close(&mut self) -> Result<()> {
    self.out.flush()?;
    Ok(())
  }
}

fn truncate(s: &str) -> String {
  if s.chars().count() > TRUNCATE_AT {
    let head: String = s.chars().take(TRUNCATE_TO).collect();
    format!("{}...", head)
  } else {
    s.to_string()
  }
}

/// Formats a float with 3 significant digits, printf `%.3g` style: fixed
/// notation near unity, exponent notation (two-digit signed exponent) for
/// magnitudes past 1e3 or below 1e-4, trailing zeros stripped.
fn format_compact_float(v: f64) -> String {
  if v.is_nan() {
    return "nan".to_string();
  }
  if v.is_infinite() {
    return if v > 0.0 { "inf" } else { "-inf" }.to_string();
  }
  if v == 0.0 {
    return "0".to_string();
  }

  // Round to 3 significant digits first, then pick the presentation from
  // the post-rounding exponent (999.9 rounds up into exponent notation).
  let sci = format!("{:.2e}", v);
  let (mantissa, exp_str) = match sci.split_once('e') {
    Some(parts) => parts,
    None => return sci,
  };
  let exp: i32 = exp_str.parse().unwrap_or(0);

  if exp < -4 || exp >= 3 {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", strip_trailing_zeros(mantissa), sign, exp.abs())
  } else {
    let decimals = (2 - exp).max(0) as usize;
    strip_trailing_zeros(&format!("{:.*}", decimals, v))
  }
}

fn strip_trailing_zeros(s: &str) -> String {
  if s.contains('.') {
    s.trim_end_matches('0').trim_end_matches('.').to_string()
  } else {
    s.to_string()
  }
}
