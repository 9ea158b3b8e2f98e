use std::io;
use std::sync::{Arc, Mutex};

use tracklog::{KvBuffer, KvValue, Level, LogSink, Logger};

// Captures everything a logger fans out, for assertions.
#[derive(Default)]
struct Recorded {
  batches: Vec<KvBuffer>,
  lines: Vec<String>,
  closed: usize,
}

struct RecordingSink(Arc<Mutex<Recorded>>);

impl LogSink for RecordingSink {
  fn write_kvs(&mut self, kvs: &KvBuffer) -> tracklog::Result<()> {
    self.0.lock().unwrap().batches.push(kvs.clone());
    Ok(())
  }

  fn write_seq(&mut self, tokens: &[&str]) -> tracklog::Result<()> {
    self.0.lock().unwrap().lines.push(tokens.concat());
    Ok(())
  }

  fn close(&mut self) -> tracklog::Result<()> {
    self.0.lock().unwrap().closed += 1;
    Ok(())
  }
}

// Fails every batch write, to exercise the fan-out failure policy.
struct FailingSink;

impl LogSink for FailingSink {
  fn write_kvs(&mut self, _kvs: &KvBuffer) -> tracklog::Result<()> {
    Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
  }

  fn write_seq(&mut self, _tokens: &[&str]) -> tracklog::Result<()> {
    Ok(())
  }

  fn close(&mut self) -> tracklog::Result<()> {
    Ok(())
  }
}

fn new_test_logger() -> (Logger, Arc<Mutex<Recorded>>) {
  let recorded = Arc::new(Mutex::new(Recorded::default()));
  let logger = Logger::new(None, vec![Box::new(RecordingSink(recorded.clone()))]);
  (logger, recorded)
}

#[test]
fn test_last_write_per_key_wins() {
  let (mut logger, recorded) = new_test_logger();

  logger.log_kv("a", 3);
  logger.log_kv("b", 2.5);
  logger.log_kv("a", 5.5);
  logger.dump_kvs().unwrap();

  let recorded = recorded.lock().unwrap();
  assert_eq!(recorded.batches.len(), 1);
  let batch = &recorded.batches[0];
  assert_eq!(batch.len(), 2);
  assert_eq!(batch["a"], KvValue::Float(5.5));
  assert_eq!(batch["b"], KvValue::Float(2.5));
}

#[test]
fn test_dump_clears_buffer_with_zero_sinks() {
  let mut logger = Logger::new(None, Vec::new());
  logger.log_kv("a", 1);
  logger.dump_kvs().unwrap();
  assert!(logger.kvs().is_empty());
}

#[test]
fn test_disabled_dump_is_fully_skipped() {
  let (mut logger, recorded) = new_test_logger();

  logger.set_level(Level::Disabled);
  logger.log_kv("a", 1);
  logger.dump_kvs().unwrap();

  // No sink writes, and the buffer survives.
  assert!(recorded.lock().unwrap().batches.is_empty());
  assert_eq!(logger.kvs().len(), 1);

  // Re-enabling dumps the retained buffer.
  logger.set_level(Level::Info);
  logger.dump_kvs().unwrap();
  assert_eq!(recorded.lock().unwrap().batches.len(), 1);
  assert!(logger.kvs().is_empty());
}

#[test]
fn test_log_kvs_applies_per_entry_overwrite() {
  let (mut logger, recorded) = new_test_logger();

  logger.log_kv("a", 1);
  logger.log_kvs(vec![("a", 2.0), ("b", 3.0)]);
  logger.dump_kvs().unwrap();

  let recorded = recorded.lock().unwrap();
  let batch = &recorded.batches[0];
  assert_eq!(batch["a"], KvValue::Float(2.0));
  assert_eq!(batch["b"], KvValue::Float(3.0));
}

#[test]
fn test_threshold_filters_free_text() {
  let (mut logger, recorded) = new_test_logger();

  logger.set_level(Level::Warn);
  logger.debug(&["d"]).unwrap();
  logger.info(&["i"]).unwrap();
  logger.warn(&["w1", "w2"]).unwrap();
  logger.error(&["e"]).unwrap();

  let recorded = recorded.lock().unwrap();
  assert_eq!(recorded.lines, vec!["w1w2".to_string(), "e".to_string()]);
}

#[test]
fn test_buffer_snapshot_round_trips_values() {
  let (mut logger, _recorded) = new_test_logger();

  logger.log_kv("int", 7);
  logger.log_kv("float", 1.25);
  logger.log_kv("text", "hello");
  logger.log_kv("tensor", KvValue::tensor(0.5));

  let kvs = logger.kvs();
  assert_eq!(kvs["int"], KvValue::Int(7));
  assert_eq!(kvs["float"], KvValue::Float(1.25));
  assert_eq!(kvs["text"], KvValue::Str("hello".to_string()));
  // Tensor scalars stay tagged in the buffer; coercion is a sink concern.
  assert_eq!(kvs["tensor"], KvValue::TensorScalar(0.5));
}

#[test]
fn test_dump_failure_is_fail_fast_and_still_clears() {
  let recorded = Arc::new(Mutex::new(Recorded::default()));
  let mut logger = Logger::new(
    None,
    vec![
      Box::new(FailingSink),
      Box::new(RecordingSink(recorded.clone())),
    ],
  );

  logger.log_kv("a", 1);
  assert!(logger.dump_kvs().is_err());

  // The sink after the failing one is skipped for that dump, but the
  // buffer is cleared regardless.
  assert!(recorded.lock().unwrap().batches.is_empty());
  assert!(logger.kvs().is_empty());
}

#[test]
fn test_close_reaches_every_sink() {
  let first = Arc::new(Mutex::new(Recorded::default()));
  let second = Arc::new(Mutex::new(Recorded::default()));
  let mut logger = Logger::new(
    None,
    vec![
      Box::new(RecordingSink(first.clone())),
      Box::new(RecordingSink(second.clone())),
    ],
  );

  logger.close().unwrap();
  assert_eq!(first.lock().unwrap().closed, 1);
  assert_eq!(second.lock().unwrap().closed, 1);
}
