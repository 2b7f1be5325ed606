use {
  parking_lot::Mutex,
  std::{collections::BTreeMap, fmt::Display},
};

/// Identifies a counter as `namespace.outcome.reason`,
/// e.g. `op-create-account.failure.underfunded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Meter {
  pub namespace: &'static str,
  pub outcome: &'static str,
  pub reason: &'static str,
}

impl Meter {
  pub const fn new(
    namespace: &'static str,
    outcome: &'static str,
    reason: &'static str,
  ) -> Self {
    Self {
      namespace,
      outcome,
      reason,
    }
  }

  pub fn name(&self) -> String {
    self.to_string()
  }
}

impl Display for Meter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}.{}.{}", self.namespace, self.outcome, self.reason)
  }
}

/// Destination of counters emitted while applying operations.
pub trait Metrics: Send + Sync {
  fn mark(&self, meter: Meter);
}

/// Forwards counters to the process-wide recorder installed
/// through the `metrics` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct Recorder;

impl Metrics for Recorder {
  fn mark(&self, meter: Meter) {
    metrics::increment_counter!(meter.name());
  }
}

/// Keeps counters in memory.
#[derive(Debug, Default)]
pub struct Counters {
  marks: Mutex<BTreeMap<String, u64>>,
}

impl Counters {
  /// Current value of a counter, zero if it was never marked.
  pub fn get(&self, name: &str) -> u64 {
    self.marks.lock().get(name).copied().unwrap_or(0)
  }

  /// All counters marked so far, ordered by name.
  pub fn snapshot(&self) -> BTreeMap<String, u64> {
    self.marks.lock().clone()
  }

  pub fn total(&self) -> u64 {
    self.marks.lock().values().sum()
  }
}

impl Metrics for Counters {
  fn mark(&self, meter: Meter) {
    *self.marks.lock().entry(meter.name()).or_default() += 1;
  }
}
