use {
  keystone_ledger::{check_valid, Metrics},
  keystone_primitives::Transaction,
  std::collections::VecDeque,
  tracing::warn,
};

/// Transactions admitted for inclusion in upcoming ledgers, in arrival
/// order.
#[derive(Default)]
pub struct Mempool {
  txs: VecDeque<Transaction>,
}

impl Mempool {
  /// Admits a transaction unless one of its operations is malformed.
  pub fn consume(&mut self, tx: Transaction, metrics: &dyn Metrics) -> bool {
    if let Some(rejected) = check_valid(&tx, metrics) {
      warn!(source = %tx.source, "rejected malformed transaction: {rejected:?}");
      return false;
    }
    self.txs.push_back(tx);
    true
  }

  /// Takes up to `max` transactions for the next ledger.
  pub fn produce(&mut self, max: usize) -> Vec<Transaction> {
    let count = max.min(self.txs.len());
    self.txs.drain(..count).collect()
  }

  pub fn len(&self) -> usize {
    self.txs.len()
  }
}
