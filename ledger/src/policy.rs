use keystone_primitives::LedgerHeader;

/// Reserve rules of the ledger.
pub trait LedgerPolicy {
  /// Smallest balance an account with the given number of subentries
  /// must keep.
  fn minimum_balance(&self, subentry_count: u32) -> i64;
}

/// Reserve policy driven by the base reserve of the ledger header.
///
/// An account must hold two base reserves for itself and one more for
/// every subentry it owns. A negative base reserve counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservePolicy {
  base_reserve: i64,
}

impl ReservePolicy {
  pub fn new(base_reserve: i64) -> Self {
    Self { base_reserve }
  }
}

impl From<&LedgerHeader> for ReservePolicy {
  fn from(header: &LedgerHeader) -> Self {
    Self::new(header.base_reserve)
  }
}

impl LedgerPolicy for ReservePolicy {
  fn minimum_balance(&self, subentry_count: u32) -> i64 {
    (2 + subentry_count as i64).saturating_mul(self.base_reserve.max(0))
  }
}
