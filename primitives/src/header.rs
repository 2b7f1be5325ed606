use serde::{Deserialize, Serialize};

/// Summary of the ledger that is currently being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHeader {
  /// Sequence number of this ledger, the genesis ledger is 1.
  pub ledger_seq: u32,

  /// Stroops an account must keep for itself and for every subentry.
  pub base_reserve: i64,

  /// Total native asset in existence.
  pub total_coins: i64,
}

impl LedgerHeader {
  pub fn genesis(base_reserve: i64, total_coins: i64) -> Self {
    Self {
      ledger_seq: 1,
      base_reserve,
      total_coins,
    }
  }

  /// Header of the ledger that follows this one, or `None` once the
  /// ledger sequence is exhausted.
  pub fn next(&self) -> Option<Self> {
    Some(Self {
      ledger_seq: self.ledger_seq.checked_add(1)?,
      ..*self
    })
  }

  /// Sequence number given to accounts created while this ledger closes.
  ///
  /// The ledger sequence occupies the upper 32 bits, so sequence numbers
  /// of accounts created in later ledgers can never collide with those
  /// already consumed by accounts created earlier.
  pub fn starting_sequence_number(&self) -> u64 {
    (self.ledger_seq as u64) << 32
  }
}

#[cfg(test)]
mod tests {
  use super::LedgerHeader;

  #[test]
  fn starting_sequence_number_tracks_ledger() {
    let genesis = LedgerHeader::genesis(10, 1000);
    assert_eq!(genesis.starting_sequence_number(), 1 << 32);

    let next = genesis.next().unwrap();
    assert_eq!(next.ledger_seq, 2);
    assert_eq!(next.base_reserve, 10);
    assert_eq!(next.starting_sequence_number(), 2 << 32);
  }

  #[test]
  fn last_ledger_has_no_successor() {
    let last = LedgerHeader {
      ledger_seq: u32::MAX,
      ..LedgerHeader::genesis(10, 1000)
    };
    assert_eq!(last.next(), None);
    assert_eq!(last.starting_sequence_number(), (u32::MAX as u64) << 32);
  }
}
