use {
  crate::{Config, StateDiff},
  keystone_primitives::{AccountId, AccountRecord, AccountType, LedgerHeader},
};

/// Builds the genesis ledger.
///
/// The genesis state holds a single FOUNDATION account owning all
/// native coins in existence. Every other account descends from it
/// through create-account operations.
pub fn genesis(root: AccountId, config: &Config) -> (LedgerHeader, StateDiff) {
  let header = LedgerHeader::genesis(config.base_reserve, config.total_coins);

  let mut state = StateDiff::default();
  state.insert(AccountRecord {
    id: root,
    balance: config.total_coins,
    seq_num: header.starting_sequence_number(),
    account_type: AccountType::Foundation,
    subentry_count: 0,
  });

  (header, state)
}

#[cfg(test)]
mod tests {
  use {
    super::genesis,
    crate::{Config, State},
    keystone_primitives::{AccountId, AccountType},
  };

  #[test]
  fn root_owns_all_coins() {
    let root = AccountId::from_bytes([42; 32]);
    let config = Config::default();
    let (header, state) = genesis(root, &config);

    assert_eq!(header.ledger_seq, 1);
    assert_eq!(header.total_coins, config.total_coins);
    assert_eq!(state.len(), 1);

    let account = state.get(&root).unwrap();
    assert_eq!(account.account_type, AccountType::Foundation);
    assert_eq!(account.balance, config.total_coins);
    assert_eq!(account.seq_num, 1 << 32);
  }
}
