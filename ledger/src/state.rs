use {
  keystone_primitives::{AccountId, AccountRecord, LedgerHeader},
  serde::{Deserialize, Serialize},
  std::collections::{BTreeMap, BTreeSet},
};

/// Represents a change in the ledger accounts state.
///
/// State diffs are meant to be accumulated and logically the entire
/// state of the ledger is the result of cumulative application of
/// consecutive state diffs.
///
/// A transaction produces a state diff, a ledger close produces a
/// state diff which is all its successful transactions diffs merged
/// together in their application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDiff {
  upserts: BTreeMap<AccountId, AccountRecord>,
  created: BTreeSet<AccountId>,
}

impl StateDiff {
  /// Records a newly created account.
  pub fn insert(&mut self, record: AccountRecord) -> Option<AccountRecord> {
    self.created.insert(record.id);
    self.upserts.insert(record.id, record)
  }

  /// Records a new version of an account that already exists.
  ///
  /// Repeated updates of the same account coalesce into one entry
  /// holding the latest version.
  pub fn update(&mut self, record: AccountRecord) -> Option<AccountRecord> {
    self.upserts.insert(record.id, record)
  }

  /// Merges a state diff with a newer diff.
  ///
  /// Applying the resulting diff is equivalent to applying the two
  /// merged diffs consecutively on any state store.
  pub fn merge(self, newer: StateDiff) -> StateDiff {
    let mut upserts = self.upserts;
    let mut created = self.created;
    upserts.extend(newer.upserts);
    created.extend(newer.created);
    StateDiff { upserts, created }
  }

  /// Iterate over all account changes in a state diff, ordered by
  /// account id.
  pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &AccountRecord)> {
    self.upserts.iter()
  }

  /// Accounts that did not exist before this diff.
  pub fn created(&self) -> impl Iterator<Item = &AccountRecord> {
    self.created.iter().filter_map(|id| self.upserts.get(id))
  }

  pub fn is_created(&self, id: &AccountId) -> bool {
    self.created.contains(id)
  }

  pub fn len(&self) -> usize {
    self.upserts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.upserts.is_empty()
  }
}

impl State for StateDiff {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    self.upserts.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    *self = std::mem::take(self).merge(diff);
  }
}

pub trait State {
  fn get(&self, id: &AccountId) -> Option<AccountRecord>;
  fn apply(&mut self, diff: StateDiff);

  /// Applies the mutations of a closed ledger together with its header.
  ///
  /// Stores that remember the last closed ledger must persist both in a
  /// single atomic write, so that a restart never observes the accounts
  /// of a ledger without its header or the other way around.
  fn commit_ledger(&mut self, diff: StateDiff, _header: &LedgerHeader) {
    self.apply(diff)
  }
}

impl<S: State + ?Sized> State for Box<S> {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    (**self).get(id)
  }

  fn apply(&mut self, diff: StateDiff) {
    (**self).apply(diff)
  }

  fn commit_ledger(&mut self, diff: StateDiff, header: &LedgerHeader) {
    (**self).commit_ledger(diff, header)
  }
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
  data: BTreeMap<AccountId, AccountRecord>,
}

impl InMemoryStateStore {
  pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &AccountRecord)> {
    self.data.iter()
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}

impl State for InMemoryStateStore {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    self.data.get(id).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    self.data.extend(diff.upserts);
  }
}

#[cfg(test)]
mod tests {
  use {
    crate::{InMemoryStateStore, State, StateDiff},
    keystone_primitives::{AccountId, AccountRecord, AccountType},
  };

  fn account(seed: u8, balance: i64) -> AccountRecord {
    AccountRecord {
      balance,
      ..AccountRecord::new(AccountId::from_bytes([seed; 32]), AccountType::Client)
    }
  }

  #[test]
  fn statediff_smoke() {
    let mut store = InMemoryStateStore::default();
    assert!(store.is_empty());

    let mut diff1 = StateDiff::default();
    diff1.insert(account(1, 10));
    diff1.insert(account(2, 20));
    store.apply(diff1);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&AccountId::from_bytes([1; 32])).unwrap().balance, 10);
    assert_eq!(store.get(&AccountId::from_bytes([2; 32])).unwrap().balance, 20);

    let mut diff2 = StateDiff::default();
    diff2.update(account(1, 5));
    store.apply(diff2);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&AccountId::from_bytes([1; 32])).unwrap().balance, 5);
  }

  #[test]
  fn merge_is_equivalent_to_consecutive_application() {
    let mut older = StateDiff::default();
    older.insert(account(1, 100));
    older.update(account(3, 7));

    let mut newer = StateDiff::default();
    newer.update(account(1, 60));
    newer.insert(account(2, 40));

    let mut consecutive = InMemoryStateStore::default();
    consecutive.apply(older.clone());
    consecutive.apply(newer.clone());

    let merged = older.merge(newer);
    let mut at_once = InMemoryStateStore::default();
    at_once.apply(merged.clone());

    assert_eq!(
      consecutive.iter().collect::<Vec<_>>(),
      at_once.iter().collect::<Vec<_>>()
    );

    // created in the older diff, changed in the newer one
    assert!(merged.is_created(&AccountId::from_bytes([1; 32])));
    assert!(merged.is_created(&AccountId::from_bytes([2; 32])));
    assert!(!merged.is_created(&AccountId::from_bytes([3; 32])));
    assert_eq!(merged.created().count(), 2);
  }

  #[test]
  fn repeated_updates_coalesce() {
    let mut diff = StateDiff::default();
    diff.update(account(9, 1));
    diff.update(account(9, 2));
    diff.update(account(9, 3));

    assert_eq!(diff.len(), 1);
    assert_eq!(diff.get(&AccountId::from_bytes([9; 32])).unwrap().balance, 3);
  }
}
