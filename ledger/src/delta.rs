use {
  crate::{State, StateDiff},
  keystone_primitives::{AccountId, AccountRecord, LedgerHeader},
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
  #[error("Trying to create an account ({0}) that already exists.")]
  AccountAlreadyExists(AccountId),

  #[error("Trying to mutate an account ({0}) that does not exist.")]
  AccountDoesNotExist(AccountId),
}

/// A journal of pending account mutations layered over a ledger snapshot.
///
/// All reads go through the delta first and fall back to the underlying
/// state, so an operation observes every mutation staged by operations
/// preceding it. Deltas nest: a transaction stages its changes in a child
/// delta of the ledger-close delta and either commits them into the
/// parent or drops the child, leaving the parent untouched.
pub struct LedgerDelta<'a> {
  base: &'a dyn State,
  header: LedgerHeader,
  changes: StateDiff,
}

impl<'a> LedgerDelta<'a> {
  pub fn new(base: &'a dyn State, header: LedgerHeader) -> Self {
    Self {
      base,
      header,
      changes: StateDiff::default(),
    }
  }

  /// Opens a nested delta that reads through this one.
  pub fn child(&self) -> LedgerDelta<'_> {
    LedgerDelta::new(self, self.header)
  }

  /// Header of the ledger being closed.
  pub fn header(&self) -> &LedgerHeader {
    &self.header
  }

  /// Latest version of an account as seen by this delta.
  pub fn load_account(&self, id: &AccountId) -> Option<AccountRecord> {
    self.changes.get(id).or_else(|| self.base.get(id))
  }

  /// Stages the creation of a new account.
  ///
  /// Fails if an account with the same id is visible to this delta,
  /// either staged earlier or present in the underlying state.
  pub fn store_add(&mut self, record: AccountRecord) -> Result<(), DeltaError> {
    if self.load_account(&record.id).is_some() {
      return Err(DeltaError::AccountAlreadyExists(record.id));
    }
    self.changes.insert(record);
    Ok(())
  }

  /// Stages a new version of an existing account.
  ///
  /// Staging the same account again replaces the earlier version.
  pub fn store_change(
    &mut self,
    record: AccountRecord,
  ) -> Result<(), DeltaError> {
    if self.load_account(&record.id).is_none() {
      return Err(DeltaError::AccountDoesNotExist(record.id));
    }
    self.changes.update(record);
    Ok(())
  }

  /// Mutations staged so far.
  pub fn changes(&self) -> &StateDiff {
    &self.changes
  }

  /// Ends the delta and hands over everything it staged.
  ///
  /// Dropping a delta without committing discards its mutations.
  pub fn commit(self) -> StateDiff {
    self.changes
  }
}

impl State for LedgerDelta<'_> {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    self.load_account(id)
  }

  fn apply(&mut self, diff: StateDiff) {
    self.changes.apply(diff);
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{DeltaError, LedgerDelta},
    crate::{InMemoryStateStore, State, StateDiff},
    keystone_primitives::{AccountId, AccountRecord, AccountType, LedgerHeader},
  };

  fn account(seed: u8, balance: i64) -> AccountRecord {
    AccountRecord {
      balance,
      ..AccountRecord::new(AccountId::from_bytes([seed; 32]), AccountType::Client)
    }
  }

  fn snapshot() -> InMemoryStateStore {
    let mut store = InMemoryStateStore::default();
    let mut diff = StateDiff::default();
    diff.insert(account(1, 1000));
    store.apply(diff);
    store
  }

  #[test]
  fn store_add_rejects_duplicates_in_base_and_delta() {
    let store = snapshot();
    let mut delta = LedgerDelta::new(&store, LedgerHeader::genesis(0, 0));

    assert_eq!(
      delta.store_add(account(1, 5)),
      Err(DeltaError::AccountAlreadyExists(account(1, 0).id))
    );

    delta.store_add(account(2, 5)).unwrap();
    assert_eq!(
      delta.store_add(account(2, 6)),
      Err(DeltaError::AccountAlreadyExists(account(2, 0).id))
    );
    assert_eq!(delta.load_account(&account(2, 0).id).unwrap().balance, 5);
  }

  #[test]
  fn store_change_requires_existing_account() {
    let store = snapshot();
    let mut delta = LedgerDelta::new(&store, LedgerHeader::genesis(0, 0));

    assert_eq!(
      delta.store_change(account(3, 1)),
      Err(DeltaError::AccountDoesNotExist(account(3, 0).id))
    );
    assert!(delta.changes().is_empty());

    delta.store_change(account(1, 900)).unwrap();
    delta.store_change(account(1, 800)).unwrap();
    assert_eq!(delta.changes().len(), 1);
    assert_eq!(delta.load_account(&account(1, 0).id).unwrap().balance, 800);

    // the snapshot itself is never touched by a delta
    assert_eq!(store.get(&account(1, 0).id).unwrap().balance, 1000);
  }

  #[test]
  fn child_commit_and_discard() {
    let store = snapshot();
    let mut parent = LedgerDelta::new(&store, LedgerHeader::genesis(0, 0));

    {
      let mut child = parent.child();
      child.store_add(account(5, 50)).unwrap();
      assert!(child.load_account(&account(5, 0).id).is_some());
      // dropped without commit
    }
    assert!(parent.load_account(&account(5, 0).id).is_none());

    let mut child = parent.child();
    child.store_change(account(1, 950)).unwrap();
    child.store_add(account(6, 50)).unwrap();
    let diff = child.commit();
    parent.apply(diff);

    assert_eq!(parent.load_account(&account(1, 0).id).unwrap().balance, 950);
    assert!(parent.changes().is_created(&account(6, 0).id));
    assert!(!parent.changes().is_created(&account(1, 0).id));
  }
}
