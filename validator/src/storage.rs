use {
  keystone_ledger::{InMemoryStateStore, State, StateDiff},
  keystone_primitives::{AccountId, AccountRecord, LedgerHeader},
  rmp_serde::{from_slice, to_vec},
  std::path::Path,
};

const HEADER_KEY: &[u8] = b"__last_closed_ledger";

/// Ledger state plus the header of the last closed ledger.
///
/// The header is written by [`State::commit_ledger`] in the same write
/// as the account mutations of its ledger.
pub trait NodeStore: State {
  fn last_closed(&self) -> Option<LedgerHeader>;
}

#[derive(Debug, Default)]
pub struct EphemeralStore {
  state: InMemoryStateStore,
  header: Option<LedgerHeader>,
}

impl State for EphemeralStore {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    self.state.get(id)
  }

  fn apply(&mut self, diff: StateDiff) {
    self.state.apply(diff)
  }

  fn commit_ledger(&mut self, diff: StateDiff, header: &LedgerHeader) {
    self.state.apply(diff);
    self.header = Some(*header);
  }
}

impl NodeStore for EphemeralStore {
  fn last_closed(&self) -> Option<LedgerHeader> {
    self.header
  }
}

pub struct OnDiskStateStore {
  tree: sled::Tree,
}

impl OnDiskStateStore {
  pub fn new(path: &Path, name: &str) -> Result<Self, sled::Error> {
    let db = sled::open(path)?;
    Ok(Self {
      tree: db.open_tree(name)?,
    })
  }

  fn write(&mut self, mut batch: sled::Batch, diff: &StateDiff) {
    for (id, record) in diff.iter() {
      batch.insert(id.as_ref(), to_vec(record).expect("serialization failed"));
    }
    self.tree.apply_batch(batch).expect("db error");
    self.tree.flush().expect("db tree flush failed");
  }
}

impl State for OnDiskStateStore {
  fn get(&self, id: &AccountId) -> Option<AccountRecord> {
    self
      .tree
      .get(id.as_ref())
      .expect("db io error")
      .map(|bytes| from_slice(&bytes).expect("db corrupt"))
  }

  fn apply(&mut self, diff: StateDiff) {
    self.write(sled::Batch::default(), &diff);
  }

  fn commit_ledger(&mut self, diff: StateDiff, header: &LedgerHeader) {
    let mut batch = sled::Batch::default();
    batch.insert(HEADER_KEY, to_vec(header).expect("serialization failed"));
    self.write(batch, &diff);
  }
}

impl NodeStore for OnDiskStateStore {
  fn last_closed(&self) -> Option<LedgerHeader> {
    self
      .tree
      .get(HEADER_KEY)
      .expect("db io error")
      .map(|bytes| from_slice(&bytes).expect("db corrupt"))
  }
}
