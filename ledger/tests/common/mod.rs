#![allow(dead_code)]

use {
  ed25519_dalek::Keypair,
  keystone_ledger::{
    ApplyContext,
    Config,
    Counters,
    InMemoryStateStore,
    LedgerDelta,
    LedgerPolicy,
    OperationFrame,
    StartingBalanceFloor,
    State,
    StateDiff,
    LEGACY_MIN_STARTING_BALANCE,
  },
  keystone_primitives::{
    AccountId,
    AccountRecord,
    AccountType,
    CreateAccountOp,
    LedgerHeader,
    Operation,
    OperationBody,
    OperationResult,
  },
  std::collections::BTreeMap,
};

/// Reserve policy that demands the same minimum balance from every
/// account regardless of its subentries.
pub struct FixedReserve(pub i64);

impl LedgerPolicy for FixedReserve {
  fn minimum_balance(&self, _subentry_count: u32) -> i64 {
    self.0
  }
}

pub fn random_account_id() -> AccountId {
  Keypair::generate(&mut rand::thread_rng()).public.into()
}

pub fn account(
  id: AccountId,
  account_type: AccountType,
  balance: i64,
) -> AccountRecord {
  AccountRecord {
    balance,
    seq_num: 1 << 32,
    ..AccountRecord::new(id, account_type)
  }
}

pub fn snapshot(
  accounts: impl IntoIterator<Item = AccountRecord>,
) -> InMemoryStateStore {
  let mut diff = StateDiff::default();
  for account in accounts {
    diff.insert(account);
  }
  let mut store = InMemoryStateStore::default();
  store.apply(diff);
  store
}

pub fn create_account(
  destination: AccountId,
  starting_balance: i64,
  account_type: AccountType,
) -> Operation {
  Operation {
    source: None,
    body: OperationBody::CreateAccount(CreateAccountOp {
      destination,
      starting_balance,
      account_type,
    }),
  }
}

/// Header of the ledger being closed in single operation tests.
pub fn header() -> LedgerHeader {
  LedgerHeader {
    ledger_seq: 7,
    base_reserve: 0,
    total_coins: 1_000_000,
  }
}

/// Configuration matching the historical hard-coded starting balance floor.
pub fn legacy_config() -> Config {
  Config {
    starting_balance_floor: StartingBalanceFloor::Fixed(
      LEGACY_MIN_STARTING_BALANCE,
    ),
    ..Config::default()
  }
}

#[derive(Debug)]
pub struct Outcome {
  pub result: OperationResult,
  pub changes: StateDiff,
  pub counters: BTreeMap<String, u64>,
}

/// Applies a single operation on behalf of `source` against a fresh
/// delta over `store`, the way the transaction executor does.
pub fn apply_op(
  store: &InMemoryStateStore,
  source: AccountId,
  op: &Operation,
  policy: &dyn LedgerPolicy,
  config: &Config,
) -> anyhow::Result<Outcome> {
  let counters = Counters::default();
  let ctx = ApplyContext {
    policy,
    config,
    metrics: &counters,
  };

  let mut delta = LedgerDelta::new(store, header());
  let result = OperationFrame::new(op, source).apply(&mut delta, &ctx)?;

  Ok(Outcome {
    result,
    changes: delta.commit(),
    counters: counters.snapshot(),
  })
}

/// Counter map containing exactly one mark of `name`.
pub fn marked_once(name: &str) -> BTreeMap<String, u64> {
  [(name.to_owned(), 1)].into_iter().collect()
}
