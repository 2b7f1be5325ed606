use {
  crate::{
    execution,
    genesis,
    ops::ApplyContext,
    Config,
    ConfigError,
    Error,
    LedgerDelta,
    Metrics,
    ReservePolicy,
    State,
    StateDiff,
  },
  keystone_primitives::{
    AccountId,
    AccountRecord,
    LedgerHeader,
    Transaction,
    TransactionResult,
  },
  tracing::info,
};

/// Outcome of closing one ledger.
#[derive(Debug, Clone)]
pub struct LedgerClose {
  pub header: LedgerHeader,

  /// Results in the order the transactions were applied.
  pub results: Vec<TransactionResult>,

  /// All account mutations committed by this ledger.
  pub changes: StateDiff,
}

/// Replicated ledger state and the header of the last closed ledger.
pub struct Ledger<S: State> {
  store: S,
  header: LedgerHeader,
  config: Config,
}

impl<S: State> Ledger<S> {
  /// Initializes a new ledger whose root account holds all coins.
  pub fn genesis(
    mut store: S,
    root: AccountId,
    config: Config,
  ) -> Result<Self, Error> {
    config.validate()?;
    let (header, state) = genesis::genesis(root, &config);
    store.commit_ledger(state, &header);
    info!("genesis ledger created, root account {root}");
    Ok(Self {
      store,
      header,
      config,
    })
  }

  /// Resumes a ledger from a store whose last closed ledger is `header`.
  pub fn open(
    store: S,
    header: LedgerHeader,
    config: Config,
  ) -> Result<Self, Error> {
    config.validate()?;
    if header.base_reserve < 0 {
      return Err(ConfigError::NegativeBaseReserve(header.base_reserve).into());
    }
    Ok(Self {
      store,
      header,
      config,
    })
  }

  /// Header of the last closed ledger.
  pub fn header(&self) -> &LedgerHeader {
    &self.header
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn load_account(&self, id: &AccountId) -> Option<AccountRecord> {
    self.store.get(id)
  }

  /// Applies an ordered set of transactions as the next ledger.
  ///
  /// Transactions are executed in the given order, each of them sees the
  /// mutations committed by the ones before it. The account mutations and
  /// the new header reach the store in one commit. On error the store is
  /// left untouched and the ledger is not advanced.
  pub fn close(
    &mut self,
    transactions: &[Transaction],
    metrics: &dyn Metrics,
  ) -> Result<LedgerClose, Error> {
    let header = self
      .header
      .next()
      .ok_or(Error::SequenceExhausted(self.header.ledger_seq))?;
    let policy = ReservePolicy::from(&header);
    let ctx = ApplyContext {
      policy: &policy,
      config: &self.config,
      metrics,
    };

    let mut delta = LedgerDelta::new(&self.store, header);
    let mut results = Vec::with_capacity(transactions.len());
    for tx in transactions {
      results.push(execution::execute(tx, &mut delta, &ctx)?);
    }
    let changes = delta.commit();

    self.store.commit_ledger(changes.clone(), &header);
    self.header = header;

    info!(
      "closed ledger {} with {} transactions and {} account mutations",
      header.ledger_seq,
      results.len(),
      changes.len()
    );

    Ok(LedgerClose {
      header,
      results,
      changes,
    })
  }
}
