use {
  crate::{
    ops::ApplyContext,
    ConfigError,
    DeltaError,
    LedgerDelta,
    Metrics,
    OperationFrame,
    State,
  },
  keystone_primitives::{
    BalanceError,
    Transaction,
    TransactionResult,
    TransactionResultCode,
  },
  thiserror::Error,
  tracing::debug,
};

/// Conditions under which a ledger cannot be opened or closed. None of
/// them is caused by the content of a transaction. Any of them aborts
/// the ledger close and leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Ledger delta rejected a checked mutation: {0}")]
  Delta(#[from] DeltaError),

  #[error("Balance invariant violated: {0}")]
  Balance(#[from] BalanceError),

  #[error("Invalid ledger configuration: {0}")]
  Config(#[from] ConfigError),

  #[error("Ledger {0} is the last one, the ledger sequence is exhausted")]
  SequenceExhausted(u32),
}

/// Checks that every operation of a transaction is well formed.
///
/// This runs when a transaction is admitted and again right before it is
/// applied. Returns the malformed result if any operation fails.
pub fn check_valid(
  tx: &Transaction,
  metrics: &dyn Metrics,
) -> Option<TransactionResult> {
  let mut results = Vec::with_capacity(tx.operations.len());
  for op in &tx.operations {
    let result = OperationFrame::new(op, tx.source).check_valid(metrics);
    results.push(result);

    if !result.is_success() {
      return Some(TransactionResult {
        code: TransactionResultCode::Malformed,
        results,
      });
    }
  }
  None
}

/// Executes a transaction against the ledger delta.
///
/// Operations are applied in order in a child delta. If all of them
/// succeed their mutations are committed into `delta`, otherwise the
/// child is discarded and `delta` is left exactly as it was.
pub fn execute(
  tx: &Transaction,
  delta: &mut LedgerDelta<'_>,
  ctx: &ApplyContext<'_>,
) -> Result<TransactionResult, Error> {
  if let Some(malformed) = check_valid(tx, ctx.metrics) {
    return Ok(malformed);
  }

  let mut staged = delta.child();
  let mut results = Vec::with_capacity(tx.operations.len());
  for op in &tx.operations {
    let result = OperationFrame::new(op, tx.source).apply(&mut staged, ctx)?;
    results.push(result);

    if !result.is_success() {
      debug!(source = %tx.source, "transaction failed: {result:?}");
      return Ok(TransactionResult {
        code: TransactionResultCode::Failed,
        results,
      });
    }
  }

  let changes = staged.commit();
  delta.apply(changes);

  Ok(TransactionResult {
    code: TransactionResultCode::Success,
    results,
  })
}
