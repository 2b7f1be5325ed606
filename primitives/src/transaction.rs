use {
  crate::{AccountId, Operation, OperationResult},
  serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
  /// Default source account of all operations in this transaction.
  pub source: AccountId,

  /// Operations are applied in this order. Either all of their
  /// mutations are committed to the ledger, or none of them.
  pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionResultCode {
  /// All operations succeeded and their mutations were committed.
  Success,

  /// An operation failed while being applied, nothing was committed.
  Failed,

  /// An operation failed structural validation, nothing was applied.
  Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
  pub code: TransactionResultCode,

  /// Results of operations that were evaluated, in the same order as the
  /// operations of the transaction. Evaluation stops at the first failure.
  pub results: Vec<OperationResult>,
}

impl TransactionResult {
  pub fn is_success(&self) -> bool {
    self.code == TransactionResultCode::Success
  }
}
