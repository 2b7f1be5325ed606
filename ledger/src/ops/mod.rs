mod create_account;

pub use create_account::{validate_account_types, CreateAccountOpFrame};
use {
  crate::{Config, Error, LedgerDelta, LedgerPolicy, Metrics},
  keystone_primitives::{AccountId, Operation, OperationBody, OperationResult},
};

/// Counters emitted by the create-account operation.
pub mod create_account_meters {
  pub use super::create_account::{
    ALREADY_EXIST,
    APPLIED,
    LOW_RESERVE,
    MALFORMED_DESTINATION_EQUALS_SOURCE,
    MALFORMED_NEGATIVE_BALANCE,
    UNDERAUTHORIZED,
    UNDERFUNDED,
  };
}

/// Collaborators shared by all operations applied during a ledger close.
#[derive(Clone, Copy)]
pub struct ApplyContext<'a> {
  pub policy: &'a dyn LedgerPolicy,
  pub config: &'a Config,
  pub metrics: &'a dyn Metrics,
}

/// An operation bound to the account it runs on behalf of.
#[derive(Debug)]
pub enum OperationFrame<'a> {
  CreateAccount(CreateAccountOpFrame<'a>),
}

impl<'a> OperationFrame<'a> {
  pub fn new(op: &'a Operation, tx_source: AccountId) -> Self {
    let source = op.source_or(tx_source);
    match &op.body {
      OperationBody::CreateAccount(body) => {
        OperationFrame::CreateAccount(CreateAccountOpFrame::new(body, source))
      }
    }
  }

  pub fn source_id(&self) -> &AccountId {
    match self {
      OperationFrame::CreateAccount(frame) => frame.source_id(),
    }
  }

  /// Structural validation of the operation payload.
  pub fn check_valid(&self, metrics: &dyn Metrics) -> OperationResult {
    match self {
      OperationFrame::CreateAccount(frame) => {
        OperationResult::CreateAccount(frame.check_valid(metrics))
      }
    }
  }

  /// Applies the operation to the delta.
  ///
  /// The payload is validated again before anything is looked up, so an
  /// operation that slipped past admission still fails as malformed.
  pub fn apply(
    &self,
    delta: &mut LedgerDelta<'_>,
    ctx: &ApplyContext<'_>,
  ) -> Result<OperationResult, Error> {
    let checked = self.check_valid(ctx.metrics);
    if !checked.is_success() {
      return Ok(checked);
    }

    let Some(source) = delta.load_account(self.source_id()) else {
      return Ok(OperationResult::NoAccount);
    };

    match self {
      OperationFrame::CreateAccount(frame) => Ok(
        OperationResult::CreateAccount(frame.apply(source, delta, ctx)?),
      ),
    }
  }
}
