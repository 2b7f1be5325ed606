use {
  super::ApplyContext,
  crate::{Error, LedgerDelta, Meter, Metrics, State},
  keystone_primitives::{
    AccountId,
    AccountRecord,
    AccountType,
    CreateAccountOp,
    CreateAccountResultCode,
  },
  tracing::debug,
};

const NAMESPACE: &str = "op-create-account";

pub const MALFORMED_NEGATIVE_BALANCE: Meter =
  Meter::new(NAMESPACE, "invalid", "malformed-negative-balance");
pub const MALFORMED_DESTINATION_EQUALS_SOURCE: Meter =
  Meter::new(NAMESPACE, "invalid", "malformed-destination-equals-source");
pub const ALREADY_EXIST: Meter =
  Meter::new(NAMESPACE, "failure", "already-exist");
pub const UNDERAUTHORIZED: Meter =
  Meter::new(NAMESPACE, "failure", "underauthorized");
pub const LOW_RESERVE: Meter = Meter::new(NAMESPACE, "failure", "low-reserve");
pub const UNDERFUNDED: Meter = Meter::new(NAMESPACE, "failure", "underfunded");
pub const APPLIED: Meter = Meter::new(NAMESPACE, "success", "apply");

#[derive(Debug, Clone, Copy)]
enum Creator {
  Any,
  Exactly(AccountType),
}

impl Creator {
  fn matches(self, account_type: AccountType) -> bool {
    match self {
      Creator::Any => true,
      Creator::Exactly(expected) => expected == account_type,
    }
  }
}

/// Which account types may create which account types.
///
/// Client accounts can be opened by anyone, every other creation must be
/// listed here explicitly.
const AUTHORIZED_CREATIONS: &[(Creator, AccountType)] = &[
  (Creator::Exactly(AccountType::Foundation), AccountType::Lbo),
  (Creator::Exactly(AccountType::Foundation), AccountType::Operator),
  (Creator::Exactly(AccountType::Foundation), AccountType::Issuer),
  (Creator::Exactly(AccountType::Lbo), AccountType::Issuer),
  (Creator::Any, AccountType::Client),
];

/// Checks whether an account of `source` type may create an account of
/// `destination` type.
pub fn validate_account_types(
  source: AccountType,
  destination: AccountType,
) -> bool {
  AUTHORIZED_CREATIONS
    .iter()
    .any(|(creator, created)| *created == destination && creator.matches(source))
}

/// Creates a new account funded by the source account of the operation.
#[derive(Debug)]
pub struct CreateAccountOpFrame<'a> {
  op: &'a CreateAccountOp,
  source_id: AccountId,
}

impl<'a> CreateAccountOpFrame<'a> {
  pub fn new(op: &'a CreateAccountOp, source_id: AccountId) -> Self {
    Self { op, source_id }
  }

  pub fn source_id(&self) -> &AccountId {
    &self.source_id
  }

  /// Structural validation of the operation payload.
  ///
  /// Does not look at the ledger state, so it gives the same answer at
  /// admission time and at apply time.
  pub fn check_valid(&self, metrics: &dyn Metrics) -> CreateAccountResultCode {
    if self.op.starting_balance <= 0 {
      return self.reject(
        metrics,
        MALFORMED_NEGATIVE_BALANCE,
        CreateAccountResultCode::Malformed,
      );
    }

    if self.op.destination == self.source_id {
      return self.reject(
        metrics,
        MALFORMED_DESTINATION_EQUALS_SOURCE,
        CreateAccountResultCode::Malformed,
      );
    }

    CreateAccountResultCode::Success
  }

  /// Debits `source` and stages the new account in `delta`.
  ///
  /// Failure codes leave the delta untouched. An `Err` means the delta
  /// refused a change that the preceding checks proved valid, the ledger
  /// is then in an inconsistent state and must not be closed.
  pub fn apply(
    &self,
    source: AccountRecord,
    delta: &mut LedgerDelta<'_>,
    ctx: &ApplyContext<'_>,
  ) -> Result<CreateAccountResultCode, Error> {
    if delta.load_account(&self.op.destination).is_some() {
      return Ok(self.reject(
        ctx.metrics,
        ALREADY_EXIST,
        CreateAccountResultCode::AlreadyExist,
      ));
    }

    if !validate_account_types(source.account_type, self.op.account_type) {
      return Ok(self.reject(
        ctx.metrics,
        UNDERAUTHORIZED,
        CreateAccountResultCode::Underauthorized,
      ));
    }

    let floor = ctx.config.starting_balance_floor.resolve(ctx.policy);
    if self.op.starting_balance < floor {
      return Ok(self.reject(
        ctx.metrics,
        LOW_RESERVE,
        CreateAccountResultCode::LowReserve,
      ));
    }

    // the debit below must never take the source under zero
    let min_balance = ctx.policy.minimum_balance(source.subentry_count).max(0);
    if source.balance.saturating_sub(min_balance) < self.op.starting_balance {
      return Ok(self.reject(
        ctx.metrics,
        UNDERFUNDED,
        CreateAccountResultCode::Underfunded,
      ));
    }

    let mut source = source;
    source.add_balance(-self.op.starting_balance)?;

    let destination = AccountRecord {
      id: self.op.destination,
      balance: self.op.starting_balance,
      seq_num: delta.header().starting_sequence_number(),
      account_type: self.op.account_type,
      subentry_count: 0,
    };

    // both records land in the delta or neither does
    let mut staged = delta.child();
    staged.store_change(source)?;
    staged.store_add(destination)?;
    let changes = staged.commit();
    delta.apply(changes);

    debug!(
      source = %self.source_id,
      destination = %self.op.destination,
      starting_balance = self.op.starting_balance,
      "account created"
    );
    ctx.metrics.mark(APPLIED);
    Ok(CreateAccountResultCode::Success)
  }

  fn reject(
    &self,
    metrics: &dyn Metrics,
    meter: Meter,
    code: CreateAccountResultCode,
  ) -> CreateAccountResultCode {
    debug!(
      source = %self.source_id,
      destination = %self.op.destination,
      "create account rejected: {code}"
    );
    metrics.mark(meter);
    code
  }
}
