use {
  crate::{AccountId, AccountType},
  serde::{Deserialize, Serialize},
  std::fmt::Display,
};

/// Creates and funds a new account from the native balance of the
/// operation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountOp {
  pub destination: AccountId,
  pub starting_balance: i64,
  pub account_type: AccountType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
  CreateAccount(CreateAccountOp),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
  /// Account on whose behalf this operation runs.
  ///
  /// When absent the operation runs on behalf of the source account of
  /// the enclosing transaction.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<AccountId>,

  pub body: OperationBody,
}

impl Operation {
  pub fn source_or(&self, tx_source: AccountId) -> AccountId {
    self.source.unwrap_or(tx_source)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateAccountResultCode {
  Success,
  Malformed,
  Underfunded,
  LowReserve,
  AlreadyExist,
  Underauthorized,
}

impl CreateAccountResultCode {
  pub fn is_success(self) -> bool {
    matches!(self, CreateAccountResultCode::Success)
  }
}

impl Display for CreateAccountResultCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      CreateAccountResultCode::Success => "CREATE_ACCOUNT_SUCCESS",
      CreateAccountResultCode::Malformed => "CREATE_ACCOUNT_MALFORMED",
      CreateAccountResultCode::Underfunded => "CREATE_ACCOUNT_UNDERFUNDED",
      CreateAccountResultCode::LowReserve => "CREATE_ACCOUNT_LOW_RESERVE",
      CreateAccountResultCode::AlreadyExist => "CREATE_ACCOUNT_ALREADY_EXIST",
      CreateAccountResultCode::Underauthorized => {
        "CREATE_ACCOUNT_UNDERAUTHORIZED"
      }
    })
  }
}

/// Outcome of a single operation inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationResult {
  /// The source account of the operation does not exist.
  NoAccount,

  CreateAccount(CreateAccountResultCode),
}

impl OperationResult {
  pub fn is_success(&self) -> bool {
    match self {
      OperationResult::NoAccount => false,
      OperationResult::CreateAccount(code) => code.is_success(),
    }
  }
}
