mod account;
mod account_id;
mod header;
mod operation;
mod transaction;

pub use {
  account::{AccountRecord, AccountType, BalanceError},
  account_id::{AccountId, Error as AccountIdError},
  header::LedgerHeader,
  operation::{
    CreateAccountOp,
    CreateAccountResultCode,
    Operation,
    OperationBody,
    OperationResult,
  },
  transaction::{Transaction, TransactionResult, TransactionResultCode},
};
