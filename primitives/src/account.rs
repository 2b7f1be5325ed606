use {
  crate::AccountId,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

/// Role of an account in the tiered trust hierarchy of the ledger.
///
/// The numeric tags are part of the persisted and replicated state and
/// must never be renumbered. No ordering between the tags is implied,
/// which account types may create which other account types is decided
/// by the authorization table of the create-account operation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum AccountType {
  Foundation = 0,
  Lbo = 1,
  Operator = 2,
  Issuer = 3,
  Client = 4,
}

impl AccountType {
  pub const ALL: [AccountType; 5] = [
    AccountType::Foundation,
    AccountType::Lbo,
    AccountType::Operator,
    AccountType::Issuer,
    AccountType::Client,
  ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BalanceError {
  #[error("Balance of {0} would overflow")]
  Overflow(AccountId),

  #[error("Balance of {0} would become negative")]
  Negative(AccountId),
}

/// A ledger entry describing one account and its native asset balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
  pub id: AccountId,

  /// Native asset balance in stroops.
  pub balance: i64,

  /// Sequence number of the last transaction submitted by this account.
  ///
  /// Newly created accounts start at the starting sequence number of the
  /// ledger in which they were created.
  pub seq_num: u64,

  pub account_type: AccountType,

  /// Number of auxiliary entries (trustlines, offers, signers) owned by
  /// this account, each of them raising its minimum balance.
  pub subentry_count: u32,
}

impl AccountRecord {
  /// Creates an empty account with zero balance and no subentries.
  pub fn new(id: AccountId, account_type: AccountType) -> Self {
    Self {
      id,
      balance: 0,
      seq_num: 0,
      account_type,
      subentry_count: 0,
    }
  }

  /// Adds a signed amount to the balance of this account.
  ///
  /// The record is left untouched if the new balance would overflow or
  /// drop below zero.
  pub fn add_balance(&mut self, delta: i64) -> Result<(), BalanceError> {
    let balance = self
      .balance
      .checked_add(delta)
      .ok_or(BalanceError::Overflow(self.id))?;
    if balance < 0 {
      return Err(BalanceError::Negative(self.id));
    }
    self.balance = balance;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::{AccountId, AccountRecord, AccountType, BalanceError};

  fn record(balance: i64) -> AccountRecord {
    AccountRecord {
      balance,
      ..AccountRecord::new(AccountId::from_bytes([1; 32]), AccountType::Client)
    }
  }

  #[test]
  fn add_balance_applies_signed_amounts() {
    let mut account = record(100);
    assert_eq!(account.add_balance(-40), Ok(()));
    assert_eq!(account.balance, 60);
    assert_eq!(account.add_balance(15), Ok(()));
    assert_eq!(account.balance, 75);
  }

  #[test]
  fn add_balance_rejects_negative_result() {
    let mut account = record(10);
    assert_eq!(
      account.add_balance(-11),
      Err(BalanceError::Negative(account.id))
    );
    assert_eq!(account.balance, 10);
  }

  #[test]
  fn add_balance_rejects_overflow() {
    let mut account = record(i64::MAX - 1);
    assert_eq!(account.add_balance(2), Err(BalanceError::Overflow(account.id)));
    assert_eq!(account.balance, i64::MAX - 1);
  }

  #[test]
  fn account_type_tags_are_stable() {
    let tags: Vec<u32> = AccountType::ALL.iter().map(|t| *t as u32).collect();
    assert_eq!(tags, vec![0, 1, 2, 3, 4]);
  }
}
