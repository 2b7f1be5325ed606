use {
  crate::LedgerPolicy,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

/// The starting balance floor hard-coded by earlier releases of the
/// ledger, in stroops.
pub const LEGACY_MIN_STARTING_BALANCE: i64 = 10;

/// Smallest starting balance a newly created account may be funded with.
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum StartingBalanceFloor {
  /// The minimum balance of an account without subentries, as computed by
  /// the ledger policy.
  #[default]
  Policy,

  /// A fixed number of stroops, independent of the ledger policy.
  Fixed(i64),
}

impl StartingBalanceFloor {
  pub fn resolve(&self, policy: &dyn LedgerPolicy) -> i64 {
    match self {
      StartingBalanceFloor::Policy => policy.minimum_balance(0),
      StartingBalanceFloor::Fixed(stroops) => *stroops,
    }
  }
}

/// Ledger wide parameters.
///
/// Every replica must run with the same configuration, otherwise they
/// will disagree on the outcome of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Stroops an account must hold for itself and for each of its
  /// subentries. Written into the genesis ledger header.
  pub base_reserve: i64,

  /// Floor applied to the starting balance of new accounts.
  pub starting_balance_floor: StartingBalanceFloor,

  /// Native asset minted into the root account at genesis.
  pub total_coins: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("Base reserve must not be negative, got {0}")]
  NegativeBaseReserve(i64),

  #[error("Starting balance floor must not be negative, got {0}")]
  NegativeStartingBalanceFloor(i64),

  #[error("Total coins must not be negative, got {0}")]
  NegativeTotalCoins(i64),
}

impl Config {
  /// Rejects parameters under which the reserve and funding checks of
  /// the ledger no longer hold.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.base_reserve < 0 {
      return Err(ConfigError::NegativeBaseReserve(self.base_reserve));
    }
    if let StartingBalanceFloor::Fixed(stroops) = self.starting_balance_floor {
      if stroops < 0 {
        return Err(ConfigError::NegativeStartingBalanceFloor(stroops));
      }
    }
    if self.total_coins < 0 {
      return Err(ConfigError::NegativeTotalCoins(self.total_coins));
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_reserve: 5_000_000,
      starting_balance_floor: StartingBalanceFloor::Policy,
      total_coins: 100_000_000_000_000_000, // 10^17 stroops
    }
  }
}
