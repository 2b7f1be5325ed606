use {
  crate::storage::{EphemeralStore, NodeStore, OnDiskStateStore},
  clap::Parser,
  humantime::Duration,
  keystone_ledger::{Config, StartingBalanceFloor},
  keystone_primitives::AccountId,
  std::{net::SocketAddr, path::PathBuf},
};

/// Keystone Ledger Node
///
/// A single node instance of the keystone ledger for local use with
/// no consensus algorithm, for dev, CI and test scenarios. It closes a
/// ledger every block interval with the transactions waiting in its
/// mempool.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Directory of the persistent ledger store. The ledger is kept in
  /// memory and lost on exit when omitted.
  #[clap(long, short, value_name = "PATH")]
  data_dir: Option<PathBuf>,

  /// Root FOUNDATION account that receives all coins at genesis
  #[clap(long, value_name = "ACCOUNT")]
  root: Option<AccountId>,

  /// JSON file with an array of transactions to submit to the mempool
  #[clap(long, short = 'x', value_name = "PATH")]
  transactions: Option<PathBuf>,

  /// Ledger close interval
  #[clap(long, short = 't', value_name = "DURATION", default_value = "2s")]
  block_time: Duration,

  /// Maximum number of transactions applied in one ledger
  #[clap(long, value_name = "COUNT", default_value = "100")]
  max_tx_per_ledger: usize,

  /// Stroops an account must hold for itself and for each subentry
  #[clap(long, value_name = "STROOPS", default_value = "5000000")]
  base_reserve: i64,

  /// Fixed floor for the starting balance of new accounts. When omitted
  /// the reserve of an account without subentries is used.
  #[clap(long, value_name = "STROOPS")]
  min_starting_balance: Option<i64>,

  /// Native coins minted into the root account at genesis
  #[clap(long, value_name = "STROOPS", default_value = "100000000000000000")]
  total_coins: i64,

  /// Address of the prometheus metrics endpoint
  #[clap(long, value_name = "ADDRESS", default_value = "0.0.0.0:9000")]
  metrics_addr: SocketAddr,
}

impl SystemSettings {
  /// Ledger parameters given on the command line, rejected when any of
  /// them is negative.
  pub fn ledger_config(&self) -> anyhow::Result<Config> {
    let config = Config {
      base_reserve: self.base_reserve,
      starting_balance_floor: match self.min_starting_balance {
        Some(stroops) => StartingBalanceFloor::Fixed(stroops),
        None => StartingBalanceFloor::Policy,
      },
      total_coins: self.total_coins,
    };
    config.validate()?;
    Ok(config)
  }

  /// Returns an instance of the ledger store. It is either an in-memory
  /// ephemeral storage if no data directory is provided or a persistent
  /// on-disk store otherwise.
  pub fn storage(&self) -> anyhow::Result<Box<dyn NodeStore>> {
    Ok(match &self.data_dir {
      Some(path) => Box::new(OnDiskStateStore::new(path, "ledger")?),
      None => Box::new(EphemeralStore::default()),
    })
  }

  pub fn root(&self) -> Option<AccountId> {
    self.root
  }

  pub fn transactions(&self) -> Option<&PathBuf> {
    self.transactions.as_ref()
  }

  pub fn block_time(&self) -> std::time::Duration {
    self.block_time.into()
  }

  pub fn max_tx_per_ledger(&self) -> usize {
    self.max_tx_per_ledger
  }

  pub fn metrics_addr(&self) -> SocketAddr {
    self.metrics_addr
  }
}
