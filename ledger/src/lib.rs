mod config;
mod delta;
mod execution;
mod genesis;
mod ledger;
mod metrics_sink;
mod policy;
mod state;

pub mod ops;

pub use {
  config::{
    Config,
    ConfigError,
    StartingBalanceFloor,
    LEGACY_MIN_STARTING_BALANCE,
  },
  delta::{DeltaError, LedgerDelta},
  execution::{check_valid, execute, Error},
  genesis::genesis,
  ledger::{Ledger, LedgerClose},
  metrics_sink::{Counters, Meter, Metrics, Recorder},
  ops::{ApplyContext, OperationFrame},
  policy::{LedgerPolicy, ReservePolicy},
  state::{InMemoryStateStore, State, StateDiff},
};
