use {
  crate::{mempool::Mempool, settings::SystemSettings, storage::NodeStore},
  anyhow::Context,
  clap::Parser,
  keystone_ledger::{Ledger, Recorder},
  keystone_primitives::Transaction,
  metrics_exporter_prometheus::PrometheusBuilder,
  std::{fs::File, io::BufReader, path::Path},
  tokio::time::{interval, MissedTickBehavior},
  tracing::{info, subscriber::set_global_default, warn},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod mempool;
mod settings;
mod storage;

fn open_ledger(
  settings: &SystemSettings,
) -> anyhow::Result<Ledger<Box<dyn NodeStore>>> {
  let config = settings.ledger_config()?;
  let store = settings.storage()?;

  if let Some(header) = store.last_closed() {
    info!("resuming from ledger {}", header.ledger_seq);
    return Ok(Ledger::open(store, header, config)?);
  }

  let root = settings
    .root()
    .context("a root account is required to create the genesis ledger")?;
  Ok(Ledger::genesis(store, root, config)?)
}

fn load_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
  let file = File::open(path)
    .with_context(|| format!("failed to open {}", path.display()))?;
  serde_json::from_reader(BufReader::new(file))
    .with_context(|| format!("invalid transactions file {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // configure logging
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .finish(),
  )?;

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  PrometheusBuilder::new()
    .with_http_listener(settings.metrics_addr())
    .install()?;
  let metrics = Recorder;

  let mut ledger = open_ledger(&settings)?;

  let mut mempool = Mempool::default();
  if let Some(path) = settings.transactions() {
    for tx in load_transactions(path)? {
      mempool.consume(tx, &metrics);
    }
    info!("{} transactions waiting in mempool", mempool.len());
  }

  let mut interval = interval(settings.block_time());
  interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

  loop {
    tokio::select! {
      _ = interval.tick() => {
        let txs = mempool.produce(settings.max_tx_per_ledger());
        let close = ledger.close(&txs, &metrics)?;
        for (tx, result) in txs.iter().zip(&close.results) {
          if !result.is_success() {
            warn!(source = %tx.source, "transaction failed: {result:?}");
          }
        }
      }
      _ = tokio::signal::ctrl_c() => {
        info!("shutting down at ledger {}", ledger.header().ledger_seq);
        return Ok(());
      }
    }
  }
}
