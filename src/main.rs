extern crate args;
extern crate chrono;
extern crate failure;
extern crate getopts;
extern crate log;
extern crate rusoto_cloudwatch;
extern crate rusoto_core;
extern crate serde_json;
extern crate stderrlog;
extern crate tokio;

use chrono::Utc;
use failure::Error;
use log::{info, warn};
use std::env::args;
use std::io::stdout;
use std::process::exit;

pub mod cloudwatch;
pub mod config;
pub mod mackerel;
#[cfg(test)] pub mod tests;

fn setup_logging(configuration: &config::Configuration) -> Result<(), Error> {
  stderrlog::new()
    .module(module_path!())
    .verbosity(configuration.log_level)
    .init()?;
  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
  let configuration = match config::parse_args(&args().collect())? {
    config::RunMode::Help(usage) => {
      println!("{}", usage);
      exit(0);
    },
    config::RunMode::Normal(configuration) => configuration,
  };
  setup_logging(&configuration)?;
  let client = cloudwatch::client_from_config(&configuration)?;
  let prefix = configuration.metric_key_prefix();
  if mackerel::definitions_requested() {
    mackerel::output_definitions(&mut stdout(), &prefix, &configuration.queue_name)?;
    return Ok(());
  }
  info!("Fetching statistics for queue {} as {}", configuration.queue_name, prefix);
  let collected = cloudwatch::fetch_metrics(&client, &configuration.queue_name).await;
  for (name, err) in &collected.failures {
    warn!("{}: {}", name, err);
  }
  info!("Collected {}/{} statistics", collected.values.len(), cloudwatch::CATALOG.len());
  mackerel::output_values(&mut stdout(), &prefix, &collected.values, Utc::now().timestamp())?;
  Ok(())
}
