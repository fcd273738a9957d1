use crate::config::Configuration;
use chrono::{DateTime, Duration, Utc};
use failure::{Error, Fail};
use rusoto_cloudwatch::{CloudWatch, CloudWatchClient, Datapoint, Dimension, GetMetricStatisticsInput};
use rusoto_core::credential::{ChainProvider, StaticProvider};
use rusoto_core::{HttpClient, Region};
use std::collections::HashMap;
use std::str::FromStr;

const NAMESPACE: &'static str = "AWS/SQS";
const PERIOD_SECONDS: i64 = 60;
const WINDOW_SECONDS: i64 = 300; // wide enough to fetch at least one datapoint despite ingestion delay

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Statistic {
  Average,
  Maximum,
  Minimum,
  Sum,
}

impl Statistic {
  pub fn request_name(self) -> &'static str {
    match self {
      Statistic::Average => "Average",
      Statistic::Maximum => "Maximum",
      Statistic::Minimum => "Minimum",
      Statistic::Sum => "Sum",
    }
  }

  fn datapoint_value(self, datapoint: &Datapoint) -> Option<f64> {
    match self {
      Statistic::Average => datapoint.average,
      Statistic::Maximum => datapoint.maximum,
      Statistic::Minimum => datapoint.minimum,
      Statistic::Sum => datapoint.sum,
    }
  }
}

#[derive(Clone, Copy, Debug)]
pub struct Metric {
  pub name: &'static str,
  pub statistic: Statistic,
  pub unit: &'static str,
  pub mackerel_name: Option<&'static str>,
}

impl Metric {
  pub fn output_name(&self) -> &'static str {
    self.mackerel_name.unwrap_or(self.name)
  }
}

pub const CATALOG: [Metric; 11] = [
  Metric { name: "NumberOfMessagesSent", statistic: Statistic::Sum, unit: "Count", mackerel_name: None },
  Metric { name: "NumberOfMessagesReceived", statistic: Statistic::Sum, unit: "Count", mackerel_name: None },
  Metric { name: "NumberOfEmptyReceives", statistic: Statistic::Sum, unit: "Count", mackerel_name: None },
  Metric { name: "NumberOfMessagesDeleted", statistic: Statistic::Sum, unit: "Count", mackerel_name: None },
  Metric { name: "SentMessageSize", statistic: Statistic::Average, unit: "Bytes", mackerel_name: Some("SentMessageSizeAverage") },
  Metric { name: "SentMessageSize", statistic: Statistic::Maximum, unit: "Bytes", mackerel_name: Some("SentMessageSizeMax") },
  Metric { name: "SentMessageSize", statistic: Statistic::Minimum, unit: "Bytes", mackerel_name: Some("SentMessageSizeMin") },
  Metric { name: "ApproximateNumberOfMessagesDelayed", statistic: Statistic::Average, unit: "Count", mackerel_name: None },
  Metric { name: "ApproximateNumberOfMessagesVisible", statistic: Statistic::Average, unit: "Count", mackerel_name: None },
  Metric { name: "ApproximateNumberOfMessagesNotVisible", statistic: Statistic::Average, unit: "Count", mackerel_name: None },
  Metric { name: "ApproximateAgeOfOldestMessage", statistic: Statistic::Maximum, unit: "Seconds", mackerel_name: None },
];

#[derive(Debug, Fail)]
#[fail(display = "fetched no datapoints")]
pub struct NoDataPoints;

pub struct Collected {
  pub values: HashMap<&'static str, f64>,
  pub failures: Vec<(&'static str, Error)>,
}

pub fn client_from_config(configuration: &Configuration) -> Result<CloudWatchClient, Error> {
  let region = Region::from_str(&configuration.region)?;
  let dispatcher = HttpClient::new()?;
  if configuration.access_key_id.is_empty() || configuration.secret_access_key.is_empty() {
    Ok(CloudWatchClient::new_with(dispatcher, ChainProvider::new(), region))
  } else {
    let credentials = StaticProvider::new_minimal(
      configuration.access_key_id.clone(),
      configuration.secret_access_key.clone(),
    );
    Ok(CloudWatchClient::new_with(dispatcher, credentials, region))
  }
}

pub async fn fetch_metrics(client: &impl CloudWatch, queue_name: &str) -> Collected {
  let mut values = HashMap::new();
  let mut failures = Vec::new();
  for metric in &CATALOG {
    match fetch_statistic(client, queue_name, metric).await {
      Ok(value) => {
        values.insert(metric.output_name(), value);
      },
      Err(err) => failures.push((metric.output_name(), err)),
    }
  }
  Collected { values, failures }
}

pub async fn fetch_statistic(client: &impl CloudWatch, queue_name: &str, metric: &Metric) -> Result<f64, Error> {
  let now = Utc::now();
  let start = now - Duration::seconds(WINDOW_SECONDS);
  let response = client
    .get_metric_statistics(GetMetricStatisticsInput {
      dimensions: Some(vec![Dimension {
        name: "QueueName".to_owned(),
        value: queue_name.to_owned(),
      }]),
      start_time: format!("{}", start.format("%FT%T%.3f%:z")),
      end_time: format!("{}", now.format("%FT%T%.3f%:z")),
      period: PERIOD_SECONDS,
      namespace: NAMESPACE.to_owned(),
      metric_name: metric.name.to_owned(),
      statistics: Some(vec![metric.statistic.request_name().to_owned()]),
      unit: Some(metric.unit.to_owned()),
      ..Default::default()
    })
    .await?;

  let datapoints = response.datapoints.unwrap_or_default();
  if datapoints.is_empty() {
    return Err(NoDataPoints.into());
  }

  let mut least = now;
  let mut value = 0.0;
  for datapoint in &datapoints {
    let timestamp = match datapoint.timestamp.as_deref().map(DateTime::parse_from_rfc3339) {
      Some(Ok(parsed)) => parsed.with_timezone(&Utc),
      _ => continue,
    };
    if timestamp < least {
      least = timestamp;
      value = metric.statistic.datapoint_value(datapoint).unwrap_or_default();
    }
  }
  Ok(value)
}
