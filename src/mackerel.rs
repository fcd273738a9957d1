use failure::Error;
use log::warn;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::env;
use std::io::Write;

const PLUGIN_META_ENV: &'static str = "MACKEREL_AGENT_PLUGIN_META";
const PLUGIN_META_HEADER: &'static str = "# mackerel-agent-plugin";

struct Graph {
  key: &'static str,
  label_suffix: &'static str,
  unit: &'static str,
  metrics: &'static [(&'static str, &'static str)],
}

const GRAPHS: [Graph; 3] = [
  Graph {
    key: "messages",
    label_suffix: " Message",
    unit: "integer",
    metrics: &[
      ("NumberOfMessagesSent", "NumberOfMessagesSent"),
      ("NumberOfMessagesReceived", "NumberOfMessagesReceived"),
      ("NumberOfMessagesDeleted", "NumberOfMessagesDeleted"),
      ("NumberOfEmptyReceives", "NumberOfEmptyReceives"),
    ],
  },
  Graph {
    key: "message_size",
    label_suffix: " Sent Message Size",
    unit: "bytes",
    metrics: &[
      ("SentMessageSizeAverage", "SentMessageSizeAvg"),
      ("SentMessageSizeMax", "SentMessageSizeMax"),
      ("SentMessageSizeMin", "SentMessageSizeMin"),
    ],
  },
  Graph {
    key: "queue",
    label_suffix: " Approximate Message",
    unit: "integer",
    metrics: &[
      ("ApproximateNumberOfMessagesDelayed", "ApproximateNumberOfMessagesDelayed"),
      ("ApproximateNumberOfMessagesVisible", "ApproximateNumberOfMessagesVisible"),
      ("ApproximateNumberOfMessagesNotVisible", "ApproximateNumberOfMessagesNotVisible"),
      ("ApproximateAgeOfOldestMessage", "ApproximateAgeOfOldestMessage"),
    ],
  },
];

pub fn definitions_requested() -> bool {
  env::var(PLUGIN_META_ENV).map(|value| !value.is_empty()).unwrap_or(false)
}

pub fn graph_definition(prefix: &str, queue_name: &str) -> Value {
  let mut graphs = Map::new();
  for graph in &GRAPHS {
    let metrics: Vec<Value> = graph
      .metrics
      .iter()
      .map(|(name, label)| json!({ "name": name, "label": label, "stacked": false }))
      .collect();
    graphs.insert(
      format!("{}.{}", prefix, graph.key),
      json!({
        "label": format!("{}{}", queue_name, graph.label_suffix),
        "unit": graph.unit,
        "metrics": metrics,
      }),
    );
  }
  json!({ "graphs": graphs })
}

pub fn output_definitions(out: &mut impl Write, prefix: &str, queue_name: &str) -> Result<(), Error> {
  writeln!(out, "{}", PLUGIN_META_HEADER)?;
  writeln!(out, "{}", graph_definition(prefix, queue_name))?;
  Ok(())
}

pub fn output_values(
  out: &mut impl Write,
  prefix: &str,
  values: &HashMap<&'static str, f64>,
  now: i64,
) -> Result<(), Error> {
  for graph in &GRAPHS {
    for (name, _) in graph.metrics {
      let value = match values.get(name) {
        Some(value) => *value,
        None => continue,
      };
      if !value.is_finite() {
        warn!("Invalid value for {}: {}", name, value);
        continue;
      }
      writeln!(out, "{}.{}\t{}\t{}", prefix, name, value, now)?;
    }
  }
  Ok(())
}
