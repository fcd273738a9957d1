use serde_json::Value;
use std::collections::HashSet;
use std::env;

use crate::cloudwatch::CATALOG;
use crate::mackerel::{definitions_requested, graph_definition, output_definitions};

#[test]
fn writes_meta_header_then_graph_json() {
  let mut out = Vec::new();
  output_definitions(&mut out, "sqs.orders", "orders").unwrap();
  let printed = String::from_utf8(out).unwrap();
  let mut lines = printed.lines();
  assert_eq!(Some("# mackerel-agent-plugin"), lines.next());
  let definition: Value = serde_json::from_str(lines.next().unwrap()).unwrap();
  assert_eq!(None, lines.next());
  let graphs = &definition["graphs"];
  assert_eq!("orders Message", graphs["sqs.orders.messages"]["label"]);
  assert_eq!("integer", graphs["sqs.orders.messages"]["unit"]);
  assert_eq!("orders Sent Message Size", graphs["sqs.orders.message_size"]["label"]);
  assert_eq!("bytes", graphs["sqs.orders.message_size"]["unit"]);
  assert_eq!("orders Approximate Message", graphs["sqs.orders.queue"]["label"]);
  assert_eq!("SentMessageSizeAvg", graphs["sqs.orders.message_size"]["metrics"][0]["label"]);
  assert_eq!(false, graphs["sqs.orders.message_size"]["metrics"][0]["stacked"]);
}

#[test]
fn definition_covers_every_catalog_metric() {
  let definition = graph_definition("sqs.orders", "orders");
  let mut defined = HashSet::new();
  for (_, graph) in definition["graphs"].as_object().unwrap() {
    for metric in graph["metrics"].as_array().unwrap() {
      defined.insert(metric["name"].as_str().unwrap().to_owned());
    }
  }
  let catalog: HashSet<String> = CATALOG.iter().map(|metric| metric.output_name().to_owned()).collect();
  assert_eq!(catalog, defined);
}

#[test]
fn definitions_requested_follows_the_environment() {
  env::remove_var("MACKEREL_AGENT_PLUGIN_META");
  assert!(!definitions_requested());
  env::set_var("MACKEREL_AGENT_PLUGIN_META", "1");
  assert!(definitions_requested());
  env::remove_var("MACKEREL_AGENT_PLUGIN_META");
}
