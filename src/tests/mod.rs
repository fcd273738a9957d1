extern crate rusoto_mock;
extern crate serde_urlencoded;

mod output_definitions;

use rusoto_cloudwatch::CloudWatchClient;
use rusoto_mock::{MockCredentialsProvider, MockRequestDispatcher};

use crate::cloudwatch::{Metric, CATALOG};

fn client_with_body(body: &str) -> CloudWatchClient {
  CloudWatchClient::new_with(
    MockRequestDispatcher::with_status(200).with_body(body),
    MockCredentialsProvider,
    Default::default()
  )
}

fn catalog_metric(output_name: &str) -> Metric {
  CATALOG
    .iter()
    .find(|metric| metric.output_name() == output_name)
    .copied()
    .unwrap()
}

fn datapoint(timestamp: &str, fields: &[(&str, f64)]) -> String {
  let mut member = format!("<member><Timestamp>{}</Timestamp>", timestamp);
  for (tag, value) in fields {
    member.push_str(&format!("<{}>{}</{}>", tag, value, tag));
  }
  member.push_str("</member>");
  member
}

fn statistics_response(datapoints: &[String]) -> String {
  format!(
    r#"<GetMetricStatisticsResponse xmlns="http://monitoring.amazonaws.com/doc/2010-08-01/">
  <GetMetricStatisticsResult>
    <Label>ze-label</Label>
    <Datapoints>{}</Datapoints>
  </GetMetricStatisticsResult>
  <ResponseMetadata>
    <RequestId>ze-request-id</RequestId>
  </ResponseMetadata>
</GetMetricStatisticsResponse>"#,
    datapoints.concat()
  )
}
