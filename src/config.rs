use args::Args;
use failure::Error;
use getopts::Occur;

#[derive(Debug, Default, PartialEq)]
pub struct Configuration {
  pub access_key_id: String,
  pub log_level: usize,
  pub prefix: String,
  pub queue_name: String,
  pub region: String,
  pub secret_access_key: String,
  #[allow(dead_code)]
  pub tempfile: String,
}

impl Configuration {
  pub fn metric_key_prefix(&self) -> String {
    if self.prefix.is_empty() {
      format!("sqs.{}", self.queue_name)
    } else {
      self.prefix.clone()
    }
  }
}

const PROGRAM_DESC: &'static str = "Mackerel plugin reporting SQS queue statistics from Cloudwatch.";

pub enum RunMode {
  Normal(Configuration),
  Help(String),
}

pub fn parse_args(args: &Vec<String>) -> Result<RunMode, Error> {
  let mut argparser = Args::new("mackerel-plugin-sqs", PROGRAM_DESC);
  argparser.option(
    "q",
    "queue-name",
    "Name of the SQS queue to fetch statistics for",
    "QUEUE_NAME",
    Occur::Optional,
    Some("".to_owned()));
  argparser.option(
    "r",
    "region",
    "AWS region the queue lives in",
    "REGION",
    Occur::Optional,
    Some("us-east-1".to_owned()));
  argparser.option(
    "k",
    "access-key-id",
    "AWS access key ID, leave empty to use ambient credentials",
    "KEY_ID",
    Occur::Optional,
    Some("".to_owned()));
  argparser.option(
    "s",
    "secret-access-key",
    "AWS secret access key, leave empty to use ambient credentials",
    "SECRET",
    Occur::Optional,
    Some("".to_owned()));
  argparser.option(
    "p",
    "metric-key-prefix",
    "Prefix for emitted metric keys, defaults to sqs.<queue-name>",
    "PREFIX",
    Occur::Optional,
    Some("".to_owned()));
  argparser.option(
    "t",
    "tempfile",
    "Cache path handed down by mackerel-agent, accepted and left untouched",
    "PATH",
    Occur::Optional,
    Some("".to_owned()));
  argparser.option(
    "l",
    "log-level",
    "Increase logging verbosity (0 = error, 4 = trace)",
    "NUM",
    Occur::Optional,
    Some("1".to_owned()));
  argparser.flag("h", "help", "Print this help and exit");

  argparser.parse(args)?;

  if argparser.value_of("help")? {
    Ok(RunMode::Help(argparser.full_usage()))
  } else {
    Ok(RunMode::Normal(Configuration {
      access_key_id: argparser.value_of("access-key-id")?,
      log_level: argparser.value_of("log-level")?,
      prefix: argparser.value_of("metric-key-prefix")?,
      queue_name: argparser.value_of("queue-name")?,
      region: argparser.value_of("region")?,
      secret_access_key: argparser.value_of("secret-access-key")?,
      tempfile: argparser.value_of("tempfile")?,
    }))
  }
}
