use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use recommender_client::{ApiSettings, DEFAULT_API_BASE};
use recommender_core::{Msg, SAMPLE_QUERIES};
use recommender_logging::{LevelFilter, LogDestination};

/// Assessment recommendations for hiring needs.
#[derive(Debug, Parser)]
#[command(name = "recommender", version)]
#[command(about = "Get assessment recommendations for a job description", long_about = None)]
pub struct Cli {
    /// Base URL of the recommendation API; requests go to `<base>/recommend`
    #[arg(long, env = "RECOMMENDER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Seconds to wait for the TCP connection
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout_secs: u64,

    /// Seconds to wait for the whole request
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Largest response body accepted, in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_response_bytes: u64,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Submit this query once, print the result and exit
    #[arg(long, conflicts_with = "sample")]
    pub query: Option<String>,

    /// Submit sample query N (1-based) once, print the result and exit
    #[arg(long)]
    pub sample: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

impl LogTarget {
    pub fn destination(self) -> Option<LogDestination> {
        match self {
            LogTarget::File => Some(LogDestination::File),
            LogTarget::Terminal => Some(LogDestination::Terminal),
            LogTarget::Both => Some(LogDestination::Both),
            LogTarget::Off => None,
        }
    }
}

impl Cli {
    pub fn api_settings(&self) -> Result<ApiSettings> {
        let base = ApiSettings::new(&self.api_base)
            .with_context(|| format!("invalid --api-base {:?}", self.api_base))?;
        Ok(ApiSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.timeout_secs),
            max_bytes: self.max_response_bytes,
            ..base
        })
    }

    /// The message that seeds a one-shot run, if `--query` or `--sample` was given.
    pub fn one_shot(&self) -> Result<Option<Msg>> {
        if let Some(query) = &self.query {
            return Ok(Some(Msg::QueryChanged(query.clone())));
        }
        match self.sample {
            Some(number) if (1..=SAMPLE_QUERIES.len()).contains(&number) => {
                Ok(Some(Msg::SampleSelected(number - 1)))
            }
            Some(number) => bail!(
                "--sample {number} is out of range; choose 1 to {}",
                SAMPLE_QUERIES.len()
            ),
            None => Ok(None),
        }
    }
}
