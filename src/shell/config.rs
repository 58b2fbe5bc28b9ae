use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub summary_row_limit: usize,
    pub annual_report_timeout: Duration,
    pub billing_recipient: String,
    /// JSON array of projects loaded into the in-memory store at startup.
    pub projects_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            summary_row_limit: 100,
            annual_report_timeout: Duration::from_secs(1800),
            billing_recipient: "billing@localhost".into(),
            projects_file: None,
        }
    }
}

impl AppConfig {
    /// Reads `TIME_TRACKER_*` variables, after loading `.env` when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("TIME_TRACKER_HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "TIME_TRACKER_PORT")?.unwrap_or(defaults.port),
            summary_row_limit: parse(&lookup, "TIME_TRACKER_SUMMARY_ROW_LIMIT")?
                .unwrap_or(defaults.summary_row_limit),
            annual_report_timeout: parse(&lookup, "TIME_TRACKER_ANNUAL_REPORT_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.annual_report_timeout),
            billing_recipient: lookup("TIME_TRACKER_BILLING_RECIPIENT")
                .unwrap_or(defaults.billing_recipient),
            projects_file: lookup("TIME_TRACKER_PROJECTS_FILE").map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value: {raw}"))
        })
        .transpose()
}
