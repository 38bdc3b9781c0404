use std::env;
use std::time::Duration;

use crate::error::{PlannerError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const PLAN_TRIP_PATH: &str = "/api/plan_trip";

/// Where and how the Planning Service is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub base_url: String,
    /// Skip system proxies; the service normally runs on loopback.
    pub no_proxy: bool,
    /// Bounds connection setup only. The request itself is never timed out.
    pub connect_timeout: Option<Duration>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            no_proxy: true,
            connect_timeout: None,
        }
    }
}

impl PlannerConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Reads `PLANNER_API_URL`, `PLANNER_NO_PROXY` and
    /// `PLANNER_CONNECT_TIMEOUT_SECS`, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("PLANNER_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let no_proxy = match lookup("PLANNER_NO_PROXY") {
            Some(v) => parse_flag("PLANNER_NO_PROXY", &v)?,
            None => true,
        };

        let connect_timeout = match lookup("PLANNER_CONNECT_TIMEOUT_SECS") {
            Some(v) => {
                let secs = v.trim().parse::<u64>().map_err(|_| {
                    PlannerError::Config(format!(
                        "PLANNER_CONNECT_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        v
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            no_proxy,
            connect_timeout,
        })
    }

    pub fn plan_trip_url(&self) -> String {
        format!("{}{}", self.base_url, PLAN_TRIP_PATH)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| PlannerError::Config(format!("invalid Planning Service URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PlannerError::Config(format!(
            "Planning Service URL must be http or https, got '{}'",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PlannerError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}
