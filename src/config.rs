use crate::aggregator::DEFAULT_TOP_N;
use crate::catalog::DEFAULT_CATALOG_URL;
use crate::errors::PipelineError;
use std::env;
use std::str::FromStr;

pub struct Config {
    pub to_addr: String,
    pub source_addr: String,
    pub brevo_api_key: String,
    pub sender_name: String,
    pub database_path: String,
    pub catalog_url: String,
    pub top_n: usize,
    pub run_hour_utc: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Missing addresses fail here rather than as a rejected send later on.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_hour_utc: u32 = parsed(&lookup, "RUN_HOUR_UTC", 10)?;
        if run_hour_utc > 23 {
            return Err(PipelineError::InvalidConfig(
                "RUN_HOUR_UTC".to_string(),
                format!("{run_hour_utc} is not an hour of the day"),
            ));
        }

        Ok(Self {
            to_addr: required(&lookup, "TO_ADDR")?,
            source_addr: required(&lookup, "SOURCE_ADDR")?,
            brevo_api_key: required(&lookup, "BREVO_API_KEY")?,
            sender_name: optional(&lookup, "SENDER_NAME")
                .unwrap_or_else(|| "Inventory Aggregator".to_string()),
            database_path: optional(&lookup, "DATABASE_PATH")
                .unwrap_or_else(|| "inventory.sqlite3".to_string()),
            catalog_url: optional(&lookup, "CATALOG_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            top_n: parsed(&lookup, "TOP_N", DEFAULT_TOP_N)?,
            run_hour_utc,
        })
    }
}

fn optional<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<String, PipelineError> {
    optional(lookup, key).ok_or_else(|| PipelineError::ConfigurationMissing(key.to_string()))
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, PipelineError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| PipelineError::InvalidConfig(key.to_string(), format!("{raw:?}: {e}"))),
    }
}
