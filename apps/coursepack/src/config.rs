use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::errors::AppError;

/// Default lecture slot when the config omits or garbles `lecture_start_time`.
pub const DEFAULT_LECTURE_START: (u32, u32) = (12, 30);
pub const DEFAULT_LECTURE_DURATION_MINUTES: i64 = 50;

/// Process settings loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini_api_key: Option<String>,
    pub rust_log: String,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Settings {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Course configuration read from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseConfig {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    pub quarter: QuarterConfig,
    #[serde(default)]
    pub book: BookConfig,
    /// Run `pdflatex` on every generated `.tex` file.
    #[serde(default)]
    pub compile_latex: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuarterConfig {
    /// First Monday of the quarter. Accepts `YYYY-MM-DD` or an ISO datetime.
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub start: NaiveDate,
    #[serde(default = "default_lecture_start_time")]
    pub lecture_start_time: String,
    #[serde(default = "default_lecture_duration")]
    pub lecture_duration_minutes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookConfig {
    /// Subsection headings, e.g. "1.1.1 Expressions".
    #[serde(default)]
    pub subsections: Vec<String>,
}

fn default_lecture_start_time() -> String {
    "12:30".to_string()
}

fn default_lecture_duration() -> i64 {
    DEFAULT_LECTURE_DURATION_MINUTES
}

impl CourseConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read course config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid course config '{}'", path.display()))
    }

    /// API key precedence: environment first, then the config file.
    pub fn resolve_api_key(&self, settings: &Settings) -> Result<String, AppError> {
        settings
            .gemini_api_key
            .clone()
            .or_else(|| self.gemini_api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "Missing GEMINI_API_KEY in .env or gemini_api_key in configuration."
                        .to_string(),
                )
            })
    }
}

impl QuarterConfig {
    /// Parsed lecture start time, falling back to 12:30 on malformed input.
    pub fn lecture_start(&self) -> NaiveTime {
        match parse_hour_minute(&self.lecture_start_time) {
            Some(time) => time,
            None => {
                warn!(
                    "Invalid lecture_start_time '{}', using 12:30",
                    self.lecture_start_time
                );
                NaiveTime::from_hms_opt(DEFAULT_LECTURE_START.0, DEFAULT_LECTURE_START.1, 0)
                    .unwrap_or_default()
            }
        }
    }
}

fn parse_hour_minute(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

fn deserialize_iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("'{raw}' is not an ISO date (YYYY-MM-DD)"))
    })
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}
