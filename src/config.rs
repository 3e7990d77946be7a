// src/config.rs
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_FEED_URL: &str = "https://api.weather.gov/alerts/active";

/// Everything the daemon reads from the environment. `.env` is loaded by
/// `main` before this runs; every knob has a default except the target
/// region and the TTS endpoint.
#[derive(Debug, Clone)]
pub struct Settings {
    pub region: String,
    pub category: String,
    pub poll_interval_secs: u64,
    pub min_speech_interval_secs: u64,
    pub max_retries: u32,
    pub base_retry_delay_ms: u64,
    pub dedup_path: PathBuf,
    pub feed_url: String,
    pub tts_url: String,
    pub player_cmd: String,
    pub startup_phrase: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            region: require("HERALD_REGION")?,
            category: env_or("HERALD_CATEGORY", "Tornado Warning"),
            poll_interval_secs: parsed("HERALD_POLL_INTERVAL_SECS", 60)?,
            min_speech_interval_secs: parsed("HERALD_MIN_SPEECH_INTERVAL_SECS", 300)?,
            max_retries: parsed("HERALD_MAX_RETRIES", 5)?,
            base_retry_delay_ms: parsed("HERALD_BASE_RETRY_DELAY_MS", 1_000)?,
            dedup_path: PathBuf::from(env_or("HERALD_DEDUP_PATH", "state/announced.json")),
            feed_url: env_or("HERALD_FEED_URL", DEFAULT_FEED_URL),
            tts_url: require("HERALD_TTS_URL")?,
            player_cmd: env_or("HERALD_PLAYER_CMD", "aplay"),
            startup_phrase: env_or(
                "HERALD_STARTUP_PHRASE",
                "Storm herald is online and watching for severe weather.",
            ),
        })
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} must be set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().with_context(|| format!("parsing {key}")),
        Err(_) => Ok(default),
    }
}
