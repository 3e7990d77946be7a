pub mod tts;

use anyhow::Result;

use crate::feed::types::Warning;

/// Speech boundary: synthesis plus playback, reported to the orchestrator
/// only as a combined success/failure.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Calm spoken phrasing for one warning. Pure: absent or blank fields fall
/// back to generic wording rather than erroring.
pub fn compose_announcement(warning: &Warning) -> String {
    let area = warning.area_description.trim();
    let mut msg = match warning
        .headline
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
    {
        Some(headline) => format!("Weather update. {}.", headline.trim_end_matches('.')),
        None if area.is_empty() => format!(
            "Weather update. A {} is in effect for your area.",
            warning.category.to_lowercase()
        ),
        None => format!(
            "Weather update. A {} is in effect for {}.",
            warning.category.to_lowercase(),
            area
        ),
    };
    if let Some(expires) = warning.expires {
        msg.push_str(&format!(
            " It is expected to remain in effect until {}.",
            expires.format("%H:%M UTC")
        ));
    }
    msg.push_str(" Please stay calm and move to a safe place.");
    msg
}
