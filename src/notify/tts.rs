use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;

use super::Notifier;

/// HTTP text-to-speech backend plus a local player process. The synthesis
/// endpoint takes `{"text": ...}` and returns raw audio bytes; playback
/// shells out to a configured player command.
pub struct TtsNotifier {
    endpoint: String,
    player_cmd: String,
    client: Client,
    timeout: Duration,
}

impl TtsNotifier {
    pub fn new(endpoint: String, player_cmd: String) -> Self {
        Self {
            endpoint,
            player_cmd,
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    async fn synthesize(&self, text: &str) -> Result<PathBuf> {
        let body = serde_json::json!({ "text": text });
        let rsp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .context("tts request failed")?
            .error_for_status()
            .context("tts non-2xx status")?;
        let audio = rsp.bytes().await.context("reading tts audio")?;

        let path = std::env::temp_dir().join(format!("storm-herald-{}.wav", std::process::id()));
        tokio::fs::write(&path, &audio)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    async fn play(&self, path: &Path) -> Result<()> {
        let status = tokio::process::Command::new(&self.player_cmd)
            .arg(path)
            .status()
            .await
            .with_context(|| format!("spawning player {}", self.player_cmd))?;
        if !status.success() {
            return Err(anyhow!("player exited with {status}"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for TtsNotifier {
    async fn speak(&self, text: &str) -> Result<()> {
        let path = self.synthesize(text).await?;
        let played = self.play(&path).await;
        let _ = tokio::fs::remove_file(&path).await;
        played
    }
}
