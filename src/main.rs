//! storm-herald — binary entrypoint.
//! Wires the feed client, dedup store, speech gate, and notifier into the
//! orchestrator loop, and maps SIGINT/SIGTERM onto graceful shutdown.

use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use storm_herald::config::Settings;
use storm_herald::dedup::DedupStore;
use storm_herald::feed::client::AlertsClient;
use storm_herald::gate::SpeechGate;
use storm_herald::notify::tts::TtsNotifier;
use storm_herald::orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the vars come from the service
    // manager.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storm_herald=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Any failure from here to the end of wiring is the one abnormal-exit
    // path: it propagates out of main with a non-zero status.
    let settings = Settings::from_env().context("loading configuration")?;
    tracing::info!(
        region = %settings.region,
        category = %settings.category,
        poll_secs = settings.poll_interval_secs,
        "storm-herald starting"
    );

    let client = AlertsClient::new(
        &settings.feed_url,
        &settings.region,
        &settings.category,
        settings.max_retries,
        Duration::from_millis(settings.base_retry_delay_ms),
    )
    .context("building alerts client")?;
    let dedup = DedupStore::load(&settings.dedup_path);
    let gate = SpeechGate::new(settings.min_speech_interval_secs as i64);
    let notifier = TtsNotifier::new(settings.tts_url.clone(), settings.player_cmd.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_termination().await;
        tracing::info!("termination signal received; finishing current cycle");
        let _ = shutdown_tx.send(true);
    });

    let mut orchestrator = Orchestrator::new(
        client,
        settings.category.clone(),
        dedup,
        gate,
        Box::new(notifier),
        Duration::from_secs(settings.poll_interval_secs),
        settings.startup_phrase.clone(),
        shutdown_rx,
    );
    orchestrator.run().await
}

/// Resolve on the first of SIGINT or SIGTERM; both share the graceful path.
async fn wait_for_termination() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, "SIGTERM handler unavailable; relying on ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
