// src/metrics.rs
use metrics::{describe_counter, describe_gauge};
use once_cell::sync::OnceCell;

/// One-time metrics registration. The macros are recorder-agnostic, so this
/// is a no-op unless the embedding process installs a recorder.
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("herald_cycles_total", "Completed poll cycles.");
        describe_counter!(
            "herald_warnings_kept_total",
            "Feed entries kept by the category filter."
        );
        describe_counter!(
            "herald_entries_dropped_total",
            "Feed entries dropped by the category filter."
        );
        describe_counter!(
            "herald_fetch_retries_total",
            "Transient feed failures that triggered a backoff."
        );
        describe_counter!(
            "herald_fetch_exhausted_total",
            "Cycles where every fetch attempt failed."
        );
        describe_counter!("herald_announced_total", "Warnings spoken successfully.");
        describe_counter!(
            "herald_gate_denied_total",
            "Announcements dropped by the speech gate."
        );
        describe_counter!(
            "herald_notify_failures_total",
            "Notifier failures (warning still marked announced)."
        );
        describe_gauge!(
            "herald_last_cycle_ts",
            "Unix ts when the last poll cycle completed."
        );
    });
}
