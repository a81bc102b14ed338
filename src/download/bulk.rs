// SPDX-License-Identifier: MPL-2.0
//! Serialized bulk download.
//!
//! Bulk download is deliberately one-at-a-time with a fixed pause between
//! items; hammering a CDN with parallel fetches gains little and some hosts
//! throttle it. A failed item never aborts the loop: the remainder still
//! downloads and the caller reports one aggregate warning at the end.

use super::Outcome;
use std::future::Future;
use std::time::Duration;

/// Pause between successive download attempts.
pub const ITEM_DELAY: Duration = Duration::from_millis(500);

/// Aggregate result of a bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Items attempted: always the full list length.
    pub attempted: usize,
    /// Items that degraded to a browser open.
    pub failed: usize,
}

impl Report {
    /// Whether the aggregate warning should be shown.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Per-item progress notification.
#[derive(Debug, Clone)]
pub struct ItemProgress {
    /// Zero-based position in the display-order list.
    pub index: usize,
    pub total: usize,
    pub outcome: Outcome,
}

/// Runs the download for every URL in display order, pacing attempts by
/// [`ITEM_DELAY`] and reporting each item through `on_item`.
///
/// `download` is the single-item operation; in production it is
/// [`super::save_with_fallback`], so an individual failure already degraded
/// to a browser open by the time it is counted here.
pub async fn run<F, Fut>(urls: Vec<String>, mut download: F, mut on_item: impl FnMut(ItemProgress)) -> Report
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Outcome>,
{
    let total = urls.len();
    let mut report = Report::default();

    for (index, url) in urls.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(ITEM_DELAY).await;
        }

        let outcome = download(url).await;
        report.attempted += 1;
        if outcome.is_failure() {
            report.failed += 1;
        }
        on_item(ItemProgress {
            index,
            total,
            outcome,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://x/{i}.jpg")).collect()
    }

    #[tokio::test]
    async fn attempts_every_item_in_list_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_task = Arc::clone(&seen);

        let report = run(
            urls(3),
            move |url| {
                let seen = Arc::clone(&seen_in_task);
                async move {
                    seen.lock().unwrap().push(url);
                    Outcome::Saved(PathBuf::from("/tmp/out.jpg"))
                }
            },
            |_| {},
        )
        .await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["https://x/0.jpg", "https://x/1.jpg", "https://x/2.jpg"]
        );
    }

    #[tokio::test]
    async fn failures_are_counted_but_do_not_abort() {
        let report = run(
            urls(4),
            |url| async move {
                // Every other item "fails" into the browser fallback.
                if url.contains("1.jpg") || url.contains("3.jpg") {
                    Outcome::OpenedExternally
                } else {
                    Outcome::Saved(PathBuf::from("/tmp/out.jpg"))
                }
            },
            |_| {},
        )
        .await;

        assert_eq!(report.attempted, 4);
        assert_eq!(report.failed, 2);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn progress_reports_index_and_total() {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let progress_sink = Arc::clone(&progress);

        run(
            urls(2),
            |_| async { Outcome::OpenedExternally },
            move |item| progress_sink.lock().unwrap().push((item.index, item.total)),
        )
        .await;

        assert_eq!(*progress.lock().unwrap(), vec![(0, 2), (1, 2)]);
    }

    #[tokio::test]
    async fn successive_attempts_are_separated_by_the_fixed_delay() {
        let started = Instant::now();
        run(
            urls(3),
            |_| async { Outcome::Saved(PathBuf::from("/tmp/out.jpg")) },
            |_| {},
        )
        .await;

        // Two gaps between three items.
        assert!(started.elapsed() >= ITEM_DELAY * 2);
    }

    #[tokio::test]
    async fn empty_list_reports_nothing() {
        let report = run(Vec::new(), |_| async { Outcome::OpenedExternally }, |_| {}).await;
        assert_eq!(report, Report::default());
        assert!(!report.has_failures());
    }
}
