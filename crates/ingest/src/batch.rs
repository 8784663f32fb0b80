use crate::context::Context;
use crate::notify::Severity;
use crate::pipeline::{Outcome, process};
use minup_convert::DroppedFile;
use tracing::instrument;

/// A file that made it all the way into the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uploaded {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub name: String,
    pub message: String,
}

/// Tally of one batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub uploaded: Vec<Uploaded>,
    pub failures: Vec<Failure>,
}

impl BatchResult {
    /// Original names of the failed files.
    pub fn failed_names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.name.as_str())
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success { name, path } => {
                self.succeeded += 1;
                self.uploaded.push(Uploaded { name, path });
            },
            Outcome::Failure { name, message } => {
                self.failed += 1;
                self.failures.push(Failure { name, message });
            },
        }
    }
}

/// The one notification reporting a finished batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub severity: Severity,
    pub message: String,
}

/// Picks the summary notification for a batch of `total` files.
///
/// Returns `None` only for an empty batch.
pub fn summarize(total: usize, result: &BatchResult) -> Option<Summary> {
    let (severity, message) = match (total, result.failures.first()) {
        (0, _) => return None,
        (1, Some(failure)) => (Severity::Error, format!("Failed to process {}: {}", failure.name, failure.message)),
        (1, None) => {
            let name = result.uploaded.first().map(|u| u.name.as_str()).unwrap_or_default();
            (Severity::Info, format!("Uploaded {name}"))
        },
        (_, None) => (Severity::Info, format!("Successfully uploaded {} images", result.succeeded)),
        (_, Some(_)) => {
            let names = result.failed_names().collect::<Vec<_>>().join(", ");
            (Severity::Warn, format!("Uploaded {}/{total} images. Failed: {names}", result.succeeded))
        },
    };
    Some(Summary { severity, message })
}

/// Processes `files` one at a time, in order.
///
/// A failing file never stops the batch; it is recorded in the result and
/// the next file is processed. Whether notifications are shown is decided
/// once, when the batch starts.
#[instrument(skip_all, fields(files = files.len()))]
pub async fn process_batch(ctx: &Context, files: &[DroppedFile]) -> BatchResult {
    let total = files.len();
    let notify = ctx.config.show_notifications;
    if notify && total > 1 {
        ctx.notifier.info(&format!("Processing {total} images..."));
    }

    let mut result = BatchResult::default();
    for (i, file) in files.iter().enumerate() {
        if notify && total > 1 {
            ctx.notifier.info(&format!("Uploading {}/{total}: {}", i + 1, file.name));
        }
        result.record(process(ctx, file, notify).await);
    }
    tracing::info!(succeeded = result.succeeded, failed = result.failed, "Batch finished");

    if notify && let Some(summary) = summarize(total, &result) {
        ctx.notifier.notify(summary.severity, &summary.message);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, png};
    use rstest::rstest;

    fn result(uploaded: &[&str], failed: &[&str]) -> BatchResult {
        BatchResult {
            succeeded: uploaded.len(),
            failed: failed.len(),
            uploaded: uploaded
                .iter()
                .map(|n| Uploaded { name: n.to_string(), path: format!("up/{n}") })
                .collect(),
            failures: failed
                .iter()
                .map(|n| Failure { name: n.to_string(), message: "boom".to_string() })
                .collect(),
        }
    }

    #[rstest]
    #[case(3, &["a", "b", "c"], &[], Severity::Info, "Successfully uploaded 3 images")]
    #[case(3, &["a", "c"], &["b"], Severity::Warn, "Uploaded 2/3 images. Failed: b")]
    #[case(3, &[], &["a", "b", "c"], Severity::Warn, "Uploaded 0/3 images. Failed: a, b, c")]
    #[case(1, &[], &["a.png"], Severity::Error, "Failed to process a.png: boom")]
    #[case(1, &["a.png"], &[], Severity::Info, "Uploaded a.png")]
    fn test_summarize(
        #[case] total: usize,
        #[case] uploaded: &[&str],
        #[case] failed: &[&str],
        #[case] severity: Severity,
        #[case] message: &str,
    ) {
        let summary = summarize(total, &result(uploaded, failed)).unwrap();
        assert_eq!(summary.severity, severity);
        assert_eq!(summary.message, message);
    }

    #[test]
    fn test_summarize_empty_batch() {
        assert_eq!(summarize(0, &BatchResult::default()), None);
    }

    #[tokio::test]
    async fn test_progress_notifications_in_order() {
        let harness = Harness::new();
        let files = [png("a.png"), png("b.png")];
        let result = process_batch(&harness.ctx, &files).await;
        assert_eq!((result.succeeded, result.failed), (2, 0));
        assert_eq!(
            harness.notifier.seen(),
            vec![
                (Severity::Info, "Processing 2 images...".to_string()),
                (Severity::Info, "Uploading 1/2: a.png".to_string()),
                (Severity::Info, "Created journal \"mini-uploader\"".to_string()),
                (Severity::Info, "Uploading 2/2: b.png".to_string()),
                (Severity::Info, "Successfully uploaded 2 images".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_file_has_no_progress() {
        let harness = Harness::new();
        process_batch(&harness.ctx, &[png("a.png")]).await;
        assert_eq!(
            harness.notifier.messages(Severity::Info),
            vec!["Created journal \"mini-uploader\"".to_string(), "Uploaded a.png".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let harness = Harness::new();
        let broken = DroppedFile::new("broken.png", "image/png", b"nope".to_vec());
        let files = [broken, png("b.png")];
        let result = process_batch(&harness.ctx, &files).await;
        assert_eq!((result.succeeded, result.failed), (1, 1));
        assert_eq!(result.failed_names().collect::<Vec<_>>(), vec!["broken.png"]);
        assert_eq!(result.uploaded[0].name, "b.png");
        assert_eq!(
            harness.notifier.messages(Severity::Warn),
            vec!["Uploaded 1/2 images. Failed: broken.png".to_string()]
        );
    }

    #[tokio::test]
    async fn test_silent_when_notifications_disabled() {
        let mut harness = Harness::new();
        harness.ctx.config.show_notifications = false;
        let result = process_batch(&harness.ctx, &[png("a.png"), png("b.png")]).await;
        assert_eq!(result.succeeded, 2);
        assert!(harness.notifier.seen().is_empty());
    }
}
