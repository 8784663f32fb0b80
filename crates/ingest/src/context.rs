use crate::notify::{Notifier, TracingNotifier};
use minup_config::Config;
use minup_convert::{Clock, Converter, SystemClock, WebpConverter};
use minup_journal::{FilingTarget, JournalFiler};
use minup_storage::Uploader;
use std::sync::Arc;

/// Everything a batch needs: the collaborators of each pipeline step and a
/// snapshot of the settings.
pub struct Context {
    pub converter: Arc<dyn Converter>,
    pub uploader: Uploader,
    pub filer: JournalFiler,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl Context {
    /// A context with the `image`-backed converter, the wall clock and
    /// notifications going to `tracing`.
    pub fn new(uploader: Uploader, filer: JournalFiler, config: Config) -> Self {
        Self {
            converter: Arc::new(WebpConverter),
            uploader,
            filer,
            notifier: Arc::new(TracingNotifier),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn filing_target(&self) -> FilingTarget {
        FilingTarget {
            name: self.config.target_journal.clone(),
            create_if_missing: self.config.create_journal_if_missing,
        }
    }
}
