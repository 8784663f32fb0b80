//! Drag-and-drop glue between an event source and the batch pipeline.

use crate::batch::{BatchResult, process_batch};
use crate::context::Context;
use async_trait::async_trait;
use minup_config::DropSource;
use minup_convert::{DroppedFile, is_supported};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

/// Data transfer type announcing that a drag carries files.
pub const FILES_TYPE: &str = "Files";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    DragOver,
    Drop,
}

/// Where a drop landed, in the coordinates of the channel it arrived on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct DragEvent {
    pub kind: DragKind,
    pub files: Vec<DroppedFile>,
    /// Data transfer types, e.g. [`FILES_TYPE`]
    pub types: Vec<String>,
    pub position: Option<Position>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DragEvent {
    pub fn drag_over(types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind: DragKind::DragOver,
            files: Vec::new(),
            types: types.into_iter().map(Into::into).collect(),
            position: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A drop of `files`; announces [`FILES_TYPE`] unless `files` is empty.
    pub fn files_dropped(files: Vec<DroppedFile>, position: Option<Position>) -> Self {
        let types = match files.is_empty() {
            true => Vec::new(),
            false => vec![FILES_TYPE.to_string()],
        };
        Self {
            kind: DragKind::Drop,
            files,
            types,
            position,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn carries_files(&self) -> bool {
        self.types.iter().any(|t| t == FILES_TYPE)
    }

    /// Stop the host from running its own handling of the event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop later handlers from seeing the event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[async_trait]
pub trait DragHandler: Send + Sync {
    async fn handle(&self, event: &mut DragEvent);
}

/// Where a new handler goes relative to those already subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Ahead of every handler subscribed so far.
    First,
    Last,
}

/// Something that delivers drag events to subscribed handlers.
pub trait EventSource {
    fn subscribe(&mut self, channel: DropSource, handler: Arc<dyn DragHandler>, priority: Priority);
}

/// In-process [`EventSource`].
#[derive(Default)]
pub struct HookRegistry {
    handlers: HashMap<DropSource, Vec<Arc<dyn DragHandler>>>,
}

impl HookRegistry {
    pub fn handler_count(&self, channel: DropSource) -> usize {
        self.handlers.get(&channel).map_or(0, Vec::len)
    }

    /// Calls the handlers of `channel` in order until one stops propagation.
    /// Returns how many handlers ran.
    pub async fn dispatch(&self, channel: DropSource, event: &mut DragEvent) -> usize {
        let mut ran = 0;
        for handler in self.handlers.get(&channel).into_iter().flatten() {
            handler.handle(event).await;
            ran += 1;
            if event.is_propagation_stopped() {
                break;
            }
        }
        ran
    }
}

impl EventSource for HookRegistry {
    fn subscribe(&mut self, channel: DropSource, handler: Arc<dyn DragHandler>, priority: Priority) {
        let handlers = self.handlers.entry(channel).or_default();
        match priority {
            Priority::First => handlers.insert(0, handler),
            Priority::Last => handlers.push(handler),
        }
    }
}

/// Number of dispatched batch results a [`DropListener`] keeps by default.
pub const RETAINED_RESULTS: usize = 32;

/// Intercepts file drops and turns the supported images into a batch.
///
/// Results of drops delivered through [`DragHandler::handle`] are kept until
/// [`take_results`](Self::take_results) drains them. Only the most recent
/// ones are kept; older results are discarded once the limit is reached.
pub struct DropListener {
    ctx: Arc<Context>,
    retain: usize,
    results: Mutex<VecDeque<BatchResult>>,
}

impl DropListener {
    pub fn new(ctx: Arc<Context>) -> Arc<Self> {
        Self::with_retained_results(ctx, RETAINED_RESULTS)
    }

    /// Keep at most `limit` undrained batch results. Zero keeps none.
    pub fn with_retained_results(ctx: Arc<Context>, limit: usize) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            retain: limit,
            results: Mutex::new(VecDeque::new()),
        })
    }

    /// Subscribes ahead of all other handlers on the configured channel.
    pub fn register(self: &Arc<Self>, source: &mut dyn EventSource) {
        let channel = self.ctx.config.drop_source;
        source.subscribe(channel, self.clone(), Priority::First);
        tracing::debug!(%channel, "Drop listener registered");
    }

    /// Handles a drop. Returns `None`, leaving the event untouched, when
    /// none of the dropped files is a supported image.
    #[instrument(skip_all, fields(files = event.files.len()))]
    pub async fn handle_drop(&self, event: &mut DragEvent) -> Option<BatchResult> {
        let images: Vec<DroppedFile> = event.files.iter().filter(|f| is_supported(f)).cloned().collect();
        if images.is_empty() {
            tracing::debug!("No supported images in drop");
            return None;
        }
        event.prevent_default();
        event.stop_propagation();
        Some(process_batch(&self.ctx, &images).await)
    }

    /// Results of the batches run since the last call, oldest first.
    pub async fn take_results(&self) -> Vec<BatchResult> {
        std::mem::take(&mut *self.results.lock().await).into()
    }

    async fn keep(&self, result: BatchResult) {
        let mut results = self.results.lock().await;
        results.push_back(result);
        while results.len() > self.retain {
            results.pop_front();
        }
    }
}

#[async_trait]
impl DragHandler for DropListener {
    async fn handle(&self, event: &mut DragEvent) {
        match event.kind {
            DragKind::DragOver => {
                if event.carries_files() {
                    event.prevent_default();
                }
            },
            DragKind::Drop => {
                if let Some(result) = self.handle_drop(event).await {
                    self.keep(result).await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, png};

    /// Counts the events it sees and optionally stops propagation.
    #[derive(Default)]
    struct Counter {
        seen: std::sync::atomic::AtomicUsize,
        stop: bool,
    }

    #[async_trait]
    impl DragHandler for Counter {
        async fn handle(&self, event: &mut DragEvent) {
            self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if self.stop {
                event.stop_propagation();
            }
        }
    }

    impl Counter {
        fn seen(&self) -> usize {
            self.seen.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    fn listener(harness: Harness) -> Arc<DropListener> {
        DropListener::new(Arc::new(harness.ctx))
    }

    #[tokio::test]
    async fn test_registers_first_on_configured_channel() {
        let mut registry = HookRegistry::default();
        let other = Arc::new(Counter::default());
        registry.subscribe(DropSource::Canvas, other.clone(), Priority::Last);

        let harness = Harness::new();
        let listener = listener(harness);
        listener.register(&mut registry);
        assert_eq!(registry.handler_count(DropSource::Canvas), 2);
        assert_eq!(registry.handler_count(DropSource::Document), 0);

        let mut event = DragEvent::files_dropped(vec![png("a.png")], Some(Position { x: 10.0, y: 20.0 }));
        assert_eq!(registry.dispatch(DropSource::Canvas, &mut event).await, 1);
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
        assert_eq!(other.seen(), 0);

        let results = listener.take_results().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].succeeded, 1);
        assert!(listener.take_results().await.is_empty());
    }

    #[tokio::test]
    async fn test_document_channel() {
        let mut harness = Harness::new();
        harness.ctx.config.drop_source = DropSource::Document;
        let mut registry = HookRegistry::default();
        listener(harness).register(&mut registry);
        assert_eq!(registry.handler_count(DropSource::Canvas), 0);
        assert_eq!(registry.handler_count(DropSource::Document), 1);
    }

    #[tokio::test]
    async fn test_drop_without_images_passes_through() {
        let mut registry = HookRegistry::default();
        let other = Arc::new(Counter::default());
        registry.subscribe(DropSource::Canvas, other.clone(), Priority::Last);
        let harness = Harness::new();
        let local = harness.local.clone();
        listener(harness).register(&mut registry);

        let text = DroppedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let mut event = DragEvent::files_dropped(vec![text], None);
        assert_eq!(registry.dispatch(DropSource::Canvas, &mut event).await, 2);
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
        assert_eq!(other.seen(), 1);
        assert!(local.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_only_supported_files_are_processed() {
        let listener = listener(Harness::new());
        let text = DroppedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let mut event = DragEvent::files_dropped(vec![text, png("a.png")], None);
        let result = listener.handle_drop(&mut event).await.unwrap();
        assert_eq!((result.succeeded, result.failed), (1, 0));
    }

    #[tokio::test]
    async fn test_drag_over() {
        let listener = listener(Harness::new());
        let mut with_files = DragEvent::drag_over(["Files"]);
        listener.handle(&mut with_files).await;
        assert!(with_files.is_default_prevented());
        assert!(!with_files.is_propagation_stopped());

        let mut text_only = DragEvent::drag_over(["text/plain"]);
        listener.handle(&mut text_only).await;
        assert!(!text_only.is_default_prevented());
    }

    #[tokio::test]
    async fn test_dispatch_stops_at_first_stopping_handler() {
        let mut registry = HookRegistry::default();
        let last = Arc::new(Counter::default());
        let stopper = Arc::new(Counter { stop: true, ..Counter::default() });
        registry.subscribe(DropSource::Document, last.clone(), Priority::Last);
        registry.subscribe(DropSource::Document, stopper.clone(), Priority::First);
        let mut event = DragEvent::drag_over(["Files"]);
        assert_eq!(registry.dispatch(DropSource::Document, &mut event).await, 1);
        assert_eq!((stopper.seen(), last.seen()), (1, 0));
    }

    #[tokio::test]
    async fn test_keeps_only_most_recent_results() {
        let listener = DropListener::with_retained_results(Arc::new(Harness::new().ctx), 2);
        for name in ["a.png", "b.png", "c.png"] {
            listener.handle(&mut DragEvent::files_dropped(vec![png(name)], None)).await;
        }
        let results = listener.take_results().await;
        let names: Vec<&str> = results.iter().map(|r| r.uploaded[0].name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "c.png"]);
    }

    #[tokio::test]
    async fn test_zero_retention_keeps_nothing() {
        let listener = DropListener::with_retained_results(Arc::new(Harness::new().ctx), 0);
        listener.handle(&mut DragEvent::files_dropped(vec![png("a.png")], None)).await;
        assert!(listener.take_results().await.is_empty());
    }
}
