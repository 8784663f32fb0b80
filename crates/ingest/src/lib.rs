//! Turning dropped files into uploaded WebP images filed in a journal.
//!
//! A [`DropListener`] subscribes to one drag-and-drop channel of an
//! [`EventSource`]. When files are dropped it keeps the supported images and
//! hands them to [`process_batch`], which runs every file through the
//! pipeline (convert, name, upload, file) one after another and reports the
//! result through a [`Notifier`].

mod batch;
mod context;
pub mod error;
mod listener;
mod notify;
mod pipeline;
#[cfg(test)]
mod testing;

pub use crate::batch::{BatchResult, Failure, Summary, Uploaded, process_batch, summarize};
pub use crate::context::Context;
pub use crate::listener::{
    DragEvent, DragHandler, DragKind, DropListener, EventSource, FILES_TYPE, HookRegistry, Position, Priority,
    RETAINED_RESULTS,
};
pub use crate::notify::{Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use crate::pipeline::{Outcome, process_file};
