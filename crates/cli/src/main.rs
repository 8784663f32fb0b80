//! `minup`: drop image files into mini-uploader from the command line.
//!
//! The files are delivered as one drop event on the configured channel, so
//! they go through exactly the path a drag-and-drop in the host would take.

mod error;

use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use minup_config::Config;
use minup_convert::DroppedFile;
use minup_ingest::{Context, DragEvent, DropListener, HookRegistry};
use minup_journal::JournalFiler;
use minup_journal::store::JsonFileStore;
use minup_storage::Uploader;
use minup_storage::backend::LocalBackend;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minup", version, about = "Convert images to WebP, upload them and file them in a journal")]
struct Args {
    /// Configuration file (TOML, YAML or JSON); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,
    /// Root directory of the local (`data`) storage
    #[arg(long)]
    data_root: PathBuf,
    /// Root directory of a hosted storage mirror, tried before local storage
    #[arg(long)]
    remote_root: Option<PathBuf>,
    /// JSON file holding the journals
    #[arg(long, default_value = "journals.json")]
    journals: PathBuf,
    /// World identifier substituted into the upload folder
    #[arg(long, default_value = "world")]
    world: String,
    /// Files to drop
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = ?e, "{e}");
            ExitCode::FAILURE
        },
    }
}

/// Returns whether every dropped file was uploaded.
async fn run(args: Args) -> Result<bool> {
    let config = Config::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;

    let local = storage("data", &args.data_root)?;
    let mut uploader = Uploader::new(Arc::new(local), config.upload_folder.clone(), args.world);
    if let Some(remote_root) = &args.remote_root {
        uploader = uploader.with_hosted(Arc::new(storage("hosted", remote_root)?));
    }
    let store = JsonFileStore::open(&args.journals)
        .await
        .or_raise(|| ErrorKind::Journal(args.journals.clone()))?;

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(read(path).await?);
    }

    let channel = config.drop_source;
    let ctx = Context::new(uploader, JournalFiler::new(Arc::new(store)), config);
    let listener = DropListener::new(Arc::new(ctx));
    let mut registry = HookRegistry::default();
    listener.register(&mut registry);

    let mut event = DragEvent::files_dropped(files, None);
    registry.dispatch(channel, &mut event).await;
    if !event.is_propagation_stopped() {
        tracing::warn!("None of the files is a supported image");
        return Ok(false);
    }

    let mut all_uploaded = true;
    for result in listener.take_results().await {
        for uploaded in &result.uploaded {
            println!("{}\t{}", uploaded.name, uploaded.path);
        }
        all_uploaded &= result.failed == 0;
    }
    Ok(all_uploaded)
}

fn storage(name: &str, root: &Path) -> Result<LocalBackend> {
    let root = std::path::absolute(root).or_raise(|| ErrorKind::Storage(root.to_path_buf()))?;
    LocalBackend::new(name, &root).or_raise(|| ErrorKind::Storage(root.clone()))
}

async fn read(path: &Path) -> Result<DroppedFile> {
    let data = tokio::fs::read(path).await.or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(DroppedFile::new(name, sniff_mime(&data), data))
}

/// Media type from the file contents; empty when unknown, like a drop
/// without a declared type.
fn sniff_mime(data: &[u8]) -> &'static str {
    infer::get(data).map(|kind| kind.mime_type()).unwrap_or_default()
}
