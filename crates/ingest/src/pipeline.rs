use crate::context::Context;
use crate::error::{Error, ErrorKind, Result};
use minup_convert::{DroppedFile, WEBP_MIME, output_name, page_name};
use minup_journal::ImagePage;
use minup_storage::UploadFile;
use minup_storage::error::ErrorKind as StorageErrorKind;
use tracing::instrument;

/// What happened to one dropped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { name: String, path: String },
    Failure { name: String, message: String },
}

impl Outcome {
    /// Original name of the dropped file.
    pub fn name(&self) -> &str {
        match self {
            Self::Success { name, .. } | Self::Failure { name, .. } => name,
        }
    }
}

/// Runs one file through convert, name, upload and file. Never fails: a
/// failing step becomes [`Outcome::Failure`] carrying the error message.
pub async fn process_file(ctx: &Context, file: &DroppedFile) -> Outcome {
    process(ctx, file, ctx.config.show_notifications).await
}

pub(crate) async fn process(ctx: &Context, file: &DroppedFile, notify: bool) -> Outcome {
    match run(ctx, file, notify).await {
        Ok(path) => Outcome::Success {
            name: file.name.clone(),
            path,
        },
        Err(e) => {
            tracing::error!(file = %file.name, step = e.step(), error = %e, "Failed to process image");
            Outcome::Failure {
                name: file.name.clone(),
                message: e.to_string(),
            }
        },
    }
}

/// Raise an error of another crate as `kind`, keeping its message.
fn raise_as<E>(kind: fn(String) -> ErrorKind) -> impl FnOnce(exn::Exn<E>) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| {
        let message = e.to_string();
        e.raise(kind(message))
    }
}

#[instrument(skip_all, fields(file = %file.name))]
async fn run(ctx: &Context, file: &DroppedFile, notify: bool) -> Result<String> {
    let asset = ctx
        .converter
        .convert(file, ctx.config.webp_quality)
        .await
        .map_err(raise_as(ErrorKind::Conversion))?;

    let upload = UploadFile::new(output_name(&file.name, ctx.clock.as_ref()), WEBP_MIME, asset.data);
    let path = ctx
        .uploader
        .upload(upload, Some(&ctx.config.upload_folder))
        .await
        .map_err(|e| match matches!(&*e, StorageErrorKind::Directory(_)) {
            true => raise_as(ErrorKind::Directory)(e),
            false => raise_as(ErrorKind::Upload)(e),
        })?;

    let target = ctx.filing_target();
    let page = ImagePage {
        src: path.clone(),
        name: page_name(&file.name).to_string(),
        width: Some(asset.width),
        height: Some(asset.height),
    };
    let filed = ctx.filer.file_image(&target, page).await.map_err(raise_as(ErrorKind::Filing))?;
    if filed.journal_created && notify {
        ctx.notifier.info(&format!("Created journal \"{}\"", target.name));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::testing::{Harness, png};
    use minup_storage::backend::{MockBackend, UploadMode};

    #[tokio::test]
    async fn test_success() {
        let harness = Harness::new();
        let outcome = process_file(&harness.ctx, &png("Cave Map.png")).await;
        assert_eq!(
            outcome,
            Outcome::Success {
                name: "Cave Map.png".to_string(),
                path: "uploads/w1/webp-images/Cave_Map_1234.webp".to_string(),
            }
        );
        let journals = harness.store.journals().await;
        assert_eq!(journals.len(), 1);
        let page = &journals[0].pages[0];
        assert_eq!(page.name, "Cave Map");
        assert_eq!(page.src, "uploads/w1/webp-images/Cave_Map_1234.webp");
        assert_eq!((page.image.width, page.image.height), (Some(4), Some(3)));
        assert_eq!(harness.notifier.messages(Severity::Info), vec!["Created journal \"mini-uploader\"".to_string()]);
    }

    #[tokio::test]
    async fn test_conversion_failure() {
        let harness = Harness::new();
        let outcome = process_file(&harness.ctx, &DroppedFile::new("broken.png", "image/png", b"nope".to_vec())).await;
        let Outcome::Failure { name, message } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(name, "broken.png");
        assert_eq!(message, "could not decode broken.png");
        assert!(harness.local.files().await.is_empty());
    }

    #[tokio::test]
    async fn test_directory_failure() {
        let harness = Harness::with_local(MockBackend::default().with_failing_create("uploads"));
        let outcome = process_file(&harness.ctx, &png("map.png")).await;
        assert_eq!(
            outcome,
            Outcome::Failure {
                name: "map.png".to_string(),
                message: "could not create upload directory: uploads/w1/webp-images".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_upload_failure_skips_filing() {
        let harness = Harness::with_local(MockBackend::default().with_upload_mode(UploadMode::EmptyResponse));
        let outcome = process_file(&harness.ctx, &png("map.png")).await;
        assert!(matches!(
            outcome,
            Outcome::Failure { ref message, .. } if message == "upload to mock returned no path"
        ));
        assert!(harness.store.journals().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_journal_notification_when_disabled() {
        let mut harness = Harness::new();
        harness.ctx.config.show_notifications = false;
        assert!(matches!(process_file(&harness.ctx, &png("map.png")).await, Outcome::Success { .. }));
        assert!(harness.notifier.seen().is_empty());
    }
}
