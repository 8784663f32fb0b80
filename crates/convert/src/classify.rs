use crate::consts::IMAGE_EXTENSION_REGEX;
use crate::file::DroppedFile;

/// Declared media types accepted for conversion.
pub const SUPPORTED_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/bmp",
    "image/tiff",
    "image/webp",
];

/// Returns `true` if the file should be converted: either its declared media
/// type is in [`SUPPORTED_TYPES`] or its name carries a matching extension
/// (case-insensitive).
pub fn is_supported(file: &DroppedFile) -> bool {
    SUPPORTED_TYPES.contains(&file.mime.as_str()) || IMAGE_EXTENSION_REGEX.is_match(&file.name)
}
