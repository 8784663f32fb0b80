//! Everything that happens to a dropped image before it leaves the machine.
//!
//! - **Classification** decides whether a dropped file is an image worth
//!   converting ([`is_supported`]).
//! - **Conversion** re-encodes the image as WebP behind the [`Converter`]
//!   trait, so hosts with their own codec can swap it out.
//! - **Naming** derives a sanitised, collision-resistant output filename
//!   ([`output_name`]) from an injected [`Clock`].

mod classify;
mod codec;
mod consts;
pub mod error;
mod file;
mod name;

pub use crate::classify::{SUPPORTED_TYPES, is_supported};
pub use crate::codec::{ConvertedAsset, Converter, WebpConverter};
pub use crate::file::DroppedFile;
pub use crate::name::{Clock, FixedClock, SystemClock, output_name, page_name};

/// Media type of every converted asset.
pub const WEBP_MIME: &str = "image/webp";
/// File extension (without the dot) of every converted asset.
pub const WEBP_EXTENSION: &str = "webp";
