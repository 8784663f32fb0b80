use crate::WEBP_EXTENSION;
use crate::consts::EXTENSION_REGEX;
use time::OffsetDateTime;

/// Source of the timestamp suffix used by [`output_name`].
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i128;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now_millis(&self) -> i128 {
        OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
    }
}

/// A clock frozen at a fixed instant, for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i128);
impl Clock for FixedClock {
    fn now_millis(&self) -> i128 {
        self.0
    }
}

/// Strips the trailing extension from a file name.
///
/// ```
/// use minup_convert::page_name;
///
/// assert_eq!(page_name("Dungeon Map.final.png"), "Dungeon Map.final");
/// assert_eq!(page_name("README"), "README");
/// ```
pub fn page_name(original: &str) -> &str {
    match EXTENSION_REGEX.find(original) {
        Some(m) => &original[..m.start()],
        None => original,
    }
}

/// Derives the uploaded filename for `original`.
///
/// The extension is stripped, every character outside `[A-Za-z0-9_-]` is
/// replaced with `_`, then `_<millis>.webp` is appended so that the same
/// source dropped twice never overwrites the first upload.
///
/// ```
/// use minup_convert::{FixedClock, output_name};
///
/// let name = output_name("Dungeon Map (v2).png", &FixedClock(1_700_000_000_000));
/// assert_eq!(name, "Dungeon_Map__v2__1700000000000.webp");
/// ```
pub fn output_name(original: &str, clock: &dyn Clock) -> String {
    let sanitized: String = page_name(original)
        .chars()
        .map(|c| match c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            true => c,
            false => '_',
        })
        .collect();
    format!("{sanitized}_{}.{WEBP_EXTENSION}", clock.now_millis())
}
