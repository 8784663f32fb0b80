use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Extensions accepted regardless of the declared media type.
regex!(IMAGE_EXTENSION_REGEX, r"(?i)\.(png|jpe?g|gif|bmp|tiff?|webp)$");
// Everything after the last dot, dot included. Requires at least one
// character after the dot, so "name." keeps its trailing dot.
regex!(EXTENSION_REGEX, r"\.[^.]+$");
