/// A file handed over by a drop event.
///
/// The declared media type comes straight from the event source and is not
/// trusted: some platforms leave it empty or guess wrong, which is why
/// [`is_supported`](crate::is_supported) also looks at the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// Original file name, including its extension.
    pub name: String,
    /// Declared media type, possibly empty.
    pub mime: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}
impl DroppedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }
}
