/// A legacy (EPUB 2) guide `reference`, such as the cover or title page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuideReference {
    pub(crate) kind: String,
    pub(crate) title: Option<String>,
    pub(crate) href: String,
}

impl GuideReference {
    /// The `type`, such as `cover`, `toc` or `text`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Relative to the package document, possibly with a hash location.
    pub fn href(&self) -> &str {
        &self.href
    }
}
