//! The `manifest` element: every publication resource.

use crate::epub::consts;

/// A manifest `item`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestItem {
    pub(crate) id: String,
    /// Relative to the package document.
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) properties: Vec<String>,
    pub(crate) fallback: Option<String>,
    pub(crate) fallback_style: Option<String>,
    pub(crate) required_namespace: Option<String>,
    pub(crate) required_modules: Option<String>,
    pub(crate) media_overlay: Option<String>,
}

impl ManifestItem {
    pub(crate) fn new(id: impl Into<String>, href: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            media_type: media_type.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The href as written in the manifest, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Space-separated `properties` tokens, such as `nav` or `cover-image`.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.properties.iter().any(|token| token == property)
    }

    /// The id of the item to use when this one is unsupported.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn fallback_style(&self) -> Option<&str> {
        self.fallback_style.as_deref()
    }

    pub fn required_namespace(&self) -> Option<&str> {
        self.required_namespace.as_deref()
    }

    pub fn required_modules(&self) -> Option<&str> {
        self.required_modules.as_deref()
    }

    pub fn media_overlay(&self) -> Option<&str> {
        self.media_overlay.as_deref()
    }

    pub(crate) fn is_ncx(&self) -> bool {
        self.media_type == consts::NCX_TYPE
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub(crate) items: Vec<ManifestItem>,
}

impl Manifest {
    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Retrieves the first item having the given `property`.
    pub fn by_property(&self, property: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.has_property(property))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(ManifestItem::id)
    }

    pub(crate) fn push(&mut self, item: ManifestItem) {
        self.items.push(item);
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&ManifestItem) -> bool) {
        self.items.retain(keep);
    }
}
