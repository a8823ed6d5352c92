//! The `spine` element: the default reading order.

/// A spine `itemref`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRef {
    pub(crate) idref: String,
    pub(crate) id: Option<String>,
    pub(crate) linear: bool,
    pub(crate) properties: Vec<String>,
}

impl ItemRef {
    pub(crate) fn new(idref: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
            id: None,
            linear: true,
            properties: Vec::new(),
        }
    }

    /// The id of the referenced manifest item.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// `false` only when declared as `linear="no"`.
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spine {
    /// Legacy (EPUB 2) reference to the NCX manifest item.
    pub(crate) toc: Option<String>,
    pub(crate) page_progression_direction: Option<String>,
    pub(crate) item_refs: Vec<ItemRef>,
}

impl Spine {
    /// The manifest id of the NCX document, as declared by the `toc` attribute.
    pub fn toc(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    pub fn page_progression_direction(&self) -> Option<&str> {
        self.page_progression_direction.as_deref()
    }

    pub fn item_refs(&self) -> &[ItemRef] {
        &self.item_refs
    }

    pub fn len(&self) -> usize {
        self.item_refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_refs.is_empty()
    }
}
