//! Dublin Core metadata and `meta` entries of the package document.

/// A `dc:creator` or `dc:contributor`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Creator {
    pub(crate) value: String,
    pub(crate) id: Option<String>,
    pub(crate) role: Option<String>,
    pub(crate) file_as: Option<String>,
    pub(crate) alternate_script: Option<String>,
}

impl Creator {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// The name, such as `Herman Melville`.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// A MARC relator code, such as `aut` or `edt`.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Sort form of the name, such as `Melville, Herman`.
    pub fn file_as(&self) -> Option<&str> {
        self.file_as.as_deref()
    }

    pub fn alternate_script(&self) -> Option<&str> {
        self.alternate_script.as_deref()
    }
}

/// A `dc:date`, with its optional `opf:event` (`publication`, `modification`, …).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Date {
    pub(crate) value: String,
    pub(crate) event: Option<String>,
}

impl Date {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }
}

/// A `dc:identifier`, such as an ISBN or UUID.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identifier {
    pub(crate) value: String,
    pub(crate) id: Option<String>,
    pub(crate) scheme: Option<String>,
}

impl Identifier {
    pub(crate) fn new(value: impl Into<String>, id: Option<String>) -> Self {
        Self {
            value: value.into(),
            id,
            scheme: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

/// A `meta` element.
///
/// EPUB 2 meta take the form `<meta name="…" content="…"/>`,
/// while EPUB 3 meta take the form `<meta property="…">value</meta>`.
/// Either way, the value is exposed through [`Meta::value`], while the
/// `content` attribute and element text are also kept as they were read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub(crate) value: String,
    pub(crate) content: Option<String>,
    pub(crate) text: String,
    pub(crate) name: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) refines: Option<String>,
    pub(crate) property: Option<String>,
    pub(crate) scheme: Option<String>,
}

impl Meta {
    pub(crate) fn named(name: &str, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: Some(name.to_owned()),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The raw `content` attribute, regardless of the package version.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The raw element text, regardless of the package version.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The `#id` of the element this meta refines.
    pub fn refines(&self) -> Option<&str> {
        self.refines.as_deref()
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

/// The `metadata` element of the package document.
///
/// Every collection retains document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub(crate) titles: Vec<String>,
    pub(crate) creators: Vec<Creator>,
    pub(crate) contributors: Vec<Creator>,
    pub(crate) subjects: Vec<String>,
    pub(crate) descriptions: Vec<String>,
    pub(crate) publishers: Vec<String>,
    pub(crate) dates: Vec<Date>,
    pub(crate) types: Vec<String>,
    pub(crate) formats: Vec<String>,
    pub(crate) identifiers: Vec<Identifier>,
    pub(crate) sources: Vec<String>,
    pub(crate) languages: Vec<String>,
    pub(crate) relations: Vec<String>,
    pub(crate) coverages: Vec<String>,
    pub(crate) rights: Vec<String>,
    pub(crate) metas: Vec<Meta>,
}

impl Metadata {
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    pub fn contributors(&self) -> &[Creator] {
        &self.contributors
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn publishers(&self) -> &[String] {
        &self.publishers
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    pub fn coverages(&self) -> &[String] {
        &self.coverages
    }

    pub fn rights(&self) -> &[String] {
        &self.rights
    }

    pub fn metas(&self) -> &[Meta] {
        &self.metas
    }

    /// Retrieves the first meta whose `name` equals the given `name`.
    pub fn meta_by_name(&self, name: &str) -> Option<&Meta> {
        self.metas.iter().find(|meta| meta.name() == Some(name))
    }

    /// Retrieves the first meta whose `property` equals the given `property`.
    pub fn meta_by_property(&self, property: &str) -> Option<&Meta> {
        self.metas
            .iter()
            .find(|meta| meta.property() == Some(property))
    }
}
