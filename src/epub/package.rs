//! The OPF package document: metadata, manifest, spine and guide.

mod guide;
mod manifest;
mod metadata;
mod spine;

pub use guide::GuideReference;
pub use manifest::{Manifest, ManifestItem};
pub use metadata::{Creator, Date, Identifier, Meta, Metadata};
pub use spine::{ItemRef, Spine};

use crate::epub::consts;
use crate::errors::FormatError;
use crate::parser::ParserResult;
use std::fmt::Display;

/// The major EPUB version declared by the package `version` attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EpubVersion {
    Epub2,
    Epub3,
}

impl EpubVersion {
    /// Interprets a raw `version` attribute, such as `2.0`, `3` or `3.0.1`.
    ///
    /// # Examples
    /// ```
    /// # use quire::epub::package::EpubVersion;
    /// assert_eq!(EpubVersion::Epub2, EpubVersion::parse("2.0.1").unwrap());
    /// assert_eq!(EpubVersion::Epub3, EpubVersion::parse(" 3.0 ").unwrap());
    /// assert!(EpubVersion::parse("4.0").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let raw = raw.trim();
        let major = raw.split_once('.').map_or(raw, |(major, _)| major);

        match major {
            "2" => Ok(Self::Epub2),
            "3" => Ok(Self::Epub3),
            _ => Err(FormatError::UnsupportedVersion(raw.to_owned())),
        }
    }

    /// The canonical `version` attribute value: `2.0` or `3.0`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epub2 => "2.0",
            Self::Epub3 => "3.0",
        }
    }
}

impl Display for EpubVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parsed `.opf` package document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDocument {
    pub(crate) version: EpubVersion,
    pub(crate) unique_identifier: Option<String>,
    pub(crate) lang: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) metadata: Metadata,
    pub(crate) manifest: Manifest,
    pub(crate) spine: Spine,
    pub(crate) guide: Vec<GuideReference>,
}

impl PackageDocument {
    pub(crate) fn new(version: EpubVersion) -> Self {
        Self {
            version,
            unique_identifier: None,
            lang: None,
            prefix: None,
            metadata: Metadata::default(),
            manifest: Manifest::default(),
            spine: Spine::default(),
            guide: Vec::new(),
        }
    }

    pub fn version(&self) -> EpubVersion {
        self.version
    }

    /// The id of the `dc:identifier` uniquely identifying the publication.
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    /// The `xml:lang` of the package element.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    pub fn guide(&self) -> &[GuideReference] {
        &self.guide
    }

    /// The cover image manifest item.
    ///
    /// A `<meta name="cover">` whose value is a manifest id takes precedence
    /// over an item carrying the `cover-image` property.
    pub fn cover_item(&self) -> Option<&ManifestItem> {
        self.metadata
            .meta_by_name(consts::COVER)
            .and_then(|meta| self.manifest.by_id(meta.value().trim()))
            .or_else(|| self.manifest.by_property(consts::COVER_IMAGE))
    }

    /// The href of the [cover item](Self::cover_item), relative to the package document.
    pub fn cover_path(&self) -> Option<&str> {
        self.cover_item().map(ManifestItem::href)
    }

    /// The NCX manifest item: the first item with the NCX media type,
    /// otherwise the item named by the spine `toc` attribute.
    pub fn ncx_item(&self) -> Option<&ManifestItem> {
        self.manifest
            .items
            .iter()
            .find(|item| item.is_ncx())
            .or_else(|| self.spine.toc().and_then(|toc| self.manifest.by_id(toc)))
    }

    pub fn ncx_path(&self) -> Option<&str> {
        self.ncx_item().map(ManifestItem::href)
    }

    /// The manifest item carrying the `nav` property.
    pub fn nav_item(&self) -> Option<&ManifestItem> {
        self.manifest.by_property(consts::NAV_PROPERTY)
    }

    pub fn nav_path(&self) -> Option<&str> {
        self.nav_item().map(ManifestItem::href)
    }

    pub(crate) fn require_version(raw: Option<String>) -> ParserResult<EpubVersion> {
        let raw = raw.ok_or_else(|| FormatError::MissingAttribute("package[version]".into()))?;
        EpubVersion::parse(&raw)
    }
}
