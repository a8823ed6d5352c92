//! The Electronic Publication ([`Book`]) module.
//!
//! Supports EPUB versions `2` and `3`.
//!
//! For more information regarding the EPUB spec, see:
//! <https://www.w3.org/TR/epub>

pub mod chapter;
pub(crate) mod consts;
pub mod container;
mod format;
mod loader;
pub mod nav;
pub mod ncx;
pub mod package;
mod parser;
pub mod resource;
mod text;
mod write;

pub use self::format::Format;
pub use self::write::{BookWriter, EpubWriteOptions};

use crate::archive::ZipArchive;
use crate::epub::chapter::ChapterTree;
use crate::epub::loader::BookLoader;
use crate::epub::package::EpubVersion;
use crate::epub::resource::{Resource, Resources, SpecialResources};
use crate::errors::{EpubError, EpubResult};
use crate::util::{StrExt, uri};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// An EPUB publication loaded into memory.
///
/// Provides access to the following contents of an epub:
/// - [`Format`]: Container, package (metadata, manifest, spine, guide), NCX and Nav documents
/// - [`Resources`]: Every manifest resource, bucketed into HTML, CSS, images, fonts and others
/// - [`SpecialResources`]: The raw container and package documents, and the reading order
/// - [`ChapterTree`]: The table of contents as nested chapters
///
/// A book holds no reference to its source; the archive is fully read on open.
///
/// # Examples
/// - Reading the contents of an epub:
/// ```no_run
/// # use quire::errors::EpubResult;
/// use quire::Book;
///
/// # fn main() -> EpubResult<()> {
/// let book = Book::open("moby-dick.epub")?;
///
/// println!("{} by {}", book.title().unwrap_or_default(), book.author());
///
/// for chapter in book.chapters().iter() {
///     println!("{}{}", "  ".repeat(chapter.depth()), chapter.title());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Book {
    format: Format,
    resources: Resources,
    special: SpecialResources,
    chapters: ChapterTree,
}

impl Book {
    /// Opens the EPUB file at `path` with default [`EpubOpenOptions`].
    ///
    /// # Errors
    /// - [`EpubError::Argument`]: `path` is blank.
    /// - [`EpubError::Archive`]: The file or a referenced entry is missing or unreadable.
    /// - [`EpubError::Format`]: The content violates the EPUB structure.
    pub fn open(path: impl AsRef<Path>) -> EpubResult<Self> {
        EpubOpenOptions::new().open(path)
    }

    /// Reads an EPUB from a seekable stream with default [`EpubOpenOptions`].
    ///
    /// The stream is consumed; pass `&mut reader` to keep using it afterward.
    pub fn read<R: Read + Seek>(reader: R) -> EpubResult<Self> {
        EpubOpenOptions::new().read(reader)
    }

    /// Reads an EPUB held in memory with default [`EpubOpenOptions`].
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> EpubResult<Self> {
        EpubOpenOptions::new().from_bytes(bytes)
    }

    pub(crate) fn from_parts(
        format: Format,
        resources: Resources,
        special: SpecialResources,
        chapters: ChapterTree,
    ) -> Self {
        Self {
            format,
            resources,
            special,
            chapters,
        }
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn version(&self) -> EpubVersion {
        self.format.package.version
    }

    /// The first non-blank `dc:title`.
    pub fn title(&self) -> Option<&str> {
        self.format
            .package
            .metadata
            .titles
            .iter()
            .map(String::as_str)
            .find(|title| !title.is_blank())
    }

    /// Every non-blank `dc:creator` value, in document order.
    pub fn authors(&self) -> Vec<&str> {
        self.format
            .package
            .metadata
            .creators
            .iter()
            .map(|creator| creator.value())
            .filter(|name| !name.is_blank())
            .collect()
    }

    /// All [authors](Self::authors) joined by `", "`; empty when there are none.
    pub fn author(&self) -> String {
        self.authors().join(consts::AUTHOR_SEPARATOR)
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn special_resources(&self) -> &SpecialResources {
        &self.special
    }

    /// The HTML resources of the spine, in reading order.
    pub fn reading_order(&self) -> impl Iterator<Item = &Resource> {
        self.special
            .reading_order
            .iter()
            .filter_map(|path| self.resources.by_path(path))
    }

    /// The loaded image designated as the cover.
    ///
    /// See [`PackageDocument::cover_item`](package::PackageDocument::cover_item)
    /// for the order in which a cover is designated.
    pub fn cover_resource(&self) -> Option<&Resource> {
        let href = self.format.package.cover_path()?;
        let path = uri::resolve_decoded(href, &self.format.opf_path).ok()?;

        self.resources
            .images()
            .iter()
            .find(|image| image.absolute_path == path)
    }

    /// The bytes of the [cover image](Self::cover_resource).
    pub fn cover_image(&self) -> Option<&[u8]> {
        self.cover_resource().map(Resource::bytes)
    }

    /// The table of contents derived from the Nav `toc`, otherwise the NCX.
    pub fn chapters(&self) -> &ChapterTree {
        &self.chapters
    }

    /// The text of every reading-order document, stripped of markup
    /// and separated by newlines.
    pub fn to_plain_text(&self) -> String {
        let documents: Vec<String> = self
            .reading_order()
            .filter_map(Resource::text)
            .map(text::html_to_text)
            .collect();

        documents.join("\n").trim().to_owned()
    }

    /// Returns [`EpubWriteOptions`] to serialize this book.
    pub fn write_options(&self) -> EpubWriteOptions<'_> {
        EpubWriteOptions::new(self)
    }
}

/// Configuration for opening a [`Book`].
///
/// # Examples
/// - Accepting EPUB 3 metas that carry their value in `content`:
/// ```no_run
/// # use quire::EpubOpenOptions;
/// # use quire::errors::EpubResult;
/// # fn main() -> EpubResult<()> {
/// let book = EpubOpenOptions::new()
///     .meta_content_fallback(true)
///     .open("legacy.epub")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpubOpenOptions {
    meta_content_fallback: bool,
}

impl EpubOpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, a `meta` whose version-preferred value is blank
    /// falls back to its other value source: the text for EPUB 2,
    /// the `content` attribute for EPUB 3.
    ///
    /// Default: `false`
    pub fn meta_content_fallback(mut self, fallback: bool) -> Self {
        self.meta_content_fallback = fallback;
        self
    }

    /// Opens the EPUB file at `path`.
    pub fn open(&self, path: impl AsRef<Path>) -> EpubResult<Book> {
        let path = path.as_ref();

        if path.to_string_lossy().is_blank() {
            return Err(EpubError::argument("EPUB path must not be blank"));
        }
        log::debug!("Opening EPUB `{}`", path.display());

        let mut archive = ZipArchive::open(path)?;
        BookLoader::new(&mut archive, self).load()
    }

    /// Reads an EPUB from a seekable stream.
    pub fn read<R: Read + Seek>(&self, reader: R) -> EpubResult<Book> {
        let mut archive = ZipArchive::new(reader, None)?;
        BookLoader::new(&mut archive, self).load()
    }

    /// Reads an EPUB held in memory.
    pub fn from_bytes(&self, bytes: impl AsRef<[u8]>) -> EpubResult<Book> {
        let bytes = bytes.as_ref();

        if bytes.is_empty() {
            return Err(EpubError::argument("EPUB content must not be empty"));
        }
        self.read(Cursor::new(bytes))
    }
}
