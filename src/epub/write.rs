mod writer;

use crate::epub::chapter::{ChapterData, ChapterId, ChapterTree};
use crate::epub::consts;
use crate::epub::container::ContainerDocument;
use crate::epub::format::Format;
use crate::epub::nav::{Element, NavDocument, Node};
use crate::epub::ncx::{NavPoint, NcxDocument};
use crate::epub::package::{
    Creator, EpubVersion, Identifier, ItemRef, ManifestItem, Meta, PackageDocument,
};
use crate::epub::resource::{
    ContentType, ImageFormat, Resource, ResourceCategory, ResourceContent, Resources,
    SpecialResources,
};
use crate::epub::write::writer::{EpubWriter, ncx_to_string};
use crate::epub::Book;
use crate::errors::{EpubError, EpubResult, WriteError};
use crate::util::str::max_suffix;
use crate::util::{StrExt, uri};
use crate::writer::xml;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_OPF_PATH: &str = "/OEBPS/content.opf";
const DEFAULT_LANGUAGE: &str = "en";
const UID: &str = "uid";
const NAV_ID: &str = "nav";
const NAV_HREF: &str = "nav.xhtml";
const NCX_ID: &str = "ncx";
const NCX_HREF: &str = "toc.ncx";
const CHAPTER_PREFIX: &str = "chapter-";
const FILE_PREFIX: &str = "file-";
const NAV_POINT_PREFIX: &str = "nav-point-";
const COVER_ID: &str = "cover-image";
const COVER_NAME: &str = "cover";

/// Serializes a [`Book`] into an EPUB archive.
///
/// Entries are emitted in a fixed order: the uncompressed `mimetype`,
/// `META-INF/container.xml`, the package document, the NCX (when present),
/// the navigation document (when present), then every remaining resource.
///
/// # Examples
/// - Writing with maximum compression:
/// ```no_run
/// # use quire::Book;
/// # use quire::errors::EpubResult;
/// # fn main() -> EpubResult<()> {
/// let book = Book::open("moby-dick.epub")?;
///
/// book.write_options()
///     .compression(9)
///     .save("moby-dick-copy.epub")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct EpubWriteOptions<'book> {
    book: &'book Book,
    compression: u8,
}

impl<'book> EpubWriteOptions<'book> {
    pub(super) fn new(book: &'book Book) -> Self {
        Self { book, compression: 6 }
    }

    /// Sets the deflate level from `0` (stored) to `9` (smallest).
    /// Values above `9` are clamped.
    ///
    /// The `mimetype` entry is always stored uncompressed.
    ///
    /// Default: `6`
    pub fn compression(&mut self, level: u8) -> &mut Self {
        self.compression = level.min(9);
        self
    }

    /// Saves the book to `path`, replacing any existing file.
    ///
    /// The archive is first written beside `path` and then moved into place,
    /// so a failed write leaves an existing file untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> EpubResult<()> {
        const TEMP: &str = "quire.tmp";

        let path = path.as_ref();
        if path.to_string_lossy().is_blank() {
            return Err(EpubError::argument("EPUB path must not be blank"));
        }
        let temp = path.with_extension(TEMP);

        let write_result = (|| -> EpubResult<()> {
            let file = std::fs::File::create(&temp)?;
            let mut buf = std::io::BufWriter::new(file);

            self.write(&mut buf)?;

            buf.flush()?;
            std::fs::rename(&temp, path)?;
            Ok(())
        })();

        if let Err(error) = write_result {
            // The original error takes precedence
            let _ = std::fs::remove_file(&temp);
            return Err(error);
        }
        log::debug!("Saved EPUB `{}`", path.display());
        Ok(())
    }

    /// Writes the book to `writer`, returning it once the archive is finished.
    pub fn write<W: Write>(&self, writer: W) -> EpubResult<W> {
        EpubWriter::new(self.book, writer, self.compression).write()
    }

    pub fn to_vec(&self) -> EpubResult<Vec<u8>> {
        self.write(Cursor::new(Vec::new())).map(Cursor::into_inner)
    }
}

/// Creates and edits a [`Book`].
///
/// Every edit keeps the package, navigation documents, resources,
/// reading order and chapter tree consistent with one another.
///
/// # Examples
/// - Creating a book from scratch:
/// ```
/// # use quire::BookWriter;
/// # use quire::errors::EpubResult;
/// # fn main() -> EpubResult<()> {
/// let mut writer = BookWriter::new();
/// writer.set_title("Moby-Dick")?;
/// writer.add_author("Herman Melville")?;
/// writer.add_chapter("Loomings", "<p>Call me Ishmael.</p>")?;
///
/// let bytes = writer.to_vec()?;
/// let book = quire::Book::from_bytes(bytes)?;
///
/// assert_eq!(Some("Moby-Dick"), book.title());
/// assert_eq!("Loomings", book.chapters().first().unwrap().title());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BookWriter {
    book: Book,
}

impl Default for BookWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Book> for BookWriter {
    fn from(book: Book) -> Self {
        Self::from_book(book)
    }
}

impl BookWriter {
    /// Creates an empty EPUB 3 book.
    ///
    /// The package document is located at `OEBPS/content.opf`, beside an
    /// empty navigation document (`nav.xhtml`) and NCX (`toc.ncx`).
    /// A unique identifier is generated and the language is set to `en`.
    pub fn new() -> Self {
        let identifier = generate_identifier();
        let mut package = PackageDocument::new(EpubVersion::Epub3);

        package.unique_identifier = Some(UID.to_owned());
        package
            .metadata
            .identifiers
            .push(Identifier::new(identifier.as_str(), Some(UID.to_owned())));
        package.metadata.languages.push(DEFAULT_LANGUAGE.to_owned());

        let mut nav = ManifestItem::new(NAV_ID, NAV_HREF, consts::XHTML_TYPE);
        nav.properties.push(consts::NAV_PROPERTY.to_owned());
        package.manifest.push(nav);
        package.manifest.push(ManifestItem::new(NCX_ID, NCX_HREF, consts::NCX_TYPE));
        package.spine.toc = Some(NCX_ID.to_owned());

        let sibling = |href: &str| format!("{}/{href}", uri::parent(DEFAULT_OPF_PATH));
        let format = Format {
            container: ContainerDocument::new(DEFAULT_OPF_PATH),
            opf_path: DEFAULT_OPF_PATH.to_owned(),
            package,
            ncx: Some(NcxDocument::new(&identifier, "")),
            ncx_path: Some(sibling(NCX_HREF)),
            nav: Some(NavDocument::template("")),
            nav_path: Some(sibling(NAV_HREF)),
        };

        Self::from_book(Book::from_parts(
            format,
            Resources::default(),
            SpecialResources::default(),
            ChapterTree::default(),
        ))
    }

    /// Edits an existing book.
    pub fn from_book(book: Book) -> Self {
        Self { book }
    }

    /// Opens the EPUB at `path` for editing.
    pub fn open(path: impl AsRef<Path>) -> EpubResult<Self> {
        Book::open(path).map(Self::from_book)
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn into_book(self) -> Book {
        self.book
    }

    /// Appends a `dc:creator`.
    pub fn add_author(&mut self, name: &str) -> EpubResult<()> {
        if name.is_blank() {
            return Err(EpubError::argument("Author name must not be blank"));
        }
        self.book
            .format
            .package
            .metadata
            .creators
            .push(Creator::new(name.trim()));
        self.sync_ncx_authors()
    }

    /// Removes every `dc:creator` named `name`, returning whether any was removed.
    pub fn remove_author(&mut self, name: &str) -> EpubResult<bool> {
        let creators = &mut self.book.format.package.metadata.creators;
        let count = creators.len();

        creators.retain(|creator| creator.value != name.trim());
        let removed = creators.len() != count;

        self.sync_ncx_authors()?;
        Ok(removed)
    }

    pub fn clear_authors(&mut self) -> EpubResult<()> {
        self.book.format.package.metadata.creators.clear();
        self.sync_ncx_authors()
    }

    /// Replaces the main (first) `dc:title`.
    pub fn set_title(&mut self, title: &str) -> EpubResult<()> {
        if title.is_blank() {
            return Err(EpubError::argument("Title must not be blank"));
        }
        let title = title.trim();
        let format = &mut self.book.format;

        match format.package.metadata.titles.first_mut() {
            Some(main) => title.clone_into(main),
            None => format.package.metadata.titles.push(title.to_owned()),
        }
        if let Some(ncx) = &mut format.ncx {
            title.clone_into(&mut ncx.doc_title);
        }
        self.sync_ncx()
    }

    /// Removes every `dc:title`.
    pub fn remove_title(&mut self) -> EpubResult<()> {
        let format = &mut self.book.format;

        format.package.metadata.titles.clear();
        if let Some(ncx) = &mut format.ncx {
            ncx.doc_title.clear();
        }
        self.sync_ncx()
    }

    /// Adds a resource located at `name`, relative to the package document,
    /// returning the generated manifest id.
    ///
    /// # Errors
    /// [`EpubError::Argument`] when `name` or `content` is blank,
    /// a resource already exists at `name`,
    /// `content_type` is [`ContentType::Other`],
    /// or text content is not UTF-8.
    pub fn add_file(
        &mut self,
        name: &str,
        content: impl Into<Vec<u8>>,
        content_type: ContentType,
    ) -> EpubResult<String> {
        let content = content.into();

        if name.is_blank() {
            return Err(EpubError::argument("File name must not be blank"));
        } else if content.is_empty() {
            return Err(EpubError::argument("File content must not be empty"));
        }
        let media_type = content_type
            .media_type()
            .ok_or_else(|| EpubError::argument("File content type must be recognized"))?;

        let href = name.trim().replace('\\', "/");
        let path = uri::resolve(&href, &self.book.format.opf_path)?;
        if self.book.resources.by_path(&path).is_some() {
            return Err(EpubError::argument(format!("File `{name}` already exists")));
        }

        let content = if content_type.is_text() {
            let text = String::from_utf8(content)
                .map_err(|_| EpubError::argument(format!("File `{name}` is not UTF-8 text")))?;
            ResourceContent::Text(text)
        } else {
            ResourceContent::Binary(content)
        };

        let id = self.next_id(FILE_PREFIX);
        let href = uri::encode(&href).into_owned();

        self.book
            .format
            .package
            .manifest
            .push(ManifestItem::new(id.as_str(), href.as_str(), media_type));
        self.book
            .resources
            .push(Resource::new(href, path, media_type, content));
        Ok(id)
    }

    /// Appends a chapter to the spine and to every table of contents.
    ///
    /// `html` is used as-is when it is a complete document, otherwise it
    /// becomes the `body` of a generated XHTML document titled `title`.
    ///
    /// # Errors
    /// - [`EpubError::Argument`]: `title` or `html` is blank.
    /// - [`WriteError::MissingTocList`]: The book has no navigation document
    ///   with a `nav[epub:type=toc] > ol` to append to.
    pub fn add_chapter(&mut self, title: &str, html: &str) -> EpubResult<ChapterId> {
        if title.is_blank() {
            return Err(EpubError::argument("Chapter title must not be blank"));
        } else if html.is_blank() {
            return Err(EpubError::argument("Chapter content must not be blank"));
        }
        let title = title.trim();

        let Book {
            format,
            resources,
            special,
            chapters,
        } = &mut self.book;

        let has_toc_list = format
            .nav
            .as_ref()
            .and_then(NavDocument::toc)
            .and_then(|toc| toc.list())
            .is_some();
        let nav_path = match &format.nav_path {
            Some(nav_path) if has_toc_list => nav_path.clone(),
            _ => return Err(WriteError::MissingTocList.into()),
        };

        let mut number = max_suffix(CHAPTER_PREFIX, format.package.manifest.ids()) + 1;
        let (id, href, path) = loop {
            let id = format!("{CHAPTER_PREFIX}{number}");
            let href = format!("{id}.xhtml");
            let path = uri::resolve(&href, &format.opf_path)?;

            if format.package.manifest.by_id(&id).is_none() && resources.by_path(&path).is_none() {
                break (id, href, path);
            }
            number += 1;
        };

        // Package
        format
            .package
            .manifest
            .push(ManifestItem::new(id.as_str(), href.as_str(), consts::XHTML_TYPE));
        format.package.spine.item_refs.push(ItemRef::new(id.as_str()));

        // Navigation document
        let nav_href = uri::relativize(&path, &nav_path);
        if let Some(list) = format.nav.as_mut().and_then(NavDocument::toc_list_mut) {
            let anchor = Element::new("a")
                .with_attribute(consts::HREF, nav_href.as_str())
                .with_child(Node::Text(title.to_owned()));
            list.children_mut()
                .push(Node::Element(Element::new("li").with_child(Node::Element(anchor))));
        }

        // NCX
        if let Some(ncx) = &mut format.ncx {
            let ncx_path = format.ncx_path.as_deref().unwrap_or(&format.opf_path);
            let number = max_suffix(NAV_POINT_PREFIX, ncx.nav_points().map(NavPoint::id)) + 1;
            let play_order = ncx.max_play_order().map_or(1, |max| max + 1);

            ncx.nav_map.push(NavPoint {
                id: format!("{NAV_POINT_PREFIX}{number}"),
                play_order: Some(play_order),
                label: title.to_owned(),
                content_src: uri::relativize(&path, ncx_path),
                ..NavPoint::default()
            });
        }

        resources.push(Resource::new(
            href,
            path.as_str(),
            consts::XHTML_TYPE,
            ResourceContent::Text(chapter_document(title, html)),
        ));
        special.reading_order.push(path.clone());

        let mut chapter = ChapterData::new(title);
        chapter.relative_path = nav_href;
        chapter.absolute_path = Some(path);
        let chapter_id = chapters.push(None, chapter);

        log::debug!("Added chapter `{id}`: {title}");
        self.sync_nav()?;
        self.sync_ncx()?;
        Ok(chapter_id)
    }

    /// Removes every chapter: spine documents, guide references,
    /// navigation entries and every image except the cover.
    ///
    /// The navigation documents themselves are kept.
    pub fn clear_chapters(&mut self) -> EpubResult<()> {
        let package = &self.book.format.package;
        let kept: HashSet<&str> = [package.nav_item(), package.ncx_item(), package.cover_item()]
            .into_iter()
            .flatten()
            .map(ManifestItem::id)
            .collect();

        let spine_ids = package.spine.item_refs.iter().map(ItemRef::idref);
        let image_ids = package
            .manifest
            .items()
            .iter()
            .filter(|item| ContentType::from_media_type(&item.media_type).category() == ResourceCategory::Image)
            .map(ManifestItem::id);

        let removed: HashSet<String> = spine_ids
            .chain(image_ids)
            .filter(|id| !kept.contains(id))
            .map(str::to_owned)
            .collect();

        self.remove_items(&removed);

        let Book {
            format,
            special,
            chapters,
            ..
        } = &mut self.book;

        format.package.spine.item_refs.clear();
        format.package.guide.clear();
        if let Some(ncx) = &mut format.ncx {
            ncx.nav_map.clear();
        }
        if let Some(list) = format.nav.as_mut().and_then(NavDocument::toc_list_mut) {
            list.children_mut().clear();
        }
        special.reading_order.clear();
        chapters.clear();

        log::debug!("Cleared chapters, removing {} manifest items", removed.len());
        self.sync_nav()?;
        self.sync_ncx()
    }

    /// Replaces the cover with `data`, stored as `cover.<ext>` beside the package document.
    ///
    /// EPUB 3 books flag the image with the `cover-image` property,
    /// while EPUB 2 books reference it from a `<meta name="cover">`.
    pub fn set_cover(&mut self, data: impl Into<Vec<u8>>, image_format: ImageFormat) -> EpubResult<()> {
        let data = data.into();
        if data.is_empty() {
            return Err(EpubError::argument("Cover image must not be empty"));
        }
        self.remove_cover();

        let href = format!("{COVER_NAME}.{}", image_format.extension());
        let path = uri::resolve(&href, &self.book.format.opf_path)?;

        // Displace whatever already occupies the cover location
        let occupying = self.items_at(&path);
        self.remove_items(&occupying);
        self.book.resources.remove_by_path(&path);

        let id = match self.book.format.package.manifest.by_id(COVER_ID) {
            None => COVER_ID.to_owned(),
            Some(_) => self.next_id(&format!("{COVER_ID}-")),
        };

        let package = &mut self.book.format.package;
        let mut item = ManifestItem::new(id.as_str(), href.as_str(), image_format.media_type());

        match package.version {
            EpubVersion::Epub3 => item.properties.push(consts::COVER_IMAGE.to_owned()),
            EpubVersion::Epub2 => package.metadata.metas.push(Meta::named(consts::COVER, id.as_str())),
        }
        package.manifest.push(item);

        self.book.resources.push(Resource::new(
            href,
            path,
            image_format.media_type(),
            ResourceContent::Binary(data),
        ));
        Ok(())
    }

    /// Removes the cover image, its manifest item and any `<meta name="cover">`.
    pub fn remove_cover(&mut self) {
        let package = &mut self.book.format.package;

        let mut removed: HashSet<String> = package
            .manifest
            .items()
            .iter()
            .filter(|item| item.has_property(consts::COVER_IMAGE))
            .map(|item| item.id.clone())
            .collect();
        removed.extend(package.cover_item().map(|item| item.id.clone()));

        package
            .metadata
            .metas
            .retain(|meta| meta.name() != Some(consts::COVER));

        self.remove_items(&removed);
    }

    /// See [`Book::write_options`].
    pub fn options(&self) -> EpubWriteOptions<'_> {
        self.book.write_options()
    }

    /// Saves the book to `path` with default [`EpubWriteOptions`].
    pub fn write(&self, path: impl AsRef<Path>) -> EpubResult<()> {
        self.options().save(path)
    }

    /// Writes the book to `writer` with default [`EpubWriteOptions`].
    pub fn write_to<W: Write>(&self, writer: W) -> EpubResult<W> {
        self.options().write(writer)
    }

    pub fn to_vec(&self) -> EpubResult<Vec<u8>> {
        self.options().to_vec()
    }

    fn next_id(&self, prefix: &str) -> String {
        let manifest = &self.book.format.package.manifest;
        let mut number = max_suffix(prefix, manifest.ids()) + 1;

        while manifest.by_id(&format!("{prefix}{number}")).is_some() {
            number += 1;
        }
        format!("{prefix}{number}")
    }

    /// Ids of the manifest items located at the absolute `path`.
    fn items_at(&self, path: &str) -> HashSet<String> {
        let format = &self.book.format;

        format
            .package
            .manifest
            .items()
            .iter()
            .filter(|item| {
                uri::resolve_decoded(&item.href, &format.opf_path).is_ok_and(|item_path| item_path == path)
            })
            .map(|item| item.id.clone())
            .collect()
    }

    /// Removes the manifest items named by `ids` together with their
    /// itemrefs, reading order entries, chapters and resources.
    ///
    /// A resource still referenced by a remaining item is kept.
    fn remove_items(&mut self, ids: &HashSet<String>) {
        if ids.is_empty() {
            return;
        }
        let Book {
            format,
            resources,
            special,
            chapters,
        } = &mut self.book;
        let opf_path = &format.opf_path;
        let package = &mut format.package;

        let paths: HashSet<String> = package
            .manifest
            .items()
            .iter()
            .filter(|item| ids.contains(&item.id))
            .filter_map(|item| uri::resolve_decoded(&item.href, opf_path).ok())
            .collect();

        package.manifest.retain(|item| !ids.contains(&item.id));
        package.spine.item_refs.retain(|item_ref| !ids.contains(&item_ref.idref));

        let referenced: HashSet<String> = package
            .manifest
            .items()
            .iter()
            .filter_map(|item| uri::resolve_decoded(&item.href, opf_path).ok())
            .collect();

        for path in paths.difference(&referenced) {
            log::trace!("Removing resource `{path}`");
            resources.remove_by_path(path);
        }
        special
            .reading_order
            .retain(|path| resources.by_path(path).is_some());

        if chapters
            .iter()
            .any(|chapter| chapter.absolute_path().is_some_and(|path| resources.by_path(path).is_none()))
        {
            log::debug!("Chapters reference removed documents; rebuilding the chapter tree");
            if let Ok(tree) = super::loader::build_chapters(format) {
                *chapters = tree;
            }
        }
    }

    fn sync_ncx_authors(&mut self) -> EpubResult<()> {
        let format = &mut self.book.format;

        if let Some(ncx) = &mut format.ncx {
            ncx.doc_authors = format
                .package
                .metadata
                .creators
                .iter()
                .map(|creator| creator.value.clone())
                .collect();
        }
        self.sync_ncx()
    }

    /// Re-serializes the NCX into its resource.
    fn sync_ncx(&mut self) -> EpubResult<()> {
        let format = &self.book.format;
        let (Some(ncx), Some(ncx_path)) = (&format.ncx, &format.ncx_path) else {
            return Ok(());
        };
        let text = ncx_to_string(ncx)?;

        match self.book.resources.by_path_mut(ncx_path) {
            Some(resource) => resource.content = ResourceContent::Text(text),
            None => {
                let href = uri::relativize(ncx_path, &format.opf_path);
                let resource = Resource::new(href, ncx_path.as_str(), consts::NCX_TYPE, ResourceContent::Text(text));
                self.book.resources.push(resource);
            }
        }
        Ok(())
    }

    /// Re-serializes the navigation document into its HTML resource.
    fn sync_nav(&mut self) -> EpubResult<()> {
        let format = &self.book.format;
        let (Some(nav), Some(nav_path)) = (&format.nav, &format.nav_path) else {
            return Ok(());
        };

        let mut buffer = Vec::new();
        xml::XmlWriter::new_compact(&mut buffer).write_document(&nav.document)?;
        let text = String::from_utf8(buffer).map_err(std::io::Error::other)?;

        match self.book.resources.by_path_mut(nav_path) {
            Some(resource) => resource.content = ResourceContent::Text(text),
            None => {
                let href = uri::relativize(nav_path, &format.opf_path);
                let resource = Resource::new(href, nav_path.as_str(), consts::XHTML_TYPE, ResourceContent::Text(text));
                self.book.resources.push(resource);
            }
        }
        Ok(())
    }
}

/// Wraps `html` into an XHTML document unless it already is one.
fn chapter_document(title: &str, html: &str) -> String {
    if html.contains("<html") {
        return html.to_owned();
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE html>\n\
         <html xmlns=\"{}\" xmlns:epub=\"{}\">\n\
         <head>\n  <title>{}</title>\n</head>\n\
         <body>\n{html}\n</body>\n\
         </html>\n",
        consts::XHTML_NS,
        consts::OPS_NS,
        xml::escape(title),
    )
}

/// A `urn:quire:` identifier derived from the current time.
fn generate_identifier() -> String {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("urn:quire:{:x}-{:08x}", elapsed.as_secs(), elapsed.subsec_nanos())
}
