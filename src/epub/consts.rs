// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";
pub(crate) const LANG: &str = "xml:lang";
pub(crate) const CLASS: &str = "class";

// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";
pub(crate) const MIMETYPE: &str = "mimetype";

// Namespaces
pub(crate) const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";
pub(crate) const OPF_NS: &str = "http://www.idpf.org/2007/opf";
pub(crate) const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub(crate) const NCX_NS: &str = "http://www.daisy.org/z3986/2005/ncx/";
pub(crate) const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub(crate) const OPS_NS: &str = "http://www.idpf.org/2007/ops";

// Media types
pub(crate) const EPUB_TYPE_MEDIA: &str = "application/epub+zip";
pub(crate) const PACKAGE_TYPE: &str = "application/oebps-package+xml";
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const XHTML_TYPE: &str = "application/xhtml+xml";

/// Separator for [`Book::author`](crate::Book::author).
pub(crate) const AUTHOR_SEPARATOR: &str = ", ";

// Container
pub(crate) const ROOT_FILE: &str = "rootfile";
pub(crate) const FULL_PATH: &str = "full-path";
pub(crate) const MEDIA_TYPE: &str = "media-type";

// Package attributes
pub(crate) const PACKAGE: &str = "package";
pub(crate) const VERSION: &str = "version";
pub(crate) const UNIQUE_ID: &str = "unique-identifier";
pub(crate) const PREFIX: &str = "prefix";

// Metadata elements (local names)
pub(crate) const TITLE: &str = "title";
pub(crate) const CREATOR: &str = "creator";
pub(crate) const CONTRIBUTOR: &str = "contributor";
pub(crate) const SUBJECT: &str = "subject";
pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const PUBLISHER: &str = "publisher";
pub(crate) const DATE: &str = "date";
pub(crate) const TYPE: &str = "type";
pub(crate) const FORMAT: &str = "format";
pub(crate) const IDENTIFIER: &str = "identifier";
pub(crate) const SOURCE: &str = "source";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const RELATION: &str = "relation";
pub(crate) const COVERAGE: &str = "coverage";
pub(crate) const RIGHTS: &str = "rights";
pub(crate) const META: &str = "meta";

// Metadata attributes
pub(crate) const ROLE: &str = "role";
pub(crate) const FILE_AS: &str = "file-as";
pub(crate) const ALTERNATE_SCRIPT: &str = "alternate-script";
pub(crate) const SCHEME: &str = "scheme";
pub(crate) const EVENT: &str = "event";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const REFINES: &str = "refines";
pub(crate) const PROPERTY: &str = "property";
pub(crate) const COVER: &str = "cover";

// Manifest attributes
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const FALLBACK: &str = "fallback";
pub(crate) const FALLBACK_STYLE: &str = "fallback-style";
pub(crate) const REQUIRED_NAMESPACE: &str = "required-namespace";
pub(crate) const REQUIRED_MODULES: &str = "required-modules";
pub(crate) const MEDIA_OVERLAY: &str = "media-overlay";

// Manifest item properties
pub(crate) const COVER_IMAGE: &str = "cover-image";
pub(crate) const NAV_PROPERTY: &str = "nav";

// Spine attributes
pub(crate) const TOC: &str = "toc";
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const PAGE_PROGRESSION_DIRECTION: &str = "page-progression-direction";

// Guide attributes
pub(crate) const GUIDE_TITLE: &str = "title";
pub(crate) const GUIDE_TYPE: &str = "type";

// Navigation
pub(crate) const EPUB_TYPE: &str = "epub:type";
pub(crate) const PLAY_ORDER: &str = "playOrder";
pub(crate) const VALUE: &str = "value";

// Constants compared against raw element names
pub(crate) mod bytes {
    pub(crate) const ROOT_FILE: &[u8] = super::ROOT_FILE.as_bytes();
    pub(crate) const PACKAGE: &[u8] = super::PACKAGE.as_bytes();
    pub(crate) const METADATA: &[u8] = b"metadata";
    pub(crate) const MANIFEST: &[u8] = b"manifest";
    pub(crate) const SPINE: &[u8] = b"spine";
    pub(crate) const GUIDE: &[u8] = b"guide";

    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";
    pub(crate) const REFERENCE: &[u8] = b"reference";

    // NCX
    pub(crate) const HEAD: &[u8] = b"head";
    pub(crate) const META: &[u8] = super::META.as_bytes();
    pub(crate) const DOC_TITLE: &[u8] = b"docTitle";
    pub(crate) const DOC_AUTHOR: &[u8] = b"docAuthor";
    pub(crate) const NAV_MAP: &[u8] = b"navMap";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint";
    pub(crate) const NAV_LABEL: &[u8] = b"navLabel";
    pub(crate) const CONTENT: &[u8] = super::CONTENT.as_bytes();
    pub(crate) const PAGE_LIST: &[u8] = b"pageList";
    pub(crate) const PAGE_TARGET: &[u8] = b"pageTarget";
    pub(crate) const NAV_LIST: &[u8] = b"navList";
    pub(crate) const NAV_TARGET: &[u8] = b"navTarget";
}
