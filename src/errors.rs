//! Error-related types for reading and writing a [`Book`](crate::Book).

use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, EpubError>`.
pub type EpubResult<T> = Result<T, EpubError>;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Unified error type.
///
/// Any error aborts the whole read or write call; a partially built
/// [`Book`](crate::Book) is never returned.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    /// A required input (path, filename, title, content) is blank.
    ///
    /// Raised before any I/O takes place.
    #[error("[ArgumentError]: {0}")]
    Argument(String),

    /// The archive or one of its entries cannot be located or read.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The archive content violates the EPUB structure.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The book state is inconsistent with what the writer requires.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// An IO exception occurred during writing.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl EpubError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    /// The language-agnostic [`ErrorKind`] of this error.
    ///
    /// # Examples
    /// - Matching on the kind of failure:
    /// ```
    /// # use quire::errors::ErrorKind;
    /// let error = quire::read_book("/no/such/book.epub").unwrap_err();
    /// assert_eq!(ErrorKind::NotFound, error.kind());
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Argument(_) => ErrorKind::Argument,
            Self::Archive(ArchiveError::FileNotFound { .. } | ArchiveError::EntryNotFound { .. }) => {
                ErrorKind::NotFound
            }
            Self::Archive(_) | Self::Io(_) => ErrorKind::Io,
            Self::Format(_) => ErrorKind::Parse,
            Self::Write(_) => ErrorKind::Write,
        }
    }
}

/// Coarse classification of an [`EpubError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Blank or missing required input.
    Argument,
    /// Missing archive file or archive entry.
    NotFound,
    /// Structurally invalid EPUB content.
    Parse,
    /// Book state unsuitable for writing.
    Write,
    /// Underlying I/O failure.
    Io,
}

/// Possible errors from the archive backing a [`Book`](crate::Book).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive file does not exist.
    #[error("[FileNotFound - `{path:?}`]: EPUB file does not exist")]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// An entry could not be located after trying every lookup variant
    /// (leading slash, slash direction, percent-encoding).
    #[error("[EntryNotFound - `{path}`]: No archive entry matches the requested path")]
    EntryNotFound {
        /// The path originally requested.
        path: String,
    },

    /// The entry exists, although is unable to be read, typically I/O.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The entry responsible for triggering the error.
        path: String,
    },

    /// The archive itself is unreadable due to an unsupported format or malformed state.
    ///
    /// Path *is* [`None`] when the archive was opened from a reader or a byte buffer.
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },
}

/// Structural EPUB violations found while parsing.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// File content unexpectedly causes an internal parser error,
    /// such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// `META-INF/container.xml` lists no `rootfile` at all.
    #[error("Missing `rootfile` element in `META-INF/container.xml`")]
    NoRootFile,

    /// `META-INF/container.xml` lists root files, none of which is a package document.
    #[error("No `rootfile` in `META-INF/container.xml` references an `.opf` package document")]
    NoOpfReference,

    /// The `package` element is not found.
    #[error("Missing `package` element in `{0}`")]
    NoPackageFound(String),

    /// The package `version` attribute is neither EPUB 2 nor EPUB 3.
    #[error("Unsupported package epub `version`: {0}")]
    UnsupportedVersion(String),

    /// A required attribute is missing from an element.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    /// A required element is missing from a document.
    #[error("Required element missing: {0}")]
    MissingElement(String),

    /// An NCX `navPoint` has no `navLabel` text.
    #[error("NCX `navPoint` `{0}` has no `navLabel`")]
    MissingNavLabel(String),

    /// An NCX `navPoint` has no `content` source.
    #[error("NCX `navPoint` `{0}` has no `content[src]`")]
    MissingNavContent(String),

    /// A relative href climbs above the archive root.
    #[error("No room to normalize `{href}` against `{base}`")]
    NoRoomToNormalize {
        /// The relative href being resolved.
        href: String,
        /// The document the href is relative to.
        base: String,
    },

    /// An archive entry exceeds the per-entry size ceiling.
    #[error("Entry `{path}` is too large ({size} bytes)")]
    ResourceTooLarge {
        /// The stored entry name.
        path: String,
        /// Uncompressed size in bytes.
        size: u64,
    },

    /// A text resource is not valid UTF-8 (or BOM-marked UTF-16).
    #[error("Entry `{path}` cannot be decoded as UTF-8")]
    InvalidUtf8 {
        /// The stored entry name.
        path: String,
    },
}

/// Book state the writer cannot serialize.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// The spine declares a `toc` item, yet the NCX location is unknown.
    #[error("Spine declares toc `{0}` but the book has no NCX path")]
    MissingNcxPath(String),

    /// Chapters require a `nav[epub:type=toc] > ol` element to append entries to.
    #[error("Missing toc anchor element: nav[epub:type=toc]/ol")]
    MissingTocList,

    /// The requested cover image format is not supported.
    #[error("Unsupported cover image format: {0}")]
    UnsupportedCoverFormat(String),
}
