//! # quire
//!
//! A library for reading, editing and writing EPUB 2 and 3 publications.
//!
//! A [`Book`] is loaded fully into memory: the OCF container, the OPF package
//! (metadata, manifest, spine and guide), the NCX and Nav navigation documents,
//! every manifest resource and a [chapter tree](epub::chapter::ChapterTree)
//! built from the table of contents.
//!
//! ## Examples
//! Opening a book and listing its chapters:
//! ```no_run
//! # fn main() -> quire::errors::EpubResult<()> {
//! let book = quire::read_book("moby-dick.epub")?;
//!
//! println!("{} by {}", book.title().unwrap_or("Untitled"), book.author());
//!
//! for chapter in book.chapters().iter() {
//!     println!("{}{}", "  ".repeat(chapter.depth()), chapter.title());
//! }
//! # Ok(())
//! # }
//! ```
//! Creating a book from scratch:
//! ```no_run
//! # fn main() -> quire::errors::EpubResult<()> {
//! use quire::BookWriter;
//!
//! let mut writer = BookWriter::new();
//! writer.set_title("Notes")?;
//! writer.add_author("Jane Doe")?;
//! writer.add_chapter("First", "<p>Hello</p>")?;
//! writer.write("notes.epub")?;
//! # Ok(())
//! # }
//! ```
//! Reading with relaxed `meta` value handling:
//! ```no_run
//! # fn main() -> quire::errors::EpubResult<()> {
//! let book = quire::EpubOpenOptions::new()
//!     .meta_content_fallback(true)
//!     .open("legacy.epub")?;
//! # Ok(())
//! # }
//! ```

mod archive;
mod parser;
mod util;
mod writer;

pub mod epub;
pub mod errors;

use crate::errors::EpubResult;
use std::path::Path;

pub use self::epub::{Book, BookWriter, EpubOpenOptions, EpubWriteOptions};

/// Opens the EPUB at `path` with default [`EpubOpenOptions`].
///
/// Equivalent to [`Book::open`].
pub fn read_book(path: impl AsRef<Path>) -> EpubResult<Book> {
    Book::open(path)
}

/// Saves `book` to `path`, replacing any existing file.
///
/// Equivalent to `book.write_options().save(path)`.
pub fn write_book(book: &Book, path: impl AsRef<Path>) -> EpubResult<()> {
    book.write_options().save(path)
}
