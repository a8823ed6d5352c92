mod container;
mod ncx;
mod package;

pub(super) use self::ncx::ncx_to_string;

use crate::epub::Book;
use crate::epub::consts;
use crate::writer::WriterResult;
use crate::writer::xml::XmlWriter;
use crate::writer::zip::ZipWriter;
use std::collections::HashSet;
use std::io::Write;

pub(super) struct EpubWriter<'ebook, W: Write> {
    book: &'ebook Book,
    zip: ZipWriter<W>,
    /// Archive entries already emitted, which later resources must not repeat.
    written: HashSet<String>,
}

impl<'ebook, W: Write> EpubWriter<'ebook, W> {
    pub(super) fn new(book: &'ebook Book, writer: W, compression: u8) -> Self {
        Self {
            book,
            zip: ZipWriter::new(writer, compression),
            written: HashSet::new(),
        }
    }

    pub(super) fn write(mut self) -> WriterResult<W> {
        log::debug!(
            "Writing EPUB {} with {} resources",
            self.book.version(),
            self.book.resources.len(),
        );
        self.write_mimetype()?;
        self.write_container()?;
        self.write_package()?;
        self.write_ncx()?;
        self.write_nav()?;
        self.write_resources()?;
        self.zip.finish()
    }

    fn write_mimetype(&mut self) -> WriterResult<()> {
        // EPUB requires that the mimetype file must be uncompressed
        self.start_entry(consts::MIMETYPE, false)?;
        self.zip.write_all(consts::EPUB_TYPE_MEDIA.as_bytes())?;
        Ok(())
    }

    /// Writes the navigation document from its element tree.
    fn write_nav(&mut self) -> WriterResult<()> {
        let book = self.book;
        let format = &book.format;
        let (Some(nav), Some(nav_path)) = (&format.nav, &format.nav_path) else {
            return Ok(());
        };

        self.start_entry(nav_path, true)?;
        XmlWriter::new_compact(&mut self.zip).write_document(&nav.document)
    }

    fn write_resources(&mut self) -> WriterResult<()> {
        let book = self.book;

        for resource in book.resources.iter() {
            if self.written.contains(&resource.absolute_path) {
                log::trace!("Skipping already written entry `{}`", resource.absolute_path);
                continue;
            }
            self.start_entry(&resource.absolute_path, true)?;
            self.zip.write_all(resource.bytes())?;
        }
        Ok(())
    }

    /// Starts an archive entry at the absolute `path`, remembering it as written.
    fn start_entry(&mut self, path: &str, compressed: bool) -> WriterResult<()> {
        let name = path.trim_start_matches('/');
        self.written.insert(format!("/{name}"));

        if compressed {
            self.zip.start_file(name)
        } else {
            self.zip.start_uncompressed_file(name)
        }
    }
}
