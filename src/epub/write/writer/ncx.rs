use crate::epub::consts;
use crate::epub::ncx::{NavPoint, NavTarget, NavTargetList, NcxDocument};
use crate::epub::write::writer::EpubWriter;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

const NCX_VERSION: &str = "2005-1";

struct NcxWriter<'ebook, W> {
    ncx: &'ebook NcxDocument,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> NcxWriter<'ebook, W> {
    fn new(ncx: &'ebook NcxDocument, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            ncx,
        }
    }

    fn write_ncx(mut self) -> WriterResult<()> {
        let ncx = self.ncx;

        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: "ncx",
            attributes: {
                "xmlns"         => consts::NCX_NS;
                consts::VERSION => NCX_VERSION;
            }
            inner_content: {
                self.write_head()?;
                self.write_text_container("docTitle", &ncx.doc_title)?;

                for author in &ncx.doc_authors {
                    self.write_text_container("docAuthor", author)?;
                }

                write_element! {
                    writer: self.writer,
                    tag: "navMap",
                    inner_content: {
                        for point in &ncx.nav_map {
                            self.write_nav_point(point)?;
                        }
                    }
                }?;

                if let Some(page_list) = &ncx.page_list {
                    self.write_target_list("pageList", "pageTarget", page_list)?;
                }
                for nav_list in &ncx.nav_lists {
                    self.write_target_list("navList", "navTarget", nav_list)?;
                }
            }
        }
    }

    fn write_head(&mut self) -> WriterResult<()> {
        let ncx = self.ncx;

        write_element! {
            writer: self.writer,
            tag: "head",
            inner_content: {
                for meta in &ncx.metas {
                    write_element! {
                        writer: self.writer,
                        tag: consts::META,
                        attributes: {
                            consts::NAME    => meta.name.as_str();
                            consts::CONTENT => meta.content.as_str();
                            consts::SCHEME  => meta.scheme.as_deref();
                        }
                    }?;
                }
            }
        }
    }

    /// `<tag><text>value</text></tag>`, as used by titles, authors and labels.
    fn write_text_container(&mut self, tag: &'ebook str, text: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: tag,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: "text",
                    text: text,
                }?;
            }
        }
    }

    fn write_content(&mut self, src: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: consts::CONTENT,
            attributes: {
                consts::SRC => src;
            }
        }
    }

    fn write_nav_point(&mut self, point: &NavPoint) -> WriterResult<()> {
        let play_order = point.play_order.map(|order| order.to_string());

        write_element! {
            writer: self.writer,
            tag: "navPoint",
            attributes: {
                consts::ID         => point.id.as_str();
                consts::CLASS      => point.class.as_deref();
                consts::PLAY_ORDER => play_order.as_deref();
            }
            inner_content: {
                self.write_text_container("navLabel", &point.label)?;
                self.write_content(&point.content_src)?;

                for child in &point.children {
                    self.write_nav_point(child)?;
                }
            }
        }
    }

    fn write_target_list(
        &mut self,
        list_tag: &'ebook str,
        target_tag: &'ebook str,
        list: &NavTargetList,
    ) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: list_tag,
            attributes: {
                consts::ID    => list.id.as_deref();
                consts::CLASS => list.class.as_deref();
            }
            inner_content: {
                if let Some(label) = &list.label {
                    self.write_text_container("navLabel", label)?;
                }
                for target in &list.targets {
                    self.write_target(target_tag, target)?;
                }
            }
        }
    }

    fn write_target(&mut self, tag: &'ebook str, target: &NavTarget) -> WriterResult<()> {
        let play_order = target.play_order.map(|order| order.to_string());

        write_element! {
            writer: self.writer,
            tag: tag,
            attributes: {
                consts::ID         => target.id.as_deref();
                consts::CLASS      => target.class.as_deref();
                "type"             => target.kind.as_deref();
                consts::VALUE      => target.value.as_deref();
                consts::PLAY_ORDER => play_order.as_deref();
            }
            inner_content: {
                self.write_text_container("navLabel", &target.label)?;
                self.write_content(&target.content_src)?;
            }
        }
    }
}

/// Serializes `ncx` exactly as it is emitted into the archive.
pub(crate) fn ncx_to_string(ncx: &NcxDocument) -> WriterResult<String> {
    let mut buffer = Vec::new();
    NcxWriter::new(ncx, &mut buffer).write_ncx()?;
    Ok(String::from_utf8(buffer).map_err(std::io::Error::other)?)
}

impl<W: Write> EpubWriter<'_, W> {
    /// Writes the NCX from its model, replacing whatever was read.
    pub(super) fn write_ncx(&mut self) -> WriterResult<()> {
        let book = self.book;
        let (Some(ncx), Some(ncx_path)) = (&book.format.ncx, &book.format.ncx_path) else {
            return Ok(());
        };

        self.start_entry(ncx_path, true)?;
        NcxWriter::new(ncx, &mut self.zip).write_ncx()
    }
}
