use crate::epub::consts;
use crate::epub::container::RootFile;
use crate::epub::write::writer::EpubWriter;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

const CONTAINER_VERSION: &str = "1.0";

struct ContainerWriter<'ebook, W> {
    root_files: &'ebook [RootFile],
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> ContainerWriter<'ebook, W> {
    fn new(root_files: &'ebook [RootFile], writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            root_files,
        }
    }

    fn write_container(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: "container",
            attributes: {
                consts::VERSION => CONTAINER_VERSION;
                "xmlns"         => consts::CONTAINER_NS;
            }
            inner_content: {
                self.write_root_files()?;
            }
        }
    }

    fn write_root_files(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: "rootfiles",
            inner_content: {
                for root_file in self.root_files {
                    write_element! {
                        writer: self.writer,
                        tag: consts::ROOT_FILE,
                        attributes: {
                            // Root file paths must not be prefixed with '/'
                            consts::FULL_PATH  => root_file.full_path.trim_start_matches('/');
                            consts::MEDIA_TYPE => root_file.media_type.as_str();
                        }
                    }?;
                }
            }
        }
    }
}

impl<W: Write> EpubWriter<'_, W> {
    pub(super) fn write_container(&mut self) -> WriterResult<()> {
        let book = self.book;

        self.start_entry(consts::CONTAINER, true)?;
        ContainerWriter::new(&book.format.container.root_files, &mut self.zip).write_container()
    }
}
