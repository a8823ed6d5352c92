use crate::epub::consts;
use crate::epub::format::Format;
use crate::epub::package::{Creator, EpubVersion, ManifestItem, Meta, PackageDocument};
use crate::epub::write::writer::EpubWriter;
use crate::errors::WriteError;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

const YES: &str = "yes";
const NO: &str = "no";

pub(super) struct PackageWriter<'ebook, W> {
    format: &'ebook Format,
    package: &'ebook PackageDocument,
    writer: XmlWriter<'ebook, W>,
}

impl<'ebook, W: Write> PackageWriter<'ebook, W> {
    pub(super) fn new(format: &'ebook Format, writer: W) -> Self {
        Self {
            package: &format.package,
            writer: XmlWriter::new(writer),
            format,
        }
    }

    pub(super) fn write_opf(mut self) -> WriterResult<()> {
        let package = self.package;

        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: consts::PACKAGE,
            attributes: {
                "xmlns"            => consts::OPF_NS;
                consts::VERSION    => package.version.as_str();
                consts::UNIQUE_ID  => package.unique_identifier.as_deref();
                consts::LANG       => package.lang.as_deref();
                consts::PREFIX     => package.prefix.as_deref();
            }
            inner_content: {
                self.write_metadata()?;
                self.write_manifest()?;
                self.write_spine()?;
                self.write_guide()?;
            }
        }
    }

    fn write_metadata(&mut self) -> WriterResult<()> {
        let package = self.package;
        let metadata = &package.metadata;

        write_element! {
            writer: self.writer,
            tag: "metadata",
            attributes: {
                "xmlns:dc"  => consts::DC_NS;
                "xmlns:opf" => consts::OPF_NS;
            }
            inner_content: {
                self.write_dc_strings("dc:title", &metadata.titles)?;
                self.write_creators("dc:creator", &metadata.creators)?;
                self.write_creators("dc:contributor", &metadata.contributors)?;
                self.write_dc_strings("dc:subject", &metadata.subjects)?;
                self.write_dc_strings("dc:description", &metadata.descriptions)?;
                self.write_dc_strings("dc:publisher", &metadata.publishers)?;

                for date in &metadata.dates {
                    write_element! {
                        writer: self.writer,
                        tag: "dc:date",
                        text: &date.value,
                        attributes: {
                            "opf:event" => date.event.as_deref();
                        }
                    }?;
                }

                self.write_dc_strings("dc:type", &metadata.types)?;
                self.write_dc_strings("dc:format", &metadata.formats)?;

                for identifier in &metadata.identifiers {
                    write_element! {
                        writer: self.writer,
                        tag: "dc:identifier",
                        text: &identifier.value,
                        attributes: {
                            consts::ID   => identifier.id.as_deref();
                            "opf:scheme" => identifier.scheme.as_deref();
                        }
                    }?;
                }

                self.write_dc_strings("dc:source", &metadata.sources)?;
                self.write_dc_strings("dc:language", &metadata.languages)?;
                self.write_dc_strings("dc:relation", &metadata.relations)?;
                self.write_dc_strings("dc:coverage", &metadata.coverages)?;
                self.write_dc_strings("dc:rights", &metadata.rights)?;

                for meta in &metadata.metas {
                    self.write_meta(meta)?;
                }
            }
        }
    }

    fn write_dc_strings(&mut self, tag: &'ebook str, values: &[String]) -> WriterResult<()> {
        for value in values {
            write_element! {
                writer: self.writer,
                tag: tag,
                text: value,
            }?;
        }
        Ok(())
    }

    fn write_creators(&mut self, tag: &'ebook str, creators: &[Creator]) -> WriterResult<()> {
        for creator in creators {
            write_element! {
                writer: self.writer,
                tag: tag,
                text: &creator.value,
                attributes: {
                    consts::ID               => creator.id.as_deref();
                    "opf:role"               => creator.role.as_deref();
                    "opf:file-as"            => creator.file_as.as_deref();
                    "opf:alternate-script"   => creator.alternate_script.as_deref();
                }
            }?;
        }
        Ok(())
    }

    /// EPUB 2 metas, and EPUB 3 metas identified by `name`, carry their value
    /// in `content`; EPUB 3 property metas carry it as text.
    /// Metas that were read keep their `content` attribute and text as-is.
    /// Otherwise EPUB 2 and named metas carry the value in `content`,
    /// and EPUB 3 property metas carry it as text.
    fn write_meta(&mut self, meta: &Meta) -> WriterResult<()> {
        let as_content = self.package.version == EpubVersion::Epub2 || meta.name.is_some();

        let (content, text) = if meta.content.is_some() || !meta.text.is_empty() {
            (meta.content.as_deref(), meta.text.as_str())
        } else if as_content {
            (Some(meta.value.as_str()), "")
        } else {
            (None, meta.value.as_str())
        };

        if text.is_empty() {
            write_element! {
                writer: self.writer,
                tag: consts::META,
                attributes: {
                    consts::NAME     => meta.name.as_deref();
                    consts::CONTENT  => content;
                    consts::ID       => meta.id.as_deref();
                    consts::REFINES  => meta.refines.as_deref();
                    consts::PROPERTY => meta.property.as_deref();
                    consts::SCHEME   => meta.scheme.as_deref();
                }
            }
        } else {
            write_element! {
                writer: self.writer,
                tag: consts::META,
                text: text,
                attributes: {
                    consts::NAME     => meta.name.as_deref();
                    consts::CONTENT  => content;
                    consts::ID       => meta.id.as_deref();
                    consts::REFINES  => meta.refines.as_deref();
                    consts::PROPERTY => meta.property.as_deref();
                    consts::SCHEME   => meta.scheme.as_deref();
                }
            }
        }
    }

    /// The cover item comes first, followed by the NCX item, then all others.
    fn write_manifest(&mut self) -> WriterResult<()> {
        let package = self.package;
        let cover = package.cover_item();
        let ncx = self.ncx_item()?;

        let leading = [cover, ncx.as_ref()];
        let remaining = package
            .manifest
            .items()
            .iter()
            .filter(|item| !leading.iter().flatten().any(|first| first.id == item.id));

        write_element! {
            writer: self.writer,
            tag: "manifest",
            inner_content: {
                for item in leading.iter().flatten().copied().chain(remaining) {
                    self.write_item(item)?;
                }
            }
        }
    }

    /// The manifest item named by the spine `toc`, synthesized from the
    /// NCX location when the manifest lacks it.
    fn ncx_item(&self) -> WriterResult<Option<ManifestItem>> {
        let Some(toc) = self.package.spine.toc() else {
            return Ok(None);
        };
        if let Some(item) = self.package.manifest.by_id(toc) {
            return Ok(Some(item.clone()));
        }
        let ncx_path = self
            .format
            .ncx_path
            .as_deref()
            .ok_or_else(|| WriteError::MissingNcxPath(toc.to_owned()))?;

        log::debug!("Synthesizing manifest item `{toc}` for NCX `{ncx_path}`");
        let href = uri::encode(&uri::relativize(ncx_path, &self.format.opf_path)).into_owned();
        Ok(Some(ManifestItem::new(toc, href, consts::NCX_TYPE)))
    }

    fn write_item(&mut self, item: &ManifestItem) -> WriterResult<()> {
        let properties = item.properties.join(" ");

        write_element! {
            writer: self.writer,
            tag: "item",
            attributes: {
                consts::ID                 => item.id.as_str();
                consts::HREF               => item.href.as_str();
                consts::MEDIA_TYPE         => item.media_type.as_str();
                consts::PROPERTIES, if !properties.is_empty() => properties.as_str();
                consts::FALLBACK           => item.fallback.as_deref();
                consts::FALLBACK_STYLE     => item.fallback_style.as_deref();
                consts::REQUIRED_NAMESPACE => item.required_namespace.as_deref();
                consts::REQUIRED_MODULES   => item.required_modules.as_deref();
                consts::MEDIA_OVERLAY      => item.media_overlay.as_deref();
            }
        }
    }

    fn write_spine(&mut self) -> WriterResult<()> {
        let package = self.package;
        let spine = &package.spine;

        write_element! {
            writer: self.writer,
            tag: "spine",
            attributes: {
                consts::TOC                        => spine.toc.as_deref();
                consts::PAGE_PROGRESSION_DIRECTION => spine.page_progression_direction.as_deref();
            }
            inner_content: {
                for item_ref in &spine.item_refs {
                    let properties = item_ref.properties.join(" ");

                    write_element! {
                        writer: self.writer,
                        tag: "itemref",
                        attributes: {
                            consts::IDREF  => item_ref.idref.as_str();
                            consts::ID     => item_ref.id.as_deref();
                            consts::LINEAR => if item_ref.linear { YES } else { NO };
                            consts::PROPERTIES, if !properties.is_empty() => properties.as_str();
                        }
                    }?;
                }
            }
        }
    }

    fn write_guide(&mut self) -> WriterResult<()> {
        let package = self.package;
        let guide = &package.guide;
        if guide.is_empty() {
            return Ok(());
        }

        write_element! {
            writer: self.writer,
            tag: "guide",
            inner_content: {
                for reference in guide {
                    write_element! {
                        writer: self.writer,
                        tag: "reference",
                        attributes: {
                            consts::GUIDE_TYPE  => reference.kind.as_str();
                            consts::GUIDE_TITLE => reference.title.as_deref();
                            consts::HREF        => reference.href.as_str();
                        }
                    }?;
                }
            }
        }
    }
}

impl<W: Write> EpubWriter<'_, W> {
    pub(super) fn write_package(&mut self) -> WriterResult<()> {
        let format = &self.book.format;

        // Fail before the entry starts when the NCX item cannot be written
        if let Some(toc) = format.package.spine.toc() {
            if format.package.manifest.by_id(toc).is_none() && format.ncx_path.is_none() {
                return Err(WriteError::MissingNcxPath(toc.to_owned()).into());
            }
        }
        let book = self.book;

        self.start_entry(&book.format.opf_path, true)?;
        PackageWriter::new(&book.format, &mut self.zip).write_opf()
    }
}
