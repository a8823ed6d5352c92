use crate::epub::consts;
use crate::epub::package::{Creator, Date, EpubVersion, Identifier, Meta, Metadata};
use crate::epub::parser::package::PackageParser;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlAttributes, XmlElement, XmlReader};
use crate::util::StrExt;
use quick_xml::events::BytesStart;

impl PackageParser<'_> {
    pub(super) fn parse_metadata(
        &mut self,
        metadata_start: &BytesStart,
        metadata: &mut Metadata,
    ) -> ParserResult<()> {
        self.for_each_child(metadata_start, |parser, el, is_empty| {
            let text = if is_empty {
                String::new()
            } else {
                parser.reader.get_raw_element_text(el)?.trim().to_owned()
            };
            let local_name = String::from_utf8_lossy(el.local_name().as_ref()).into_owned();

            parser.handle_metadata_element(metadata, &local_name, el.xml_attributes(), text);
            Ok(())
        })
    }

    fn handle_metadata_element(
        &self,
        metadata: &mut Metadata,
        local_name: &str,
        mut attributes: XmlAttributes,
        text: String,
    ) {
        if local_name == consts::META {
            let meta = self.new_meta(&mut attributes, text);
            metadata.metas.push(meta);
            return;
        }
        let strings = match local_name {
            consts::CREATOR | consts::CONTRIBUTOR => {
                let creator = Creator {
                    value: text,
                    id: attributes.take(consts::ID),
                    role: attributes.take_local(consts::ROLE),
                    file_as: attributes.take_local(consts::FILE_AS),
                    alternate_script: attributes.take_local(consts::ALTERNATE_SCRIPT),
                };
                match local_name {
                    consts::CREATOR => metadata.creators.push(creator),
                    _ => metadata.contributors.push(creator),
                }
                return;
            }
            consts::DATE => {
                metadata.dates.push(Date {
                    value: text,
                    event: attributes.take_local(consts::EVENT),
                });
                return;
            }
            consts::IDENTIFIER => {
                metadata.identifiers.push(Identifier {
                    value: text,
                    id: attributes.take(consts::ID),
                    scheme: attributes.take_local(consts::SCHEME),
                });
                return;
            }
            consts::TITLE => &mut metadata.titles,
            consts::SUBJECT => &mut metadata.subjects,
            consts::DESCRIPTION => &mut metadata.descriptions,
            consts::PUBLISHER => &mut metadata.publishers,
            consts::TYPE => &mut metadata.types,
            consts::FORMAT => &mut metadata.formats,
            consts::SOURCE => &mut metadata.sources,
            consts::LANGUAGE => &mut metadata.languages,
            consts::RELATION => &mut metadata.relations,
            consts::COVERAGE => &mut metadata.coverages,
            consts::RIGHTS => &mut metadata.rights,
            _ => {
                log::trace!("Ignoring metadata element `{local_name}`");
                return;
            }
        };
        strings.push(text);
    }

    /// EPUB 2 meta values live in the `content` attribute, EPUB 3 meta values in
    /// the element text. With the content fallback enabled, a blank value
    /// from the expected source is replaced by the other one.
    fn new_meta(&self, attributes: &mut XmlAttributes, text: String) -> Meta {
        let content = attributes.take(consts::CONTENT);

        let raw_content = content.as_deref().unwrap_or_default();

        let (preferred, other) = match self.version {
            EpubVersion::Epub2 => (raw_content, text.as_str()),
            EpubVersion::Epub3 => (text.as_str(), raw_content),
        };
        let value = if self.meta_content_fallback && preferred.is_blank() {
            other
        } else {
            preferred
        };

        Meta {
            value: value.to_owned(),
            content,
            text,
            name: attributes.take(consts::NAME),
            id: attributes.take(consts::ID),
            refines: attributes.take(consts::REFINES),
            property: attributes.take(consts::PROPERTY),
            scheme: attributes.take_local(consts::SCHEME),
        }
    }
}
