use crate::epub::consts::{self, bytes};
use crate::epub::container::{ContainerDocument, RootFile};
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use quick_xml::events::Event;

/// Parses `META-INF/container.xml`.
///
/// Fails when no `rootfile` exists or none references a package document.
pub(crate) fn parse_container(data: &[u8]) -> ParserResult<ContainerDocument> {
    let mut reader = xml::new_reader(data);
    let mut container = ContainerDocument::default();

    while let Some(event) = reader.next() {
        let el = match event? {
            Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ROOT_FILE) => el,
            _ => continue,
        };
        let mut attributes = el.xml_attributes();

        let Some(full_path) = attributes.take(consts::FULL_PATH) else {
            log::warn!("Skipping `rootfile` without `full-path`");
            continue;
        };
        container.root_files.push(RootFile {
            full_path,
            media_type: attributes.take(consts::MEDIA_TYPE).unwrap_or_default(),
        });
    }

    if container.root_files.is_empty() {
        Err(FormatError::NoRootFile)
    } else if container.root_file_path().is_none() {
        Err(FormatError::NoOpfReference)
    } else {
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container() {
        let xml = br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/book.pdf" media-type="application/pdf"/>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;
        let container = parse_container(xml).unwrap();

        assert_eq!(2, container.root_files().len());
        assert_eq!(Some("OEBPS/content.opf"), container.root_file_path());
    }

    #[test]
    fn test_parse_container_errors() {
        let none = br#"<container><rootfiles/></container>"#;
        let no_opf = br#"<container><rootfiles><rootfile full-path="a.pdf" media-type="application/pdf"/></rootfiles></container>"#;

        assert!(matches!(parse_container(none), Err(FormatError::NoRootFile)));
        assert!(matches!(parse_container(no_opf), Err(FormatError::NoOpfReference)));
        assert!(matches!(parse_container(b"<container><rootfiles></container"), Err(_)));
    }
}
