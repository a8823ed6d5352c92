mod guide;
mod manifest;
mod metadata;
mod spine;

use crate::epub::consts::{self, bytes};
use crate::epub::package::{EpubVersion, PackageDocument};
use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::parser::xml::{self, ByteReader, XmlElement, XmlReader};
use quick_xml::events::{BytesStart, Event};

struct PackageParser<'a> {
    reader: ByteReader<'a>,
    version: EpubVersion,
    meta_content_fallback: bool,
}

/// Parses the `.opf` package document located at `path`.
pub(crate) fn parse_package(
    data: &[u8],
    path: &str,
    meta_content_fallback: bool,
) -> ParserResult<PackageDocument> {
    let mut reader = xml::new_reader(data);
    let start = find_package(&mut reader)?
        .ok_or_else(|| FormatError::NoPackageFound(path.to_owned()))?;

    let mut attributes = start.xml_attributes();
    let version = PackageDocument::require_version(attributes.take(consts::VERSION))?;
    log::debug!("Package `{path}` declares EPUB {version}");

    let mut package = PackageDocument::new(version);
    package.unique_identifier = attributes.take(consts::UNIQUE_ID);
    package.lang = attributes.take(consts::LANG);
    package.prefix = attributes.take(consts::PREFIX);

    PackageParser {
        reader,
        version,
        meta_content_fallback,
    }
    .parse(package)
}

fn find_package<'a>(reader: &mut ByteReader<'a>) -> ParserResult<Option<BytesStart<'a>>> {
    while let Some(event) = reader.next() {
        if let Event::Start(el) = event? {
            if el.is_local_name(bytes::PACKAGE) {
                return Ok(Some(el));
            }
        }
    }
    Ok(None)
}

impl PackageParser<'_> {
    fn parse(mut self, mut package: PackageDocument) -> ParserResult<PackageDocument> {
        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => match el.local_name().as_ref() {
                    bytes::METADATA => self.parse_metadata(&el, &mut package.metadata)?,
                    bytes::MANIFEST => self.parse_manifest(&el, &mut package.manifest)?,
                    bytes::SPINE => self.parse_spine(&el, &mut package.spine)?,
                    bytes::GUIDE => self.parse_guide(&el, &mut package.guide)?,
                    _ => {}
                },
                Event::Empty(el) if el.is_local_name(bytes::SPINE) => {
                    Self::parse_spine_attributes(&el, &mut package.spine);
                }
                Event::End(el) if el.local_name().as_ref() == bytes::PACKAGE => break,
                _ => {}
            }
        }
        Ok(package)
    }

    /// Invokes `handle` for every child element of `parent` up to its end tag.
    ///
    /// The `bool` argument is `true` for self-closing (empty) elements.
    fn for_each_child(
        &mut self,
        parent: &BytesStart,
        mut handle: impl FnMut(&mut Self, &BytesStart, bool) -> ParserResult<()>,
    ) -> ParserResult<()> {
        while let Some(event) = self.reader.next() {
            match event? {
                Event::Start(el) => handle(self, &el, false)?,
                Event::Empty(el) => handle(self, &el, true)?,
                Event::End(el) if el.name() == parent.name() => break,
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::package::Meta;

    const OPF2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>Moby-Dick</dc:title>
    <dc:title>or, The Whale</dc:title>
    <dc:creator opf:role="aut" opf:file-as="Melville, Herman">Herman Melville</dc:creator>
    <dc:contributor opf:role="edt">Ed Itor</dc:contributor>
    <dc:identifier id="BookId" opf:scheme="ISBN">9780000000000</dc:identifier>
    <dc:date opf:event="publication">1851</dc:date>
    <dc:language>en</dc:language>
    <dc:subject>Whaling</dc:subject>
    <dc:publisher>Harper &amp; Brothers</dc:publisher>
    <dc:rights>Public domain</dc:rights>
    <dc:description>
      A sea
      story.
    </dc:description>
    <meta name="cover" content="cover-id"/>
    <x-custom>ignored</x-custom>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="cover-id" href="images/cover.jpg" media-type="image/jpeg"/>
    <item id="c1" href="text/c1.xhtml" media-type="application/xhtml+xml" fallback="c1-alt"/>
    <item id="c1" href="text/dupe.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/c2.xhtml" media-type="application/xhtml+xml"></item>
  </manifest>
  <spine toc="ncx" page-progression-direction="ltr">
    <itemref idref="c1"/>
    <itemref idref="c2" linear="no" id="ir2" properties="page-spread-left"/>
  </spine>
  <guide>
    <reference type="cover" title="Cover" href="text/c1.xhtml#cover"/>
  </guide>
</package>"#;

    #[test]
    fn test_parse_package() {
        let package = parse_package(OPF2.as_bytes(), "/OPS/content.opf", false).unwrap();

        assert_eq!(EpubVersion::Epub2, package.version());
        assert_eq!(Some("BookId"), package.unique_identifier());

        let metadata = package.metadata();
        assert_eq!(["Moby-Dick", "or, The Whale"], metadata.titles());
        assert_eq!(["Harper & Brothers"], metadata.publishers());
        assert_eq!(["A sea story."], metadata.descriptions());

        let creator = &metadata.creators()[0];
        assert_eq!("Herman Melville", creator.value());
        assert_eq!(Some("aut"), creator.role());
        assert_eq!(Some("Melville, Herman"), creator.file_as());
        assert_eq!(Some("edt"), metadata.contributors()[0].role());

        let identifier = &metadata.identifiers()[0];
        assert_eq!((Some("BookId"), Some("ISBN")), (identifier.id(), identifier.scheme()));
        assert_eq!(Some("publication"), metadata.dates()[0].event());
        assert_eq!(Some("cover-id"), metadata.meta_by_name("cover").map(Meta::value));

        // The duplicate `c1` is dropped
        let manifest = package.manifest();
        assert_eq!(vec!["ncx", "cover-id", "c1", "c2"], manifest.ids().collect::<Vec<_>>());
        assert_eq!(Some("c1-alt"), manifest.by_id("c1").and_then(|item| item.fallback()));

        let spine = package.spine();
        assert_eq!((Some("ncx"), Some("ltr")), (spine.toc(), spine.page_progression_direction()));
        assert!(spine.item_refs()[0].is_linear());
        assert!(!spine.item_refs()[1].is_linear());
        assert_eq!(["page-spread-left"], spine.item_refs()[1].properties());
        assert_eq!(Some("ir2"), spine.item_refs()[1].id());

        assert_eq!("cover", package.guide()[0].kind());
        assert_eq!("text/c1.xhtml#cover", package.guide()[0].href());

        assert_eq!(Some("images/cover.jpg"), package.cover_path());
        assert_eq!(Some("toc.ncx"), package.ncx_path());
    }

    #[test]
    fn test_parse_package_epub3() {
        let opf = r##"<package version="3.0" xml:lang="en" prefix="rendition: http://www.idpf.org/vocab/rendition/#">
  <metadata>
    <dc:title id="t1">Title</dc:title>
    <meta refines="#t1" property="title-type">main</meta>
    <meta property="dcterms:modified">2024-01-01T00:00:00Z</meta>
    <meta name="cover" content="img"/>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav scripted"/>
    <item id="img" href="img.png" media-type="image/png" properties="cover-image"/>
  </manifest>
  <spine/>
</package>"##;
        let package = parse_package(opf.as_bytes(), "/content.opf", false).unwrap();

        assert_eq!(EpubVersion::Epub3, package.version());
        assert_eq!(Some("en"), package.lang());
        assert!(package.prefix().is_some());

        let metas = package.metadata().metas();
        assert_eq!(Some("#t1"), metas[0].refines());
        assert_eq!("main", metas[0].value());
        assert_eq!("2024-01-01T00:00:00Z", metas[1].value());
        // EPUB 3 reads element text; the `content` attribute is only kept
        assert_eq!("", metas[2].value());
        assert_eq!(Some("img"), metas[2].content());

        assert_eq!(["nav", "scripted"], package.manifest().items()[0].properties());
        assert_eq!(Some("nav.xhtml"), package.nav_path());
        assert!(package.spine().is_empty());
    }

    #[test]
    fn test_meta_content_fallback() {
        let opf = r#"<package version="3.0"><metadata><meta name="cover" content="img"/></metadata></package>"#;
        let package = parse_package(opf.as_bytes(), "/content.opf", true).unwrap();
        assert_eq!("img", package.metadata().metas()[0].value());

        let opf = r#"<package version="2.0"><metadata><meta name="x">text</meta></metadata></package>"#;
        assert_eq!("", parse_package(opf.as_bytes(), "/c.opf", false).unwrap().metadata().metas()[0].value());
        assert_eq!("text", parse_package(opf.as_bytes(), "/c.opf", true).unwrap().metadata().metas()[0].value());
    }

    #[test]
    fn test_metadata_text_kept() {
        let opf = "<package version=\"2.0\"><metadata>
  <dc:title>  Moby-Dick </dc:title>
  <dc:subject/>
  <dc:description>
    Call me Ishmael.

    Some years ago.
  </dc:description>
</metadata></package>";
        let package = parse_package(opf.as_bytes(), "/content.opf", false).unwrap();
        let metadata = package.metadata();

        assert_eq!(["Moby-Dick"], metadata.titles());
        assert_eq!([""], metadata.subjects());
        assert_eq!(["Call me Ishmael.\n\n    Some years ago."], metadata.descriptions());
    }

    #[test]
    fn test_parse_package_errors() {
        #[rustfmt::skip]
        let failing = [
            r#"<package version="4.0"><metadata/></package>"#,
            r#"<package><metadata/></package>"#,
            r#"<notapackage/>"#,
            r#"<package version="3.0"><manifest><item href="a.xhtml" media-type="text/html"/></manifest></package>"#,
            r#"<package version="3.0"><spine><itemref linear="no"/></spine></package>"#,
        ];

        for opf in failing {
            assert!(parse_package(opf.as_bytes(), "/content.opf", false).is_err(), "{opf}");
        }

        let error = parse_package(failing[0].as_bytes(), "/content.opf", false).unwrap_err();
        assert!(matches!(&error, FormatError::UnsupportedVersion(version) if version == "4.0"));
        assert!(error.to_string().contains("4.0"));
    }
}
