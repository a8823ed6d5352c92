use quire::{Book, EpubOpenOptions};
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

pub const EPUB3_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid" xml:lang="en">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:identifier id="uid">urn:isbn:9780000000001</dc:identifier>
    <dc:title>Moby-Dick</dc:title>
    <dc:title>The Whale</dc:title>
    <dc:creator id="author">Herman Melville</dc:creator>
    <dc:creator>Ishmael</dc:creator>
    <dc:language>en</dc:language>
    <meta property="dcterms:modified">2024-01-01T00:00:00Z</meta>
    <meta name="cover" content="cover-meta"/>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="c1" href="text/c1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
    <item id="css" href="styles/main.css" media-type="text/css"/>
    <item id="cover-meta" href="images/cover.png" media-type="image/png"/>
    <item id="cover-prop" href="images/alt.png" media-type="image/png" properties="cover-image"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="c1"/>
    <itemref idref="c2" linear="no"/>
  </spine>
</package>"#;

pub const EPUB2_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:identifier id="uid" opf:scheme="ISBN">9780000000002</dc:identifier>
    <dc:title>Moby-Dick</dc:title>
    <dc:creator opf:role="aut" opf:file-as="Melville, Herman">Herman Melville</dc:creator>
    <dc:language>en</dc:language>
    <meta name="cover" content="cover-meta"/>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="c1" href="text/c1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="text/chapter%202.xhtml" media-type="application/xhtml+xml"/>
    <item id="cover-meta" href="images/cover.png" media-type="image/png"/>
    <item id="cover-prop" href="images/alt.png" media-type="image/png" properties="cover-image"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
  <guide>
    <reference type="text" title="Start" href="text/c1.xhtml"/>
  </guide>
</package>"#;

pub const NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Contents</title></head>
<body>
  <nav epub:type="toc" id="toc">
    <h1>Contents</h1>
    <ol>
      <li id="loomings"><a href="text/c1.xhtml">Loomings</a>
        <ol>
          <li><a href="text/c1.xhtml#part-2">Part Two</a></li>
        </ol>
      </li>
      <li><a href="text/chapter%202.xhtml">The Carpet-Bag</a></li>
    </ol>
  </nav>
  <nav epub:type="landmarks"><ol><li><a epub:type="bodymatter" href="text/c1.xhtml">Start</a></li></ol></nav>
</body>
</html>"#;

pub const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="urn:isbn:9780000000001"/></head>
  <docTitle><text>Moby-Dick</text></docTitle>
  <docAuthor><text>Herman Melville</text></docAuthor>
  <navMap>
    <navPoint id="np-1" playOrder="1">
      <navLabel><text>NCX Loomings</text></navLabel>
      <content src="text/c1.xhtml"/>
    </navPoint>
    <navPoint id="np-2" playOrder="2">
      <navLabel><text>NCX Carpet-Bag</text></navLabel>
      <content src="text/chapter%202.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

pub const CHAPTER_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Loomings</title></head>
<body><h1>Loomings</h1><p>Call me Ishmael.</p><p id="part-2">Some years ago.</p></body>
</html>"#;

pub const CHAPTER_2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>The Carpet-Bag</title></head>
<body><h1>The Carpet-Bag</h1><p>I stuffed a shirt or two.</p></body>
</html>"#;

pub const CSS: &str = "p { margin: 0; }";
pub const COVER_PNG: &[u8] = b"\x89PNG\r\n\x1a\ncover";
pub const ALT_PNG: &[u8] = b"\x89PNG\r\n\x1a\nalt";

/// In-memory EPUB archive fixture.
pub struct EpubFixture {
    entries: Vec<(String, Vec<u8>)>,
}

impl EpubFixture {
    /// An archive holding only the `mimetype` entry.
    pub fn empty() -> Self {
        Self {
            entries: vec![("mimetype".into(), b"application/epub+zip".to_vec())],
        }
    }

    /// An EPUB 3 book with both a Nav and an NCX.
    pub fn epub3() -> Self {
        Self::empty()
            .entry("META-INF/container.xml", CONTAINER)
            .entry("OEBPS/content.opf", EPUB3_OPF)
            .entry("OEBPS/nav.xhtml", NAV)
            .entry("OEBPS/toc.ncx", NCX)
            .entry("OEBPS/text/c1.xhtml", CHAPTER_1)
            .entry("OEBPS/text/chapter 2.xhtml", CHAPTER_2)
            .entry("OEBPS/styles/main.css", CSS)
            .entry("OEBPS/images/cover.png", COVER_PNG)
            .entry("OEBPS/images/alt.png", ALT_PNG)
    }

    /// An EPUB 2 book with an NCX and no Nav.
    pub fn epub2() -> Self {
        Self::empty()
            .entry("META-INF/container.xml", CONTAINER)
            .entry("OEBPS/content.opf", EPUB2_OPF)
            .entry("OEBPS/toc.ncx", NCX)
            .entry("OEBPS/text/c1.xhtml", CHAPTER_1)
            .entry("OEBPS/text/chapter 2.xhtml", CHAPTER_2)
            .entry("OEBPS/images/cover.png", COVER_PNG)
            .entry("OEBPS/images/alt.png", ALT_PNG)
    }

    /// Adds an entry, replacing any entry with the same name.
    pub fn entry(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.push((name.to_owned(), data.as_ref().to_vec()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(existing, _)| existing != name);
        self
    }

    /// Stores the entry `from` under the name `to` instead.
    pub fn rename(mut self, from: &str, to: &str) -> Self {
        for (name, _) in &mut self.entries {
            if name == from {
                *name = to.to_owned();
            }
        }
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

        for (name, data) in &self.entries {
            let method = match name.as_str() {
                "mimetype" => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn open(&self) -> Book {
        Book::from_bytes(self.to_bytes()).unwrap()
    }

    pub fn open_with(&self, options: EpubOpenOptions) -> Book {
        options.from_bytes(self.to_bytes()).unwrap()
    }
}
