use crate::epub::util::{self, ALT_PNG, COVER_PNG, EpubFixture};
use quire::epub::package::EpubVersion;
use quire::errors::ErrorKind;
use quire::{Book, EpubOpenOptions};
use std::io::Cursor;

#[test]
fn test_metadata() {
    let book = EpubFixture::epub3().open();

    assert_eq!(EpubVersion::Epub3, book.version());
    assert_eq!(Some("Moby-Dick"), book.title());
    assert_eq!(vec!["Herman Melville", "Ishmael"], book.authors());
    assert_eq!("Herman Melville, Ishmael", book.author());

    let package = book.format().package();
    assert_eq!(Some("uid"), package.unique_identifier());
    assert_eq!(["Moby-Dick", "The Whale"], package.metadata().titles());
    assert_eq!(Some("author"), package.metadata().creators()[0].id());
    assert_eq!(["en"], package.metadata().languages());
    assert_eq!(
        "2024-01-01T00:00:00Z",
        package.metadata().meta_by_property("dcterms:modified").unwrap().value()
    );
}

#[test]
fn test_epub2_metadata() {
    let book = EpubFixture::epub2().open();
    let package = book.format().package();
    let creator = &package.metadata().creators()[0];

    assert_eq!(EpubVersion::Epub2, book.version());
    assert_eq!(Some("aut"), creator.role());
    assert_eq!(Some("Melville, Herman"), creator.file_as());
    assert_eq!(Some("ISBN"), package.metadata().identifiers()[0].scheme());
    assert_eq!("cover-meta", package.metadata().meta_by_name("cover").unwrap().value());

    let guide = package.guide();
    assert_eq!(1, guide.len());
    assert_eq!("text", guide[0].kind());
    assert_eq!(Some("Start"), guide[0].title());
    assert!(book.format().nav().is_none());
}

#[test]
fn test_meta_content_fallback() {
    let fixture = EpubFixture::epub3();

    #[rustfmt::skip]
    let expected = [
        (false, ""),
        (true, "cover-meta"),
    ];

    for (fallback, value) in expected {
        let book = fixture.open_with(EpubOpenOptions::new().meta_content_fallback(fallback));
        let meta = book.format().package().metadata().meta_by_name("cover").unwrap();

        assert_eq!(value, meta.value(), "fallback: {fallback}");
    }
}

#[test]
fn test_resources() {
    let book = EpubFixture::epub3().open();
    let resources = book.resources();

    assert_eq!(7, resources.len());
    assert_eq!(3, resources.html().len());
    assert_eq!(1, resources.css().len());
    assert_eq!(2, resources.images().len());
    assert_eq!(0, resources.fonts().len());
    assert_eq!(1, resources.other().len());

    let chapter = resources.by_path("/OEBPS/text/chapter 2.xhtml").unwrap();
    assert_eq!("text/chapter%202.xhtml", chapter.href());
    assert_eq!("application/xhtml+xml", chapter.media_type());
    assert_eq!(Some(util::CHAPTER_2), chapter.text());

    let css = resources.by_path("/OEBPS/styles/main.css").unwrap();
    assert_eq!(util::CSS.as_bytes(), css.bytes());

    let image = resources.by_path("/OEBPS/images/alt.png").unwrap();
    assert_eq!(ALT_PNG, image.bytes());
    assert_eq!(None, image.text());
}

#[test]
fn test_special_resources() {
    let book = EpubFixture::epub3().open();
    let special = book.special_resources();

    assert_eq!(util::CONTAINER.as_bytes(), special.ocf());
    assert_eq!(util::EPUB3_OPF.as_bytes(), special.opf());
    assert_eq!(
        ["/OEBPS/text/c1.xhtml", "/OEBPS/text/chapter 2.xhtml"],
        special.reading_order()
    );

    // Non-linear itemrefs remain part of the reading order
    let titles: Vec<_> = book.reading_order().map(|resource| resource.absolute_path()).collect();
    assert_eq!(vec!["/OEBPS/text/c1.xhtml", "/OEBPS/text/chapter 2.xhtml"], titles);
}

#[test]
fn test_reading_order_skips_unknown_idrefs() {
    let opf = util::EPUB3_OPF.replace(
        r#"<itemref idref="c1"/>"#,
        r#"<itemref idref="missing"/><itemref idref="c1"/><itemref idref="css"/>"#,
    );
    let book = EpubFixture::epub3().entry("OEBPS/content.opf", opf).open();

    assert_eq!(
        ["/OEBPS/text/c1.xhtml", "/OEBPS/text/chapter 2.xhtml"],
        book.special_resources().reading_order()
    );
}

#[test]
fn test_cover_precedence() {
    let without_meta = util::EPUB2_OPF.replace(r#"<meta name="cover" content="cover-meta"/>"#, "");

    #[rustfmt::skip]
    let expected = [
        // The `cover` meta wins over the `cover-image` property
        (EpubFixture::epub2().open(), Some(COVER_PNG)),
        (EpubFixture::epub2().entry("OEBPS/content.opf", without_meta).open(), Some(ALT_PNG)),
        // EPUB 3 meta values are read from the element text by default
        (EpubFixture::epub3().open(), Some(ALT_PNG)),
        (EpubFixture::epub3().open_with(EpubOpenOptions::new().meta_content_fallback(true)), Some(COVER_PNG)),
    ];

    for (book, cover) in expected {
        assert_eq!(cover, book.cover_image());
    }
}

#[test]
fn test_no_cover() {
    let opf = util::EPUB2_OPF
        .replace(r#"<meta name="cover" content="cover-meta"/>"#, "")
        .replace(r#" properties="cover-image""#, "");
    let book = EpubFixture::epub2().entry("OEBPS/content.opf", opf).open();

    assert_eq!(None, book.cover_resource());
    assert_eq!(None, book.cover_image());
}

#[test]
fn test_plain_text() {
    let book = EpubFixture::epub3().open();
    let text = book.to_plain_text();

    assert!(text.starts_with("Loomings\nCall me Ishmael."), "{text}");
    assert!(text.contains("\nThe Carpet-Bag\nI stuffed a shirt or two."), "{text}");
    // The navigation document is not part of the reading order
    assert!(!text.contains("Contents"), "{text}");
}

#[test]
fn test_read_sources() {
    let bytes = EpubFixture::epub3().to_bytes();

    let a = Book::from_bytes(&bytes).unwrap();
    let b = Book::read(Cursor::new(&bytes)).unwrap();
    let c = EpubOpenOptions::new().read(Cursor::new(bytes)).unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_minimal_book() {
    let opf = r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"/>
  <manifest/>
  <spine/>
</package>"#;
    let book = EpubFixture::empty()
        .entry("META-INF/container.xml", util::CONTAINER)
        .entry("OEBPS/content.opf", opf)
        .open();

    assert!(book.chapters().is_empty());
    assert!(book.resources().is_empty());
    assert_eq!(None, book.title());
    assert_eq!("", book.author());
    assert_eq!("", book.to_plain_text());
}

#[test]
fn test_minimal_book_with_empty_toc() {
    let opf = r#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"/>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
  </manifest>
  <spine/>
</package>"#;
    let nav = r#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Minimal</title></head>
<body><nav epub:type="toc"><ol></ol></nav></body>
</html>"#;
    let book = EpubFixture::empty()
        .entry("META-INF/container.xml", util::CONTAINER)
        .entry("OEBPS/content.opf", opf)
        .entry("OEBPS/nav.xhtml", nav)
        .open();

    assert!(book.chapters().is_empty());
    assert_eq!(Some("/OEBPS/nav.xhtml"), book.format().nav_path());

    let nav = book.format().nav().unwrap();
    let toc = nav.toc().unwrap();

    assert_eq!(Some("Minimal".to_owned()), nav.title());
    assert_eq!(1, nav.navs().count());
    assert!(toc.list().unwrap().elements().next().is_none());
    assert!(book.special_resources().reading_order().is_empty());
}

#[test]
fn test_read_errors() {
    let unsupported = util::EPUB3_OPF.replace(r#"version="3.0""#, r#"version="4.0""#);

    #[rustfmt::skip]
    let expected = [
        (ErrorKind::Parse, EpubFixture::epub3().entry("OEBPS/content.opf", unsupported)),
        (ErrorKind::NotFound, EpubFixture::epub3().without("META-INF/container.xml")),
        (ErrorKind::NotFound, EpubFixture::epub3().without("OEBPS/content.opf")),
        (ErrorKind::NotFound, EpubFixture::epub3().without("OEBPS/text/c1.xhtml")),
        (ErrorKind::Parse, EpubFixture::epub3().entry("OEBPS/toc.ncx", "<ncx><head/></ncx>")),
        (ErrorKind::Parse, EpubFixture::epub3().entry("OEBPS/text/c1.xhtml", b"<p>\x80\x81</p>".as_slice())),
    ];

    for (kind, fixture) in expected {
        let error = Book::from_bytes(fixture.to_bytes()).unwrap_err();
        assert_eq!(kind, error.kind(), "{error}");
    }
}

#[test]
fn test_open_errors() {
    assert_eq!(ErrorKind::NotFound, quire::read_book("/no/such/book.epub").unwrap_err().kind());
    assert_eq!(ErrorKind::Argument, Book::open("").unwrap_err().kind());
    assert_eq!(ErrorKind::Argument, Book::from_bytes(Vec::new()).unwrap_err().kind());
    assert_eq!(ErrorKind::Io, Book::from_bytes(b"not a zip archive").unwrap_err().kind());
}

#[test]
fn test_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moby-dick.epub");
    std::fs::write(&path, EpubFixture::epub3().to_bytes()).unwrap();

    let book = quire::read_book(&path).unwrap();
    assert_eq!(EpubFixture::epub3().open(), book);
}
