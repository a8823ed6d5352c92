use crate::epub::util::{self, EpubFixture};

#[test]
fn test_tolerant_entry_names() {
    #[rustfmt::skip]
    let expected = [
        ("OEBPS/text/c1.xhtml", "OEBPS\\text\\c1.xhtml"),
        ("OEBPS/text/c1.xhtml", "/OEBPS/text/c1.xhtml"),
        ("OEBPS/text/chapter 2.xhtml", "OEBPS/text/chapter%202.xhtml"),
        ("OEBPS/content.opf", "OEBPS\\content.opf"),
        ("META-INF/container.xml", "/META-INF/container.xml"),
    ];

    for (original, stored) in expected {
        let book = EpubFixture::epub3().rename(original, stored).open();

        assert_eq!(Some("Moby-Dick"), book.title(), "{stored}");
        assert_eq!(3, book.chapters().len(), "{stored}");
    }
}

#[test]
fn test_byte_order_marks() {
    let chapter = [b"\xEF\xBB\xBF".as_slice(), util::CHAPTER_1.as_bytes()].concat();
    let container = [b"\xEF\xBB\xBF".as_slice(), util::CONTAINER.as_bytes()].concat();
    let book = EpubFixture::epub3()
        .entry("OEBPS/text/c1.xhtml", chapter)
        .entry("META-INF/container.xml", container)
        .open();

    let text = book.resources().by_path("/OEBPS/text/c1.xhtml").unwrap().text();
    assert_eq!(Some(util::CHAPTER_1), text);
}

#[test]
fn test_utf16_resource() {
    let mut chapter = b"\xFF\xFE".to_vec();
    chapter.extend(util::CHAPTER_2.encode_utf16().flat_map(u16::to_le_bytes));
    let book = EpubFixture::epub3().entry("OEBPS/text/chapter 2.xhtml", chapter).open();

    let text = book.resources().by_path("/OEBPS/text/chapter 2.xhtml").unwrap().text();
    assert_eq!(Some(util::CHAPTER_2), text);
}

#[test]
fn test_remote_items_skipped() {
    let opf = util::EPUB3_OPF.replace(
        "</manifest>",
        r#"<item id="font" href="https://example.com/font.woff" media-type="font/woff"/></manifest>"#,
    );
    let book = EpubFixture::epub3().entry("OEBPS/content.opf", opf).open();

    assert_eq!(7, book.resources().len());
    assert!(book.resources().fonts().is_empty());
    assert!(book.format().package().manifest().by_id("font").is_some());
}

#[test]
fn test_duplicate_items_loaded_once() {
    let opf = util::EPUB3_OPF.replace(
        "</manifest>",
        r#"<item id="css-again" href="styles/../styles/main.css" media-type="text/css"/></manifest>"#,
    );
    let book = EpubFixture::epub3().entry("OEBPS/content.opf", opf).open();

    assert_eq!(1, book.resources().css().len());
}
