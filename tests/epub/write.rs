use crate::epub::util::{COVER_PNG, EpubFixture};
use quire::epub::package::EpubVersion;
use quire::epub::resource::{ContentType, ImageFormat};
use quire::errors::ErrorKind;
use quire::{Book, BookWriter};
use std::collections::HashSet;
use std::io::Cursor;

fn rewrite(book: &Book) -> Book {
    let bytes = book.write_options().compression(0).to_vec().unwrap();
    Book::from_bytes(bytes).unwrap()
}

fn manifest_ids(book: &Book) -> HashSet<&str> {
    book.format().package().manifest().ids().collect()
}

fn assert_same_book(a: &Book, b: &Book) {
    let (package_a, package_b) = (a.format().package(), b.format().package());

    assert_eq!(package_a.version(), package_b.version());
    assert_eq!(package_a.unique_identifier(), package_b.unique_identifier());
    assert_eq!(package_a.metadata(), package_b.metadata());
    assert_eq!(package_a.spine(), package_b.spine());
    assert_eq!(package_a.guide(), package_b.guide());
    assert_eq!(manifest_ids(a), manifest_ids(b));
    assert_eq!(a.format().ncx(), b.format().ncx());
    assert_eq!(a.chapters(), b.chapters());
    assert_eq!(a.special_resources().reading_order(), b.special_resources().reading_order());
    assert_eq!(a.cover_image(), b.cover_image());
    assert_eq!(a.resources().len(), b.resources().len());

    assert_eq!(a.format().nav(), b.format().nav());

    for resource in a.resources().iter() {
        let other = b.resources().by_path(resource.absolute_path());

        // Navigation documents are reserialized from their models
        let path = Some(resource.absolute_path());
        if path == a.format().nav_path() || path == a.format().ncx_path() {
            assert!(other.is_some());
        } else {
            assert_eq!(Some(resource), other);
        }
    }
}

#[test]
fn test_epub3_round_trip() {
    let book = EpubFixture::epub3().open();
    let rewritten = rewrite(&book);

    assert_same_book(&book, &rewritten);
    // Writing again is stable
    assert_eq!(rewritten, rewrite(&rewritten));
}

#[test]
fn test_epub3_cover_meta_survives() {
    let rewritten = rewrite(&EpubFixture::epub3().open());
    let cover = rewritten.format().package().metadata().meta_by_name("cover").unwrap();

    assert_eq!(Some("cover-meta"), cover.content());
    assert_eq!("", cover.value());

    let opf = String::from_utf8(rewritten.special_resources().opf().to_vec()).unwrap();
    assert!(opf.contains(r#"<meta name="cover" content="cover-meta"/>"#), "{opf}");
}

#[test]
fn test_epub2_round_trip() {
    let book = EpubFixture::epub2().open();
    let rewritten = rewrite(&book);

    assert_same_book(&book, &rewritten);
    assert_eq!(EpubVersion::Epub2, rewritten.version());
    assert_eq!(Some(COVER_PNG), rewritten.cover_image());
    assert!(rewritten.format().nav().is_none());
}

#[test]
fn test_edits_refresh_ncx_resource() {
    let mut writer = BookWriter::from(EpubFixture::epub2().open());
    let ncx_text = |writer: &BookWriter| {
        let book = writer.book();
        let path = book.format().ncx_path().unwrap();
        book.resources().by_path(path).unwrap().text().unwrap().to_owned()
    };

    writer.set_title("Renamed").unwrap();
    assert!(ncx_text(&writer).contains("<text>Renamed</text>"));

    writer.add_author("Ishmael").unwrap();
    assert!(ncx_text(&writer).contains("<text>Ishmael</text>"));

    writer.clear_chapters().unwrap();
    assert!(!ncx_text(&writer).contains("<navPoint"));

    // What the resource holds is what gets written
    let book = Book::from_bytes(writer.to_vec().unwrap()).unwrap();
    let path = book.format().ncx_path().unwrap();
    assert_eq!(ncx_text(&writer), book.resources().by_path(path).unwrap().text().unwrap());
    assert_eq!("Renamed", book.format().ncx().unwrap().doc_title());
}

#[test]
fn test_write_to_stream() {
    let book = EpubFixture::epub3().open();
    let cursor = book.write_options().write(Cursor::new(Vec::new())).unwrap();

    assert_same_book(&book, &Book::read(cursor).unwrap());
}

#[test]
fn test_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moby-dick.epub");
    let book = EpubFixture::epub3().open();

    quire::write_book(&book, &path).unwrap();
    // Saving again replaces the existing file
    book.write_options().compression(9).save(&path).unwrap();

    assert_same_book(&book, &quire::read_book(&path).unwrap());

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(1, entries.len());
}

#[test]
fn test_save_errors() {
    let book = EpubFixture::epub3().open();
    let missing_dir = tempfile::tempdir().unwrap().path().join("gone").join("book.epub");

    assert_eq!(ErrorKind::Argument, book.write_options().save("").unwrap_err().kind());
    assert_eq!(ErrorKind::Io, book.write_options().save(missing_dir).unwrap_err().kind());
}

#[test]
fn test_create_book() {
    let mut writer = BookWriter::new();
    writer.set_title("Moby-Dick").unwrap();
    writer.add_author("Herman Melville").unwrap();
    writer.add_author("Ishmael").unwrap();
    writer.add_file("styles/main.css", "p { margin: 0; }", ContentType::Css).unwrap();
    writer.add_chapter("Loomings", "<p>Call me Ishmael.</p>").unwrap();
    writer.add_chapter("The Carpet-Bag", "<p>I stuffed a shirt or two.</p>").unwrap();
    writer.set_cover(COVER_PNG, ImageFormat::Png).unwrap();

    let book = Book::from_bytes(writer.to_vec().unwrap()).unwrap();

    assert_eq!(EpubVersion::Epub3, book.version());
    assert_eq!(Some("Moby-Dick"), book.title());
    assert_eq!("Herman Melville, Ishmael", book.author());
    assert_eq!(Some(COVER_PNG), book.cover_image());
    assert_eq!(1, book.resources().css().len());
    assert_eq!(2, book.reading_order().count());

    let titles: Vec<_> = book.chapters().iter().map(|chapter| chapter.title()).collect();
    assert_eq!(vec!["Loomings", "The Carpet-Bag"], titles);

    let ncx = book.format().ncx().unwrap();
    assert_eq!("Moby-Dick", ncx.doc_title());
    assert_eq!(["Herman Melville", "Ishmael"], ncx.doc_authors());
    assert_eq!(2, ncx.nav_map().len());

    let text = book.to_plain_text();
    assert!(text.contains("Call me Ishmael."), "{text}");
    assert!(text.contains("I stuffed a shirt or two."), "{text}");
}

#[test]
fn test_edit_existing_book() {
    let mut writer = BookWriter::from(EpubFixture::epub3().open());
    writer.add_chapter("Epilogue", "<p>The drama's done.</p>").unwrap();
    writer.remove_author("Ishmael").unwrap();

    let book = rewrite(writer.book());
    let titles: Vec<_> = book.chapters().iter().map(|chapter| chapter.title()).collect();

    assert_eq!(vec!["Loomings", "Part Two", "The Carpet-Bag", "Epilogue"], titles);
    assert_eq!(vec!["Herman Melville"], book.authors());
    assert_eq!(Some("/OEBPS/chapter-1.xhtml"), book.chapters().iter().last().unwrap().absolute_path());
    assert_eq!(3, book.reading_order().count());
}

#[test]
fn test_clear_chapters() {
    let mut writer = BookWriter::from(EpubFixture::epub3().open());
    writer.clear_chapters().unwrap();

    let book = rewrite(writer.book());

    assert!(book.chapters().is_empty());
    assert_eq!(0, book.reading_order().count());
    assert!(book.resources().by_path("/OEBPS/text/c1.xhtml").is_none());
    // The cover survives
    assert_eq!(Some(crate::epub::util::ALT_PNG), book.cover_image());
    assert_eq!(1, book.resources().images().len());
}

#[test]
fn test_replace_epub2_cover() {
    let mut writer = BookWriter::from(EpubFixture::epub2().open());
    writer.set_cover(b"GIF89a".as_slice(), ImageFormat::Gif).unwrap();

    let book = rewrite(writer.book());
    let cover = book.cover_resource().unwrap();

    assert_eq!(b"GIF89a".as_slice(), cover.bytes());
    assert_eq!("/OEBPS/cover.gif", cover.absolute_path());
    assert_eq!("image/gif", cover.media_type());
}

#[test]
fn test_add_chapter_without_nav() {
    let mut writer = BookWriter::from(EpubFixture::epub2().open());
    let error = writer.add_chapter("Epilogue", "<p>The drama's done.</p>").unwrap_err();

    assert_eq!(ErrorKind::Write, error.kind());
    // Nothing changed
    assert_eq!(EpubFixture::epub2().open(), writer.into_book());
}

#[test]
fn test_writer_arguments() {
    let mut writer = BookWriter::new();

    #[rustfmt::skip]
    let errors = [
        writer.set_title(" ").unwrap_err(),
        writer.add_author("").unwrap_err(),
        writer.add_chapter("", "<p>x</p>").unwrap_err(),
        writer.add_chapter("Title", "\n").unwrap_err(),
        writer.add_file("", "x", ContentType::Css).unwrap_err(),
        writer.set_cover(Vec::<u8>::new(), ImageFormat::Png).unwrap_err(),
    ];

    for error in errors {
        assert_eq!(ErrorKind::Argument, error.kind(), "{error}");
    }
    assert_eq!(BookWriter::new().book().resources(), writer.book().resources());
}
