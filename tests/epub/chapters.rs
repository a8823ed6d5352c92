use crate::epub::util::{self, EpubFixture};
use quire::epub::chapter::{Chapter, ChapterTree};

fn titles(tree: &ChapterTree) -> Vec<&str> {
    tree.iter().map(|chapter| chapter.title()).collect()
}

#[test]
fn test_chapters_from_nav() {
    let book = EpubFixture::epub3().open();
    let chapters = book.chapters();

    #[rustfmt::skip]
    let expected = [
        // (title, nav id, relative path, anchor, absolute path, depth)
        ("Loomings", Some("loomings"), "text/c1.xhtml", None, "/OEBPS/text/c1.xhtml", 0),
        ("Part Two", None, "text/c1.xhtml", Some("part-2"), "/OEBPS/text/c1.xhtml", 1),
        ("The Carpet-Bag", None, "text/chapter%202.xhtml", None, "/OEBPS/text/chapter 2.xhtml", 0),
    ];
    assert_eq!(expected.len(), chapters.len());

    for (chapter, (title, nav_id, relative, anchor, absolute, depth)) in chapters.iter().zip(expected) {
        assert_eq!(title, chapter.title());
        assert_eq!(nav_id, chapter.nav_id());
        assert_eq!(relative, chapter.relative_path());
        assert_eq!(anchor, chapter.anchor());
        assert_eq!(Some(absolute), chapter.absolute_path());
        assert_eq!(depth, chapter.depth());
    }

    // Every chapter points into a loaded document
    for chapter in chapters.iter() {
        let path = chapter.absolute_path().unwrap();
        assert!(book.resources().by_path(path).is_some(), "{path}");
    }
}

#[test]
fn test_chapters_from_ncx() {
    let book = EpubFixture::epub2().open();

    assert_eq!(vec!["NCX Loomings", "NCX Carpet-Bag"], titles(book.chapters()));

    let first = book.chapters().first().unwrap();
    assert_eq!(Some("np-1"), first.nav_id());
    assert_eq!(Some("/OEBPS/text/c1.xhtml"), first.absolute_path());
}

#[test]
fn test_nav_without_toc_uses_ncx() {
    let nav = util::NAV.replace(r#"epub:type="toc""#, r#"epub:type="lot""#);
    let book = EpubFixture::epub3().entry("OEBPS/nav.xhtml", nav).open();

    assert_eq!(vec!["NCX Loomings", "NCX Carpet-Bag"], titles(book.chapters()));
}

#[test]
fn test_chapter_links() {
    let book = EpubFixture::epub3().open();
    let chapters = book.chapters();

    let forward: Vec<_> = std::iter::successors(chapters.first(), Chapter::next)
        .map(|chapter| chapter.title())
        .collect();
    assert_eq!(titles(chapters), forward);

    let last = chapters.iter().last().unwrap();
    let mut backward: Vec<_> = std::iter::successors(Some(last), Chapter::previous)
        .map(|chapter| chapter.title())
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);

    let loomings = chapters.first().unwrap();
    let part_two = loomings.next().unwrap();
    let sub_titles: Vec<_> = loomings.sub_chapters().map(|chapter| chapter.title()).collect();

    assert_eq!(vec!["Part Two"], sub_titles);
    assert_eq!(Some(loomings.id()), part_two.parent().map(|parent| parent.id()));
    assert_eq!(None, loomings.parent().map(|parent| parent.id()));
    assert_eq!(None, loomings.previous().map(|chapter| chapter.id()));

    let roots: Vec<_> = chapters.roots().map(|chapter| chapter.title()).collect();
    assert_eq!(vec!["Loomings", "The Carpet-Bag"], roots);
}

#[test]
fn test_no_navigation() {
    let opf = util::EPUB2_OPF
        .replace(r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#, "")
        .replace(r#"<spine toc="ncx">"#, "<spine>");
    let book = EpubFixture::epub2()
        .entry("OEBPS/content.opf", opf)
        .without("OEBPS/toc.ncx")
        .open();

    assert!(book.chapters().is_empty());
    assert!(book.format().ncx().is_none());
    assert_eq!(2, book.reading_order().count());
}
