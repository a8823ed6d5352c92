use crate::archive::Archive;
use crate::epub::chapter::{ChapterData, ChapterId, ChapterTree};
use crate::epub::consts;
use crate::epub::format::Format;
use crate::epub::nav::{Element, NavDocument, Node};
use crate::epub::ncx::NavPoint;
use crate::epub::package::PackageDocument;
use crate::epub::parser;
use crate::epub::resource::{ContentType, Resource, ResourceContent, Resources, SpecialResources};
use crate::epub::{Book, EpubOpenOptions};
use crate::errors::{EpubResult, FormatError};
use crate::parser::ParserResult;
use crate::parser::xml;
use crate::util::{StrExt, uri};

/// Assembles a [`Book`] from the entries of an [`Archive`].
pub(super) struct BookLoader<'a, A> {
    archive: &'a mut A,
    options: &'a EpubOpenOptions,
}

impl<'a, A: Archive> BookLoader<'a, A> {
    pub(super) fn new(archive: &'a mut A, options: &'a EpubOpenOptions) -> Self {
        Self { archive, options }
    }

    pub(super) fn load(mut self) -> EpubResult<Book> {
        let ocf = self.archive.read_bytes(consts::CONTAINER)?;
        let container = parser::parse_container(&ocf)?;
        let opf_path = container
            .root_file_path()
            .map(uri::into_absolute)
            .ok_or(FormatError::NoOpfReference)?;

        let opf = self.archive.read_bytes(&opf_path)?;
        let package = parser::parse_package(&opf, &opf_path, self.options.meta_content_fallback)?;

        let ncx_path = package
            .ncx_path()
            .map(|href| uri::resolve_decoded(href, &opf_path))
            .transpose()?;
        let ncx = match &ncx_path {
            Some(path) => Some(parser::parse_ncx(&self.archive.read_bytes(path)?)?),
            None => None,
        };

        let nav_path = package
            .nav_path()
            .map(|href| uri::resolve_decoded(href, &opf_path))
            .transpose()?;
        let nav = match &nav_path {
            Some(path) => Some(parser::parse_nav(&self.archive.read_bytes(path)?)?),
            None => None,
        };

        let resources = self.load_resources(&package, &opf_path)?;
        let reading_order = reading_order(&package, &resources, &opf_path);

        let format = Format {
            container,
            opf_path,
            package,
            ncx,
            ncx_path,
            nav,
            nav_path,
        };
        let chapters = build_chapters(&format)?;

        log::debug!(
            "Loaded EPUB {}: {} resources, {} chapters",
            format.package.version,
            resources.len(),
            chapters.len(),
        );

        Ok(Book {
            format,
            resources,
            special: SpecialResources {
                ocf,
                opf,
                reading_order,
            },
            chapters,
        })
    }

    fn load_resources(&mut self, package: &PackageDocument, opf_path: &str) -> EpubResult<Resources> {
        let mut resources = Resources::default();

        for item in package.manifest.items() {
            if uri::has_scheme(&item.href) {
                log::warn!("Skipping remote manifest item `{}`: {}", item.id, item.href);
                continue;
            }

            let path = uri::resolve_decoded(&item.href, opf_path)?;
            if resources.by_path(&path).is_some() {
                log::warn!("Manifest item `{}` duplicates the resource at `{path}`", item.id);
                continue;
            }

            let content = if ContentType::from_media_type(&item.media_type).is_text() {
                ResourceContent::Text(self.archive.read_str(&path)?)
            } else {
                ResourceContent::Binary(self.archive.read_bytes(&path)?)
            };

            resources.push(Resource::new(&item.href, path, &item.media_type, content));
        }
        Ok(resources)
    }
}

/// Absolute paths of the spine documents, in spine order.
///
/// Itemrefs naming no manifest item or no loaded HTML resource are skipped.
fn reading_order(package: &PackageDocument, resources: &Resources, opf_path: &str) -> Vec<String> {
    let mut reading_order = Vec::new();

    for item_ref in package.spine.item_refs() {
        let Some(item) = package.manifest.by_id(&item_ref.idref) else {
            log::warn!("Spine itemref `{}` names no manifest item", item_ref.idref);
            continue;
        };

        match uri::resolve_decoded(&item.href, opf_path) {
            Ok(path) if resources.html().iter().any(|html| html.absolute_path == path) => {
                reading_order.push(path);
            }
            _ => log::warn!("Spine itemref `{}` has no loaded document", item_ref.idref),
        }
    }
    reading_order
}

/// Derives the chapter tree from the `toc` nav, otherwise the NCX.
pub(super) fn build_chapters(format: &Format) -> ParserResult<ChapterTree> {
    let mut tree = ChapterTree::default();

    let toc_list = format
        .nav
        .as_ref()
        .and_then(NavDocument::toc)
        .and_then(|toc| toc.list())
        .zip(format.nav_path.as_deref());

    if let Some((list, nav_path)) = toc_list {
        log::debug!("Deriving chapters from the Nav `{nav_path}`");
        push_nav_list(&mut tree, None, list, nav_path)?;
    } else if let (Some(ncx), Some(ncx_path)) = (&format.ncx, &format.ncx_path) {
        log::debug!("Deriving chapters from the NCX `{ncx_path}`");
        push_nav_points(&mut tree, None, &ncx.nav_map, ncx_path)?;
    }
    Ok(tree)
}

fn push_nav_list(
    tree: &mut ChapterTree,
    parent: Option<ChapterId>,
    list: &Element,
    nav_path: &str,
) -> ParserResult<()> {
    for li in list.elements().filter(|el| el.local_name() == "li") {
        let label = li
            .elements()
            .find(|el| matches!(el.local_name(), "a" | "span"));

        let mut chapter = ChapterData::new(nav_title(li, label));
        chapter.nav_id = li
            .attribute(consts::ID)
            .or_else(|| label.and_then(|label| label.attribute(consts::ID)))
            .map(str::to_owned);

        if let Some(href) = label.and_then(|label| label.attribute(consts::HREF)) {
            locate(&mut chapter, href, nav_path)?;
        }

        let id = tree.push(parent, chapter);

        if let Some(sub_list) = li.elements().find(|el| el.local_name() == "ol") {
            push_nav_list(tree, Some(id), sub_list, nav_path)?;
        }
    }
    Ok(())
}

/// The label text, otherwise the text directly within the `li`.
fn nav_title(li: &Element, label: Option<&Element>) -> String {
    label
        .map(Element::text)
        .filter(|text| !text.is_blank())
        .unwrap_or_else(|| {
            let direct: String = li
                .children()
                .iter()
                .filter_map(|node| match node {
                    Node::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            xml::collapse_whitespace(&direct)
        })
}

fn push_nav_points(
    tree: &mut ChapterTree,
    parent: Option<ChapterId>,
    points: &[NavPoint],
    ncx_path: &str,
) -> ParserResult<()> {
    for point in points {
        let mut chapter = ChapterData::new(point.label.as_str());
        chapter.nav_id = Some(point.id.clone());
        locate(&mut chapter, &point.content_src, ncx_path)?;

        let id = tree.push(parent, chapter);
        push_nav_points(tree, Some(id), &point.children, ncx_path)?;
    }
    Ok(())
}

fn locate(chapter: &mut ChapterData, href: &str, base: &str) -> ParserResult<()> {
    let (path, anchor) = uri::split_href(href);

    chapter.relative_path = path.to_owned();
    chapter.anchor = anchor.filter(|anchor| !anchor.is_empty()).map(str::to_owned);
    chapter.absolute_path = Some(uri::resolve_decoded(href, base)?);
    Ok(())
}
