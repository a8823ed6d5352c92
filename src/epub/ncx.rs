//! The EPUB 2 NCX navigation document.

/// A `meta` entry of the NCX `head`, such as `dtb:uid`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NcxMeta {
    pub(crate) name: String,
    pub(crate) content: String,
    pub(crate) scheme: Option<String>,
}

impl NcxMeta {
    pub(crate) fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            scheme: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

/// A `navPoint` of the `navMap`, with nested nav points in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavPoint {
    pub(crate) id: String,
    pub(crate) class: Option<String>,
    pub(crate) play_order: Option<u32>,
    pub(crate) label: String,
    /// Relative to the NCX document, possibly with a hash location.
    pub(crate) content_src: String,
    pub(crate) children: Vec<NavPoint>,
}

impl NavPoint {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Advisory reading position; nesting and document order take precedence.
    pub fn play_order(&self) -> Option<u32> {
        self.play_order
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content_src(&self) -> &str {
        &self.content_src
    }

    pub fn children(&self) -> &[NavPoint] {
        &self.children
    }
}

/// A `pageTarget` of a `pageList`, or a `navTarget` of a `navList`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavTarget {
    pub(crate) id: Option<String>,
    pub(crate) class: Option<String>,
    /// The `type` of a page target: `front`, `normal` or `special`.
    pub(crate) kind: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) play_order: Option<u32>,
    pub(crate) label: String,
    pub(crate) content_src: String,
}

impl NavTarget {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn play_order(&self) -> Option<u32> {
        self.play_order
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content_src(&self) -> &str {
        &self.content_src
    }
}

/// A `pageList` or `navList`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavTargetList {
    pub(crate) id: Option<String>,
    pub(crate) class: Option<String>,
    pub(crate) label: Option<String>,
    pub(crate) targets: Vec<NavTarget>,
}

impl NavTargetList {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn targets(&self) -> &[NavTarget] {
        &self.targets
    }
}

/// The parsed `.ncx` document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NcxDocument {
    pub(crate) metas: Vec<NcxMeta>,
    pub(crate) doc_title: String,
    pub(crate) doc_authors: Vec<String>,
    pub(crate) nav_map: Vec<NavPoint>,
    pub(crate) page_list: Option<NavTargetList>,
    pub(crate) nav_lists: Vec<NavTargetList>,
}

impl NcxDocument {
    pub(crate) fn new(uid: &str, title: &str) -> Self {
        Self {
            metas: vec![NcxMeta::new("dtb:uid", uid)],
            doc_title: title.to_owned(),
            ..Self::default()
        }
    }

    pub fn metas(&self) -> &[NcxMeta] {
        &self.metas
    }

    pub fn doc_title(&self) -> &str {
        &self.doc_title
    }

    pub fn doc_authors(&self) -> &[String] {
        &self.doc_authors
    }

    /// Top-level nav points in document order.
    pub fn nav_map(&self) -> &[NavPoint] {
        &self.nav_map
    }

    pub fn page_list(&self) -> Option<&NavTargetList> {
        self.page_list.as_ref()
    }

    pub fn nav_lists(&self) -> &[NavTargetList] {
        &self.nav_lists
    }

    /// Depth-first iteration over every nav point.
    pub fn nav_points(&self) -> impl Iterator<Item = &NavPoint> {
        let mut stack: Vec<&NavPoint> = self.nav_map.iter().rev().collect();

        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// The highest play order in use, including page and nav targets.
    pub(crate) fn max_play_order(&self) -> Option<u32> {
        let targets = self
            .page_list
            .iter()
            .chain(&self.nav_lists)
            .flat_map(|list| &list.targets)
            .filter_map(NavTarget::play_order);

        self.nav_points()
            .filter_map(NavPoint::play_order)
            .chain(targets)
            .max()
    }
}
