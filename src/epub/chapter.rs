//! The chapter tree derived from the navigation documents.
//!
//! Chapters live in a flat arena in document order. Parent, previous
//! and next links are [`ChapterId`] indices into that arena, where
//! previous/next follow a depth-first traversal: the first sub-chapter
//! comes right after its parent and the chapter after a subtree
//! comes right after the subtree's last descendant.

/// Index of a chapter within its [`ChapterTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterId(pub(crate) usize);

impl ChapterId {
    /// The position of the chapter in document order.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChapterData {
    pub(crate) nav_id: Option<String>,
    pub(crate) title: String,
    pub(crate) relative_path: String,
    pub(crate) anchor: Option<String>,
    pub(crate) absolute_path: Option<String>,
    parent: Option<ChapterId>,
    previous: Option<ChapterId>,
    next: Option<ChapterId>,
    children: Vec<ChapterId>,
}

impl ChapterData {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Chapters in document order with their nesting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChapterTree {
    chapters: Vec<ChapterData>,
    roots: Vec<ChapterId>,
}

impl ChapterTree {
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn get(&self, id: ChapterId) -> Option<Chapter<'_>> {
        self.chapters.get(id.0).map(|_| Chapter { tree: self, id })
    }

    /// Top-level chapters.
    pub fn roots(&self) -> impl Iterator<Item = Chapter<'_>> {
        self.roots.iter().map(|&id| Chapter { tree: self, id })
    }

    /// Every chapter in depth-first document order.
    pub fn iter(&self) -> impl Iterator<Item = Chapter<'_>> {
        (0..self.chapters.len()).map(|i| Chapter {
            tree: self,
            id: ChapterId(i),
        })
    }

    pub fn first(&self) -> Option<Chapter<'_>> {
        self.get(ChapterId(0))
    }

    /// Appends `chapter` as the last chapter in document order,
    /// either at the top level or as the last child of `parent`.
    ///
    /// `parent` must be the last chapter or one of its ancestors,
    /// which holds when building in document order.
    pub(crate) fn push(&mut self, parent: Option<ChapterId>, mut chapter: ChapterData) -> ChapterId {
        let id = ChapterId(self.chapters.len());
        let previous = id.0.checked_sub(1).map(ChapterId);

        chapter.parent = parent;
        chapter.previous = previous;
        chapter.next = None;
        chapter.children.clear();

        if let Some(previous) = previous {
            self.chapters[previous.0].next = Some(id);
        }
        match parent {
            Some(parent) => self.chapters[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        self.chapters.push(chapter);
        id
    }

    pub(crate) fn clear(&mut self) {
        self.chapters.clear();
        self.roots.clear();
    }

    fn data(&self, id: ChapterId) -> &ChapterData {
        &self.chapters[id.0]
    }
}

/// A view of one chapter within a [`ChapterTree`].
#[derive(Copy, Clone, Debug)]
pub struct Chapter<'a> {
    tree: &'a ChapterTree,
    id: ChapterId,
}

impl<'a> Chapter<'a> {
    fn view(&self, id: Option<ChapterId>) -> Option<Chapter<'a>> {
        id.map(|id| Chapter { tree: self.tree, id })
    }

    fn data(&self) -> &'a ChapterData {
        self.tree.data(self.id)
    }

    pub fn id(&self) -> ChapterId {
        self.id
    }

    /// The `id` of the originating `li` or `navPoint`, if any.
    pub fn nav_id(&self) -> Option<&'a str> {
        self.data().nav_id.as_deref()
    }

    pub fn title(&self) -> &'a str {
        &self.data().title
    }

    /// The href without its hash location, relative to the navigation document.
    /// Empty for entries without a link.
    pub fn relative_path(&self) -> &'a str {
        &self.data().relative_path
    }

    /// The in-document hash location, without `#`.
    pub fn anchor(&self) -> Option<&'a str> {
        self.data().anchor.as_deref()
    }

    /// The archive path of the linked document, starting with `/`.
    pub fn absolute_path(&self) -> Option<&'a str> {
        self.data().absolute_path.as_deref()
    }

    pub fn parent(&self) -> Option<Chapter<'a>> {
        self.view(self.data().parent)
    }

    /// The chapter visited before this one in depth-first order.
    pub fn previous(&self) -> Option<Chapter<'a>> {
        self.view(self.data().previous)
    }

    /// The chapter visited after this one in depth-first order.
    pub fn next(&self) -> Option<Chapter<'a>> {
        self.view(self.data().next)
    }

    pub fn sub_chapters(&self) -> impl Iterator<Item = Chapter<'a>> + use<'a> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Chapter { tree, id })
    }

    /// Number of ancestors; top-level chapters have a depth of `0`.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), Chapter::parent).count()
    }
}

impl PartialEq for Chapter<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
