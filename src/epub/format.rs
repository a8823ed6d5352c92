//! The parsed structural documents of a [`Book`](crate::Book).

use crate::epub::container::ContainerDocument;
use crate::epub::nav::NavDocument;
use crate::epub::ncx::NcxDocument;
use crate::epub::package::PackageDocument;

/// Container, package and navigation documents, with their archive locations.
///
/// All paths are absolute archive paths starting with `/`.
#[derive(Clone, Debug, PartialEq)]
pub struct Format {
    pub(crate) container: ContainerDocument,
    pub(crate) opf_path: String,
    pub(crate) package: PackageDocument,
    pub(crate) ncx: Option<NcxDocument>,
    pub(crate) ncx_path: Option<String>,
    pub(crate) nav: Option<NavDocument>,
    pub(crate) nav_path: Option<String>,
}

impl Format {
    pub fn container(&self) -> &ContainerDocument {
        &self.container
    }

    /// The location of the package document, such as `/OEBPS/content.opf`.
    pub fn opf_path(&self) -> &str {
        &self.opf_path
    }

    pub fn package(&self) -> &PackageDocument {
        &self.package
    }

    /// The EPUB 2 navigation control file, if the package declares one.
    pub fn ncx(&self) -> Option<&NcxDocument> {
        self.ncx.as_ref()
    }

    pub fn ncx_path(&self) -> Option<&str> {
        self.ncx_path.as_deref()
    }

    /// The EPUB 3 navigation document, if the package declares one.
    pub fn nav(&self) -> Option<&NavDocument> {
        self.nav.as_ref()
    }

    pub fn nav_path(&self) -> Option<&str> {
        self.nav_path.as_deref()
    }
}
