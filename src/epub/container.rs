//! The OCF container document (`META-INF/container.xml`).

use crate::epub::consts;

/// A `rootfile` entry of the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootFile {
    pub(crate) full_path: String,
    pub(crate) media_type: String,
}

impl RootFile {
    /// The `full-path`, relative to the container root.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// The root files listed by `META-INF/container.xml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerDocument {
    pub(crate) root_files: Vec<RootFile>,
}

impl ContainerDocument {
    /// A container listing a single package document at `opf_path`.
    pub(crate) fn new(opf_path: &str) -> Self {
        Self {
            root_files: vec![RootFile {
                full_path: opf_path.trim_start_matches('/').to_owned(),
                media_type: consts::PACKAGE_TYPE.to_owned(),
            }],
        }
    }

    pub fn root_files(&self) -> &[RootFile] {
        &self.root_files
    }

    /// The first root file whose media type marks it as a package document.
    pub fn root_file_path(&self) -> Option<&str> {
        self.root_files
            .iter()
            .find(|root_file| root_file.media_type == consts::PACKAGE_TYPE)
            .map(RootFile::full_path)
    }
}
