//! Local gradebook file, in the same JSON shape as the remote one.

use std::path::{Path, PathBuf};

use super::{parse_document, GradebookSource, SourceError};
use crate::record::RawRecord;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl GradebookSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_document(&content)
    }
}
