//! Source file discovery under a package directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{KitError, Result};

/// Lazy, stably ordered iterator over source files below a directory.
///
/// Entries are visited sorted by file name, so repeated scans of an unchanged
/// tree yield the same sequence. Symlinks are not followed.
pub struct SourceFiles {
    walker: walkdir::IntoIter,
    extension: String,
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(KitError::Walk(e))),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if path
                .extension()
                .is_some_and(|ext| ext.to_str() == Some(self.extension.as_str()))
            {
                return Some(Ok(path));
            }
        }
    }
}

/// Enumerate every file with `extension` under `dir`, recursively.
///
/// Fails with [`KitError::NotFound`] if `dir` does not exist.
pub fn scan_sources(dir: &Path, extension: &str) -> Result<SourceFiles> {
    if !dir.exists() {
        return Err(KitError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();
    Ok(SourceFiles {
        walker,
        extension: extension.to_string(),
    })
}
