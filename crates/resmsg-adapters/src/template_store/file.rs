//! File-backed store: one JSON or TOML catalog document.

use std::path::{Path, PathBuf};

use resmsg_core::{application::ports::TemplateStore, domain::TemplateMap, error::ResmsgResult};

use crate::catalog_loader::read_catalog_file;

/// Reads one catalog file on every load.
///
/// The file is not required to exist at construction time; `load` fails
/// with `ResourceNotFound` if it is still missing then.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateStore for FileStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> ResmsgResult<TemplateMap> {
        read_catalog_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}
