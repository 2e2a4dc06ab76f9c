// Menu persistence: one plain text file, overwritten on every save.
// No locking and no write-then-rename; the tool is single user.

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_MENU_FILE: &str = "menu_semanal.txt";

/// Write `menu` to `path`, creating or truncating it.
pub fn save_menu(menu: &str, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    fs::write(path, menu).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = menu.len(), "Menu saved");
    Ok(())
}

/// Read the whole file at `path`. A missing file is reported as
/// `StoreError::NotFound`, everything else as `StoreError::Io`.
pub fn load_menu(path: impl AsRef<Path>) -> Result<String, StoreError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| StoreError::from_io(path.to_path_buf(), e))?;
    debug!(path = %path.display(), bytes = data.len(), "Menu loaded");
    Ok(data)
}

/// The menu file used by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuStore {
    path: PathBuf,
}

impl MenuStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, menu: &str) -> Result<(), StoreError> {
        save_menu(menu, &self.path)
    }

    pub fn load(&self) -> Result<String, StoreError> {
        load_menu(&self.path)
    }
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new(DEFAULT_MENU_FILE)
    }
}
