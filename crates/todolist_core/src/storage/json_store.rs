use crate::error::StoreError;
use crate::model::Todo;
use std::path::{Path, PathBuf};

use super::StorageSlot;

const STORE_FILE_NAME: &str = "todos.json";

pub fn store_path() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var("TODOLIST_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| StoreError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("todolist")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| StoreError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todolist")
            .join(STORE_FILE_NAME))
    }
}

/// File-backed slot holding the todo sequence as a bare JSON array.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for JsonStore {
    fn load(&self) -> Result<Vec<Todo>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|err| StoreError::storage(err.to_string()))?;
        serde_json::from_str(&content).map_err(|err| StoreError::storage(err.to_string()))
    }

    fn save(&self, todos: &[Todo]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| StoreError::storage(err.to_string()))?;
        }

        let content = serde_json::to_string_pretty(todos)
            .map_err(|err| StoreError::storage(err.to_string()))?;
        std::fs::write(&self.path, content).map_err(|err| StoreError::storage(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| StoreError::storage(err.to_string()))?;
        }

        Ok(())
    }
}
