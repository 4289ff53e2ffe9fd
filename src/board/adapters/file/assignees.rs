//! Assignee registry stored as a JSON document in a directory.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::board::{
    domain::AssigneeRegistry,
    ports::{AssigneeStore, AssigneeStoreError, AssigneeStoreResult},
};

const DOCUMENT_NAME: &str = "assignees.json";
const STAGING_NAME: &str = "assignees.json.tmp";

#[derive(Debug, Default, Serialize, Deserialize)]
struct AssigneeDocument {
    #[serde(default)]
    assignees: Vec<String>,
}

/// Assignee store writing `assignees.json` inside one directory.
///
/// Access is confined to that directory. Writes go to a staging file that
/// is then renamed over the document.
#[derive(Debug, Clone)]
pub struct FileAssigneeStore {
    dir: Arc<Dir>,
}

impl FileAssigneeStore {
    /// Opens the store rooted at `path`, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`AssigneeStoreError::Persistence`] when the directory cannot
    /// be opened.
    pub fn open(path: &Utf8Path) -> AssigneeStoreResult<Self> {
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(AssigneeStoreError::persistence)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

async fn run_blocking<F, T>(f: F) -> AssigneeStoreResult<T>
where
    F: FnOnce() -> AssigneeStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(AssigneeStoreError::persistence)?
}

fn read_document(dir: &Dir) -> AssigneeStoreResult<AssigneeRegistry> {
    let contents = match dir.read_to_string(DOCUMENT_NAME) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AssigneeRegistry::new());
        }
        Err(err) => return Err(AssigneeStoreError::persistence(err)),
    };
    let document: AssigneeDocument = serde_json::from_str(&contents)
        .map_err(|err| AssigneeStoreError::Malformed(err.to_string()))?;
    Ok(AssigneeRegistry::from_names(document.assignees))
}

fn write_document(dir: &Dir, registry: &AssigneeRegistry) -> AssigneeStoreResult<()> {
    let document = AssigneeDocument {
        assignees: registry.names().to_vec(),
    };
    let contents = serde_json::to_string_pretty(&document)
        .map_err(|err| AssigneeStoreError::Malformed(err.to_string()))?;
    dir.write(STAGING_NAME, contents)
        .map_err(AssigneeStoreError::persistence)?;
    dir.rename(STAGING_NAME, dir, DOCUMENT_NAME)
        .map_err(AssigneeStoreError::persistence)
}

#[async_trait]
impl AssigneeStore for FileAssigneeStore {
    async fn load(&self) -> AssigneeStoreResult<AssigneeRegistry> {
        let dir = Arc::clone(&self.dir);
        run_blocking(move || read_document(&dir)).await
    }

    async fn save(&self, registry: &AssigneeRegistry) -> AssigneeStoreResult<()> {
        let dir = Arc::clone(&self.dir);
        let snapshot = registry.clone();
        tracing::debug!(count = snapshot.len(), "saving assignee registry");
        run_blocking(move || write_document(&dir, &snapshot)).await
    }
}
