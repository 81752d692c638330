//! Document-store seam used for series folders and workbook backups.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FolderId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub id: FileId,
    pub name: String,
    pub created: NaiveDate,
}

pub trait DocumentStore {
    /// Return the folder named `name` under `parent`, creating it if absent.
    fn find_or_create_folder(&mut self, parent: &FolderId, name: &str) -> Result<FolderId>;

    fn copy_file(&mut self, source: &FileId, dest_name: &str, dest: &FolderId) -> Result<FileId>;

    fn list_files(&self, folder: &FolderId) -> Result<Vec<FileHandle>>;

    fn trash(&mut self, file: &FileId) -> Result<()>;
}

/// In-memory document store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    folders: BTreeMap<FolderId, Vec<(FolderId, String)>>,
    files: BTreeMap<FolderId, Vec<FileHandle>>,
    trashed: Vec<FileId>,
    next_id: usize,
    today: NaiveDate,
}

impl MemoryDocumentStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ..Self::default()
        }
    }

    pub fn root(&self) -> FolderId {
        FolderId("root".to_string())
    }

    /// Seed a file directly into a folder (test setup).
    pub fn seed_file(&mut self, folder: &FolderId, name: &str, created: NaiveDate) -> FileId {
        let id = self.fresh_id("file");
        self.files.entry(folder.clone()).or_default().push(FileHandle {
            id: FileId(id.clone()),
            name: name.to_string(),
            created,
        });
        FileId(id)
    }

    pub fn trashed(&self) -> &[FileId] {
        &self.trashed
    }

    pub fn folder_names(&self, parent: &FolderId) -> Vec<String> {
        self.folders
            .get(parent)
            .map(|entries| entries.iter().map(|(_, name)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn fresh_id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{kind}-{}", self.next_id)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn find_or_create_folder(&mut self, parent: &FolderId, name: &str) -> Result<FolderId> {
        if let Some(entries) = self.folders.get(parent)
            && let Some((id, _)) = entries.iter().find(|(_, n)| n == name)
        {
            return Ok(id.clone());
        }
        let id = FolderId(self.fresh_id("folder"));
        self.folders
            .entry(parent.clone())
            .or_default()
            .push((id.clone(), name.to_string()));
        Ok(id)
    }

    fn copy_file(&mut self, source: &FileId, dest_name: &str, dest: &FolderId) -> Result<FileId> {
        // The memory store does not track file contents, only handles.
        let _ = source;
        let id = FileId(self.fresh_id("file"));
        let created = self.today;
        self.files.entry(dest.clone()).or_default().push(FileHandle {
            id: id.clone(),
            name: dest_name.to_string(),
            created,
        });
        Ok(id)
    }

    fn list_files(&self, folder: &FolderId) -> Result<Vec<FileHandle>> {
        Ok(self.files.get(folder).cloned().unwrap_or_default())
    }

    fn trash(&mut self, file: &FileId) -> Result<()> {
        for files in self.files.values_mut() {
            if let Some(pos) = files.iter().position(|handle| &handle.id == file) {
                files.remove(pos);
                self.trashed.push(file.clone());
                return Ok(());
            }
        }
        Err(StoreError::FileNotFound(file.0.clone()))
    }
}
