//! Application context: owns the live catalog, the records and the file
//! they are flushed to.

use std::path::Path;

use crate::{
    catalog::Catalog,
    error::StoreError,
    store::{DataFile, StudyStore},
};

#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    store: StudyStore,
    file: DataFile,
}

impl Session {
    /// Loads the data file on top of the built-in catalog. On a load
    /// failure the session starts blank and the error is handed back for
    /// the caller to report.
    pub fn open(file: DataFile) -> (Self, Option<StoreError>) {
        let mut session = Self {
            catalog: Catalog::builtin(),
            store: StudyStore::new(),
            file,
        };
        let err = session.load();
        (session, err)
    }

    fn load(&mut self) -> Option<StoreError> {
        match self.file.read() {
            Ok(doc) => {
                self.store.deserialize(doc, &mut self.catalog);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "starting with empty study data");
                self.store = StudyStore::new();
                Some(e)
            }
        }
    }

    /// Discards in-memory state and reads the file again.
    pub fn reload(&mut self) -> Option<StoreError> {
        self.catalog = Catalog::builtin();
        self.store = StudyStore::new();
        self.load()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let doc = self.store.serialize(&self.catalog);
        self.file.write(&doc).inspect_err(|e| {
            tracing::warn!(error = %e, "save failed, keeping in-memory state");
        })
    }

    /// Exit path: keeps a pending, non-blank note for `selected` and
    /// flushes everything.
    pub fn close(&mut self, selected: Option<&str>, pending_note: &str) -> Result<(), StoreError> {
        if let Some(path) = selected {
            self.store.set_note(path, pending_note);
        }
        self.save()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn store(&self) -> &StudyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StudyStore {
        &mut self.store
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
