//! Per-municipality file storage: the document library and payment notes.
//!
//! Both are trees keyed by municipality name rather than flat collections,
//! and both are persisted as a whole.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use infoco_core::{DomainError, DomainResult, IdGenerator, RecordId, Required};

use crate::period::MonthYear;
use crate::uploads::{self, MAX_DOCUMENT_BYTES, MAX_PAYMENT_NOTE_BYTES};

pub const DOCUMENT_FOLDERS: [&str; 6] = ["Contratos", "ARPs", "Minutas", "QDD", "TR", "DFDs"];

/// A stored file, content inlined as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedFile {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub data_url: String,
}

/// File as read from the client, before it gets an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileUpload {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub data_url: String,
}

impl FileUpload {
    fn check(&self, limit: u64) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.name.is_blank() {
            missing.push("name");
        }
        if self.data_url.is_blank() {
            missing.push("data_url");
        }
        if !missing.is_empty() {
            return Err(DomainError::validation(missing));
        }
        uploads::ensure_within("size", Some(self.size), &self.data_url, limit)
    }

    fn stored(self, id: RecordId) -> ManagedFile {
        ManagedFile {
            id,
            name: self.name,
            mime_type: self.mime_type,
            size: self.size,
            data_url: self.data_url,
        }
    }
}

fn ensure_municipality(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_field("municipality"));
    }
    Ok(())
}

type DocumentTree = BTreeMap<String, BTreeMap<String, Vec<ManagedFile>>>;

/// Municipality → folder → files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DocumentTree", into = "DocumentTree")]
pub struct DocumentLibrary {
    tree: DocumentTree,
    ids: IdGenerator,
}

impl From<DocumentTree> for DocumentLibrary {
    fn from(tree: DocumentTree) -> Self {
        let ids = IdGenerator::seeded(tree.values().flat_map(|f| f.values()).flatten().map(|f| f.id));
        Self { tree, ids }
    }
}

impl From<DocumentLibrary> for DocumentTree {
    fn from(library: DocumentLibrary) -> Self {
        library.tree
    }
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Files in one folder; empty when nothing was ever uploaded there.
    pub fn files(&self, municipality: &str, folder: &str) -> &[ManagedFile] {
        self.tree
            .get(municipality)
            .and_then(|folders| folders.get(folder))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Store `upload`, creating the municipality and folder levels on demand.
    pub fn add_file(&mut self, municipality: &str, folder: &str, upload: FileUpload) -> DomainResult<RecordId> {
        ensure_municipality(municipality)?;
        if !DOCUMENT_FOLDERS.contains(&folder) {
            return Err(DomainError::invalid_field("folder"));
        }
        upload.check(MAX_DOCUMENT_BYTES)?;

        let id = self.ids.next_id();
        self.tree
            .entry(municipality.to_string())
            .or_default()
            .entry(folder.to_string())
            .or_default()
            .push(upload.stored(id));
        tracing::debug!(municipality, folder, %id, "document stored");
        Ok(id)
    }

    /// Delete one file. Missing municipality, folder or file is a no-op.
    pub fn delete_file(&mut self, municipality: &str, folder: &str, id: RecordId) -> Option<ManagedFile> {
        let files = self.tree.get_mut(municipality)?.get_mut(folder)?;
        let pos = files.iter().position(|f| f.id == id)?;
        tracing::debug!(municipality, folder, %id, "document removed");
        Some(files.remove(pos))
    }
}

/// A proof of payment attached to a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNote {
    pub id: RecordId,
    pub reference_month: MonthYear,
    pub description: String,
    pub file: ManagedFile,
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNoteUpload {
    pub reference_month: MonthYear,
    #[serde(default)]
    pub description: String,
    pub file: FileUpload,
}

type PaymentNoteTree = BTreeMap<String, Vec<PaymentNote>>;

/// Municipality → payment notes, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaymentNoteTree", into = "PaymentNoteTree")]
pub struct PaymentNotes {
    tree: PaymentNoteTree,
    ids: IdGenerator,
}

impl From<PaymentNoteTree> for PaymentNotes {
    fn from(tree: PaymentNoteTree) -> Self {
        let ids = IdGenerator::seeded(
            tree.values()
                .flatten()
                .flat_map(|n| [n.id, n.file.id]),
        );
        Self { tree, ids }
    }
}

impl From<PaymentNotes> for PaymentNoteTree {
    fn from(notes: PaymentNotes) -> Self {
        notes.tree
    }
}

impl PaymentNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &PaymentNoteTree {
        &self.tree
    }

    pub fn list(&self, municipality: &str) -> &[PaymentNote] {
        self.tree
            .get(municipality)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add(&mut self, municipality: &str, upload: PaymentNoteUpload) -> DomainResult<RecordId> {
        ensure_municipality(municipality)?;
        upload.file.check(MAX_PAYMENT_NOTE_BYTES)?;

        let id = self.ids.next_id();
        let file_id = self.ids.next_id();
        let note = PaymentNote {
            id,
            reference_month: upload.reference_month,
            description: upload.description,
            file: upload.file.stored(file_id),
            upload_date: Utc::now(),
        };
        self.tree.entry(municipality.to_string()).or_default().insert(0, note);
        tracing::debug!(municipality, %id, "payment note stored");
        Ok(id)
    }

    pub fn delete(&mut self, municipality: &str, id: RecordId) -> Option<PaymentNote> {
        let notes = self.tree.get_mut(municipality)?;
        let pos = notes.iter().position(|n| n.id == id)?;
        Some(notes.remove(pos))
    }
}
