//! The dashboard's state: every collection, the capability matrix and the
//! per-municipality file trees, each mirrored to its storage key.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use infoco_auth::{Capability, CapabilityMatrix, CredentialRecord, PermissionError, Role};
use infoco_business::{
    uploads, Asset, Directory, DocumentLibrary, Employee, EmployeeExpense, ExternalSystem,
    InternalExpense, LeaveRequest, Municipality, Notification, PaymentNotes, PayrollRecord,
    Supplier, Task, Transaction, UpdatePost,
};
use infoco_core::{Collection, DomainError, DomainResult, Record, RecordId};
use infoco_records::EntityStore;

use crate::error::StorageError;
use crate::keys;
use crate::kv::{KeyValueStore, KeyValueStoreExt};
use crate::seed;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Typed access to the store holding `T`.
pub trait Holds<T: Record> {
    fn store(&self) -> &EntityStore<T>;
    fn store_mut(&mut self) -> &mut EntityStore<T>;
}

macro_rules! collections {
    ($( $field:ident : $ty:ty => $seed:expr ),+ $(,)?) => {
        /// One store per business collection.
        #[derive(Debug, Clone, Default)]
        pub struct Collections {
            $( pub $field: EntityStore<$ty>, )+
        }

        $(
            impl Holds<$ty> for Collections {
                fn store(&self) -> &EntityStore<$ty> {
                    &self.$field
                }

                fn store_mut(&mut self) -> &mut EntityStore<$ty> {
                    &mut self.$field
                }
            }
        )+

        impl Collections {
            fn load<S: KeyValueStore>(kv: &S, seed_defaults: bool) -> Result<Self, StorageError> {
                let now = Utc::now();
                Ok(Self {
                    $( $field: load_or_seed(kv, <$ty as Record>::COLLECTION.storage_key(), seed_defaults, || $seed(now))
                        .map(EntityStore::from_records)?, )+
                })
            }
        }
    };
}

collections! {
    accounts: CredentialRecord => |_| seed::accounts(),
    employees: Employee => |_| seed::employees(),
    tasks: Task => |_| seed::tasks(),
    municipalities: Municipality => |_| seed::municipalities(),
    employee_expenses: EmployeeExpense => |_| seed::employee_expenses(),
    internal_expenses: InternalExpense => |_| seed::internal_expenses(),
    assets: Asset => |_| seed::assets(),
    notifications: Notification => seed::notifications,
    suppliers: Supplier => |_| seed::suppliers(),
    transactions: Transaction => |_| seed::transactions(),
    payrolls: PayrollRecord => |_| seed::payrolls(),
    leave_requests: LeaveRequest => |_| seed::leave_requests(),
    update_posts: UpdatePost => seed::update_posts,
    external_systems: ExternalSystem => |_| seed::external_systems(),
}

/// Stored value under `key`, or `default()` written there first.
fn load_or_seed<S, T, F>(kv: &S, key: &str, seed_defaults: bool, default: F) -> Result<T, StorageError>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned + Default,
    F: FnOnce() -> T,
{
    if let Some(value) = kv.load(key)? {
        return Ok(value);
    }
    if !seed_defaults {
        return Ok(T::default());
    }
    let value = default();
    kv.save(key, &value)?;
    tracing::info!(key, "seeded default data");
    Ok(value)
}

/// Owns all dashboard state and its storage.
#[derive(Debug)]
pub struct Workspace<S> {
    kv: S,
    data: Collections,
    matrix: CapabilityMatrix,
    documents: DocumentLibrary,
    payment_notes: PaymentNotes,
    login_image: Option<String>,
}

impl<S: KeyValueStore> Workspace<S> {
    /// Load every key, seeding absent ones with default data when asked to.
    pub fn open(kv: S, seed_defaults: bool) -> WorkspaceResult<Self> {
        let data = Collections::load(&kv, seed_defaults)?;
        let matrix = load_or_seed(&kv, keys::PERMISSIONS, seed_defaults, CapabilityMatrix::default)?;
        let documents = load_or_seed(&kv, keys::DOCUMENTS, seed_defaults, DocumentLibrary::new)?;
        let payment_notes = load_or_seed(&kv, keys::PAYMENT_NOTES, seed_defaults, PaymentNotes::new)?;
        let login_image = kv.load::<Option<String>>(keys::LOGIN_IMAGE)?.flatten();

        tracing::info!(
            accounts = data.accounts.len(),
            employees = data.employees.len(),
            "workspace opened"
        );
        Ok(Self {
            kv,
            data,
            matrix,
            documents,
            payment_notes,
            login_image,
        })
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn collections(&self) -> &Collections {
        &self.data
    }

    pub fn list<T: Record>(&self) -> &[T]
    where
        Collections: Holds<T>,
    {
        self.data.store().list()
    }

    pub fn get<T: Record>(&self, id: RecordId) -> DomainResult<&T>
    where
        Collections: Holds<T>,
    {
        self.data
            .store()
            .get(id)
            .ok_or(DomainError::not_found(T::COLLECTION, id))
    }

    /// Run `change` against a copy of one collection, write the whole copy
    /// back and only then make it live.
    ///
    /// A domain error or a failed write leaves both memory and storage as
    /// they were.
    pub fn mutate<T, R, F>(&mut self, change: F) -> WorkspaceResult<R>
    where
        T: Record,
        Collections: Holds<T>,
        F: FnOnce(&mut EntityStore<T>) -> DomainResult<R>,
    {
        let mut staged = self.data.store().clone();
        let out = change(&mut staged)?;
        self.kv
            .save(T::COLLECTION.storage_key(), staged.list())
            .inspect_err(|e| {
                tracing::error!(collection = %T::COLLECTION, error = %e, "collection write failed");
            })?;
        *self.data.store_mut() = staged;
        Ok(out)
    }

    /// Resolution context for display rows.
    pub fn directory(&self) -> Directory<'_> {
        Directory {
            employees: self.data.employees.list(),
            suppliers: self.data.suppliers.list(),
            accounts: self.data.accounts.list(),
            municipalities: self.data.municipalities.list(),
        }
    }

    pub fn accounts(&self) -> &[CredentialRecord] {
        self.data.accounts.list()
    }

    pub fn matrix(&self) -> &CapabilityMatrix {
        &self.matrix
    }

    pub fn set_capability(&mut self, role: Role, capability: Capability, value: bool) -> WorkspaceResult<()> {
        let mut staged = self.matrix.clone();
        staged.set_capability(role, capability, value)?;
        self.kv.save(keys::PERMISSIONS, &staged)?;
        self.matrix = staged;
        Ok(())
    }

    pub fn documents(&self) -> &DocumentLibrary {
        &self.documents
    }

    pub fn update_documents<R, F>(&mut self, change: F) -> WorkspaceResult<R>
    where
        F: FnOnce(&mut DocumentLibrary) -> DomainResult<R>,
    {
        let mut staged = self.documents.clone();
        let out = change(&mut staged)?;
        self.kv.save(keys::DOCUMENTS, &staged)?;
        self.documents = staged;
        Ok(out)
    }

    pub fn payment_notes(&self) -> &PaymentNotes {
        &self.payment_notes
    }

    pub fn update_payment_notes<R, F>(&mut self, change: F) -> WorkspaceResult<R>
    where
        F: FnOnce(&mut PaymentNotes) -> DomainResult<R>,
    {
        let mut staged = self.payment_notes.clone();
        let out = change(&mut staged)?;
        self.kv.save(keys::PAYMENT_NOTES, &staged)?;
        self.payment_notes = staged;
        Ok(out)
    }

    pub fn login_image(&self) -> Option<&str> {
        self.login_image.as_deref()
    }

    /// `None` restores the default login screen.
    pub fn set_login_image(&mut self, image: Option<String>) -> WorkspaceResult<()> {
        match &image {
            Some(data_url) => {
                uploads::ensure_image("image", data_url)?;
                self.kv.save(keys::LOGIN_IMAGE, data_url)?;
            }
            None => self.kv.remove(keys::LOGIN_IMAGE)?,
        }
        self.login_image = image;
        Ok(())
    }

    /// Snapshot handed to the analysis service.
    pub fn analysis_context(&self) -> serde_json::Value {
        json!({
            "employees": self.data.employees.list(),
            "tasks": self.data.tasks.list(),
            "financeData": self.data.municipalities.list(),
        })
    }

    /// Storage keys of every collection, for diagnostics.
    pub fn collection_keys() -> impl Iterator<Item = &'static str> {
        Collection::ALL.into_iter().map(Collection::storage_key)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use infoco_business::{
        generate_payroll, FileUpload, MonthYear, TaskDraft, TaskStatus,
    };
    use infoco_records::Submitted;

    use super::*;
    use crate::error::StorageResult;
    use crate::kv::InMemoryKeyValueStore;

    fn open() -> (Arc<InMemoryKeyValueStore>, Workspace<Arc<InMemoryKeyValueStore>>) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let ws = Workspace::open(kv.clone(), true).unwrap();
        (kv, ws)
    }

    fn task_draft() -> TaskDraft {
        TaskDraft {
            id: None,
            employee_id: Some(RecordId::new(1)),
            title: Some("Nova tarefa".into()),
            description: Some("d".into()),
            date: Some("2025-07-20".parse().unwrap()),
            hours: Some(2.0),
            status: Some(TaskStatus::Pending),
        }
    }

    #[test]
    fn absent_keys_are_seeded_and_written() {
        let (kv, ws) = open();
        assert_eq!(ws.accounts().len(), 4);
        assert_eq!(ws.list::<Employee>().len(), 5);
        for key in Workspace::<Arc<InMemoryKeyValueStore>>::collection_keys() {
            assert!(kv.get(key).unwrap().is_some(), "{key} not seeded");
        }
        assert!(kv.get(keys::PERMISSIONS).unwrap().is_some());
    }

    #[test]
    fn seeding_can_be_disabled() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let ws = Workspace::open(kv.clone(), false).unwrap();
        assert!(ws.accounts().is_empty());
        assert_eq!(kv.keys().unwrap(), Vec::<String>::new());
        assert_eq!(ws.matrix(), &CapabilityMatrix::default());
    }

    #[test]
    fn mutations_are_mirrored_and_reloaded() {
        let (kv, mut ws) = open();
        let outcome = ws
            .mutate::<Task, _, _>(|tasks| tasks.table().submit(task_draft()))
            .unwrap();
        let Submitted::Created(id) = outcome else {
            panic!("expected create");
        };
        assert_eq!(id, RecordId::new(6));

        let reopened = Workspace::open(kv, true).unwrap();
        assert_eq!(reopened.get::<Task>(id).unwrap().title, "Nova tarefa");
    }

    #[test]
    fn failed_mutations_write_nothing() {
        let (kv, mut ws) = open();
        let before = kv.get(Collection::Tasks.storage_key()).unwrap();
        let err = ws
            .mutate::<Task, _, _>(|tasks| tasks.table().submit(TaskDraft::default()))
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Domain(DomainError::Validation { .. })));
        assert_eq!(kv.get(Collection::Tasks.storage_key()).unwrap(), before);
    }

    #[test]
    fn payroll_generation_goes_through_mutate() {
        let (_, mut ws) = open();
        let employees = ws.list::<Employee>().to_vec();
        let month: MonthYear = "2025-07".parse().unwrap();
        let created = ws
            .mutate::<PayrollRecord, _, _>(|payrolls| generate_payroll(&employees, payrolls, month))
            .unwrap();
        assert_eq!(created.len(), 5);
        assert_eq!(ws.list::<PayrollRecord>().len(), 7);
    }

    #[test]
    fn capability_edits_persist_and_immutable_cells_are_refused() {
        let (kv, mut ws) = open();
        ws.set_capability(Role::Coordinator, Capability::ManageFinance, true).unwrap();
        assert!(matches!(
            ws.set_capability(Role::Support, Capability::ManageUsers, true),
            Err(WorkspaceError::Permission(_))
        ));

        let reopened = Workspace::open(kv, true).unwrap();
        assert!(reopened.matrix().can(Role::Coordinator, Capability::ManageFinance));
        assert!(!reopened.matrix().can(Role::Support, Capability::ManageUsers));
    }

    #[test]
    fn documents_and_login_image_are_persisted() {
        let (kv, mut ws) = open();
        ws.update_documents(|lib| {
            lib.add_file(
                "ALMADINA",
                "Contratos",
                FileUpload {
                    name: "c.pdf".into(),
                    mime_type: "application/pdf".into(),
                    size: 3,
                    data_url: "data:application/pdf;base64,AAAA".into(),
                },
            )
        })
        .unwrap();
        ws.set_login_image(Some("data:image/png;base64,AAAA".into())).unwrap();

        let reopened = Workspace::open(kv.clone(), true).unwrap();
        assert_eq!(reopened.documents().files("ALMADINA", "Contratos").len(), 1);
        assert_eq!(reopened.login_image(), Some("data:image/png;base64,AAAA"));

        ws.set_login_image(None).unwrap();
        assert_eq!(kv.get(keys::LOGIN_IMAGE).unwrap(), None);
    }

    #[test]
    fn analysis_context_carries_the_three_arrays() {
        let (_, ws) = open();
        let ctx = ws.analysis_context();
        assert_eq!(ctx["employees"].as_array().map(Vec::len), Some(5));
        assert_eq!(ctx["financeData"][0]["municipality"], "ALMADINA");
    }

    /// Memory store whose writes start failing once `full` is set.
    #[derive(Default)]
    struct FlakyDisk {
        inner: InMemoryKeyValueStore,
        full: AtomicBool,
    }

    impl KeyValueStore for FlakyDisk {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if self.full.load(Ordering::SeqCst) {
                return Err(StorageError::Io(anyhow::anyhow!("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            self.inner.keys()
        }
    }

    #[test]
    fn failed_writes_leave_memory_untouched() {
        let disk = Arc::new(FlakyDisk::default());
        let mut ws = Workspace::open(disk.clone(), true).unwrap();
        disk.full.store(true, Ordering::SeqCst);

        let err = ws
            .mutate::<Task, _, _>(|tasks| tasks.table().submit(task_draft()))
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Storage(_)));
        assert_eq!(ws.list::<Task>().len(), 5);

        assert!(ws.set_capability(Role::Coordinator, Capability::ManageFinance, true).is_err());
        assert!(!ws.matrix().can(Role::Coordinator, Capability::ManageFinance));

        let before = ws.documents().clone();
        let upload = FileUpload {
            name: "c.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 3,
            data_url: "data:application/pdf;base64,AAAA".into(),
        };
        assert!(ws.update_documents(|lib| lib.add_file("ALMADINA", "Contratos", upload)).is_err());
        assert_eq!(ws.documents(), &before);

        disk.full.store(false, Ordering::SeqCst);
        let outcome = ws
            .mutate::<Task, _, _>(|tasks| tasks.table().submit(task_draft()))
            .unwrap();
        assert_eq!(outcome, Submitted::Created(RecordId::new(6)));
    }
}
