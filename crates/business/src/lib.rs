//! Business collections of the dashboard.
//!
//! Each collection is declared with [`infoco_core::record!`] and gets its
//! rules from [`infoco_core::RecordRules`]. Domain helpers (filters, totals,
//! payroll, maintenance, document trees) live next to the record they serve.

#[macro_use]
mod macros;

pub mod assets;
pub mod documents;
pub mod employees;
pub mod expenses;
pub mod finance;
pub mod hr;
pub mod integrations;
pub mod notifications;
pub mod period;
pub mod reports;
pub mod rows;
pub mod tasks;
pub mod updates;
pub mod uploads;

pub use assets::{add_maintenance_record, Asset, AssetDraft, AssetStatus, AssetSummary, MaintenanceEntry, MaintenanceRecord};
pub use documents::{DocumentLibrary, FileUpload, ManagedFile, PaymentNote, PaymentNoteUpload, PaymentNotes, DOCUMENT_FOLDERS};
pub use employees::{Employee, EmployeeDraft, DEPARTMENTS};
pub use expenses::{
    EmployeeExpense, EmployeeExpenseDraft, ExpenseType, InternalExpense, InternalExpenseCategory,
    InternalExpenseDraft, InternalExpenseSummary, PaymentStatus, Supplier, SupplierDraft,
};
pub use finance::{FinanceSummary, Municipality, MunicipalityDraft, Transaction, TransactionDraft, TransactionStatus, TransactionType};
pub use hr::{generate_payroll, LeaveRequest, LeaveRequestDraft, LeaveStatus, LeaveType, PayrollRecord, PayrollRecordDraft};
pub use integrations::{ExternalSystem, ExternalSystemDraft, ExternalSystemType, IntegrationSummary};
pub use notifications::{Notification, NotificationDraft, NotificationKind};
pub use period::{today, InvalidMonth, MonthYear};
pub use reports::{contract_deadlines, DashboardStats, EmployeeReport, InvalidPeriod, ReportFilter, ReportPeriod, TaskReport};
pub use rows::{rows, Directory, Resolve, Row};
pub use tasks::{Task, TaskDraft, TaskFilter, TaskStatus};
pub use updates::{UpdatePost, UpdatePostDraft};
