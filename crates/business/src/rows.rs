//! Display rows: records joined with the names their foreign ids point to.

use std::collections::BTreeMap;

use serde::Serialize;

use infoco_auth::CredentialRecord;
use infoco_core::Record;
use infoco_records::{resolve_name, resolve_with, NOT_AVAILABLE, UNKNOWN};

use crate::assets::Asset;
use crate::employees::Employee;
use crate::expenses::{EmployeeExpense, InternalExpense, Supplier};
use crate::finance::{Municipality, Transaction};
use crate::hr::{LeaveRequest, PayrollRecord};
use crate::tasks::Task;
use crate::updates::UpdatePost;

/// Collections that foreign ids can point into.
#[derive(Debug, Clone, Copy, Default)]
pub struct Directory<'a> {
    pub employees: &'a [Employee],
    pub suppliers: &'a [Supplier],
    pub accounts: &'a [CredentialRecord],
    pub municipalities: &'a [Municipality],
}

impl<'a> Directory<'a> {
    pub fn employee(&self, id: infoco_core::RecordId) -> &'a str {
        resolve_name(self.employees, Some(id), UNKNOWN)
    }
}

/// A record whose display needs names from other collections.
pub trait Resolve: Record {
    /// `(column, name)` pairs; dangling ids resolve to a sentinel.
    fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Row<'a, T: Serialize> {
    #[serde(flatten)]
    pub record: &'a T,
    #[serde(flatten)]
    pub refs: BTreeMap<&'static str, &'a str>,
}

pub fn rows<'a, T: Resolve>(records: &'a [T], dir: &Directory<'a>) -> Vec<Row<'a, T>> {
    records
        .iter()
        .map(|record| Row {
            record,
            refs: record.resolve(dir).into_iter().collect(),
        })
        .collect()
}

macro_rules! resolves_employee {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Resolve for $ty {
                fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)> {
                    vec![("employeeName", dir.employee(self.employee_id))]
                }
            }
        )+
    };
}

resolves_employee!(Task, EmployeeExpense, PayrollRecord, LeaveRequest);

impl Resolve for InternalExpense {
    fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)> {
        vec![("supplierName", resolve_name(dir.suppliers, self.supplier_id, NOT_AVAILABLE))]
    }
}

impl Resolve for Asset {
    fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)> {
        let name = match self.assigned_to_employee_id {
            Some(id) => dir.employee(id),
            None => NOT_AVAILABLE,
        };
        vec![("assignedToName", name)]
    }
}

impl Resolve for Transaction {
    fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)> {
        vec![("municipalityName", resolve_name(dir.municipalities, self.municipality_id, NOT_AVAILABLE))]
    }
}

impl Resolve for UpdatePost {
    fn resolve<'a>(&'a self, dir: &Directory<'a>) -> Vec<(&'static str, &'a str)> {
        let author = resolve_with(
            dir.accounts,
            Some(self.author_id),
            |a: &'a CredentialRecord| a.display_name.as_str(),
            UNKNOWN,
        );
        vec![("authorName", author)]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use infoco_core::RecordId;

    use super::*;
    use crate::tasks::TaskStatus;

    fn task(employee: u64) -> Task {
        Task {
            id: RecordId::new(employee),
            employee_id: RecordId::new(employee),
            title: "Relatório".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            hours: 2.0,
            status: TaskStatus::Pending,
        }
    }

    #[test]
    fn task_rows_carry_the_employee_name_or_the_unknown_sentinel() {
        let employees = vec![Employee {
            id: RecordId::new(1),
            name: "Ana Costa".into(),
            position: "Analista".into(),
            department: "Financeiro".into(),
            email: "ana@infoco.com".into(),
            base_salary: None,
        }];
        let dir = Directory {
            employees: &employees,
            ..Default::default()
        };
        let tasks = vec![task(1), task(42)];

        let json = serde_json::to_value(rows(&tasks, &dir)).unwrap();
        assert_eq!(json[0]["employeeName"], "Ana Costa");
        assert_eq!(json[0]["title"], "Relatório");
        assert_eq!(json[1]["employeeName"], "Desconhecido");
    }

    #[test]
    fn absent_supplier_reads_not_available() {
        let expense = InternalExpense {
            id: RecordId::new(1),
            description: "Papel".into(),
            category: crate::expenses::InternalExpenseCategory::OfficeSupplies,
            amount: 10.0,
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            supplier_id: None,
        };
        let refs = expense.resolve(&Directory::default());
        assert_eq!(refs, vec![("supplierName", "N/D")]);
    }
}
