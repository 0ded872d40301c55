//! Employee reimbursements, internal expenses and the supplier registry.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use infoco_core::{Collection, DomainError, DomainResult, RecordId, RecordRules};
use infoco_records::Named;

use crate::period::{today, MonthYear};

labelled_enum! {
    pub enum ExpenseType {
        Salary => "Salário",
        Voucher => "Vale",
        Travel => "Viagem",
        Reimbursement => "Reembolso",
        Other => "Outro",
    }
}

labelled_enum! {
    pub enum PaymentStatus {
        Paid => "Pago",
        Pending => "Pendente",
    }
}

labelled_enum! {
    pub enum InternalExpenseCategory {
        OfficeSupplies => "Material de Escritório",
        FixedBills => "Contas Fixas",
        Maintenance => "Manutenção",
        Marketing => "Marketing",
        Other => "Outros",
    }
}

infoco_core::record! {
    /// Money paid to (or owed to) an employee.
    pub struct EmployeeExpense / EmployeeExpenseDraft in Collection::EmployeeExpenses {
        req employee_id: RecordId,
        req description: String,
        req #[serde(rename = "type")] kind: ExpenseType,
        req amount: f64,
        req date: NaiveDate,
        req status: PaymentStatus,
        opt receipt: Option<String>,
    }
    defaults {
        kind: Some(ExpenseType::Salary),
        date: Some(today()),
        status: Some(PaymentStatus::Pending)
    }
}

impl RecordRules for EmployeeExpense {
    fn validate(&self) -> DomainResult<()> {
        non_negative("amount", self.amount)
    }
}

infoco_core::record! {
    /// Running cost of the office itself.
    pub struct InternalExpense / InternalExpenseDraft in Collection::InternalExpenses {
        req description: String,
        req category: InternalExpenseCategory,
        req amount: f64,
        req date: NaiveDate,
        opt supplier_id: Option<RecordId>,
    }
    defaults {
        category: Some(InternalExpenseCategory::OfficeSupplies),
        date: Some(today())
    }
}

impl RecordRules for InternalExpense {
    fn validate(&self) -> DomainResult<()> {
        non_negative("amount", self.amount)
    }
}

infoco_core::record! {
    pub struct Supplier / SupplierDraft in Collection::Suppliers {
        req name: String,
        req category: String,
        req contact_person: String,
        req email: String,
        req phone: String,
    }
}

impl RecordRules for Supplier {
    fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
    }

    fn validate(&self) -> DomainResult<()> {
        if !self.email.contains('@') {
            return Err(DomainError::invalid_field("email"));
        }
        Ok(())
    }
}

impl Named for Supplier {
    fn display_name(&self) -> &str {
        &self.name
    }
}

fn non_negative(field: &'static str, value: f64) -> DomainResult<()> {
    if value < 0.0 {
        return Err(DomainError::invalid_field(field));
    }
    Ok(())
}

/// Spending cards on the internal expenses tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalExpenseSummary {
    /// Spent on `as_of`.
    pub today: f64,
    /// Spent in the month of `as_of`.
    pub month: f64,
    /// Everything on record.
    pub total: f64,
    pub by_category: BTreeMap<InternalExpenseCategory, f64>,
}

impl InternalExpenseSummary {
    pub fn compute(expenses: &[InternalExpense], as_of: NaiveDate) -> Self {
        let month = MonthYear::of(as_of);
        let mut summary = Self::default();
        for e in expenses {
            if e.date == as_of {
                summary.today += e.amount;
            }
            if month.contains(e.date) {
                summary.month += e.amount;
            }
            summary.total += e.amount;
            *summary.by_category.entry(e.category).or_default() += e.amount;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::{Draft, Record};

    use super::*;

    fn expense(id: u64, category: InternalExpenseCategory, amount: f64, date: &str) -> InternalExpense {
        InternalExpense {
            id: RecordId::new(id),
            description: "x".into(),
            category,
            amount,
            date: date.parse().unwrap(),
            supplier_id: None,
        }
    }

    #[test]
    fn summary_splits_day_month_and_category() {
        let expenses = vec![
            expense(1, InternalExpenseCategory::FixedBills, 100.0, "2025-07-10"),
            expense(2, InternalExpenseCategory::FixedBills, 40.0, "2025-07-01"),
            expense(3, InternalExpenseCategory::Marketing, 7.5, "2025-06-30"),
        ];
        let s = InternalExpenseSummary::compute(&expenses, "2025-07-10".parse().unwrap());

        assert_eq!(s.today, 100.0);
        assert_eq!(s.month, 140.0);
        assert_eq!(s.total, 147.5);
        assert_eq!(s.by_category[&InternalExpenseCategory::FixedBills], 140.0);
        assert_eq!(s.by_category[&InternalExpenseCategory::Marketing], 7.5);
    }

    #[test]
    fn expense_drafts_default_to_pending_today() {
        let d = EmployeeExpense::new_draft();
        assert_eq!(d.status, Some(PaymentStatus::Pending));
        assert_eq!(d.date, Some(today()));
        assert_eq!(d.missing_fields(), vec!["employee_id", "description", "amount"]);
    }

    #[test]
    fn categories_serialize_as_labels() {
        let json = serde_json::to_string(&InternalExpenseCategory::OfficeSupplies).unwrap();
        assert_eq!(json, "\"Material de Escritório\"");
    }
}
