//! Payroll and leave requests.

use chrono::NaiveDate;

use infoco_core::{Collection, DomainError, DomainResult, Draft, RecordId, RecordRules};
use infoco_records::EntityStore;

use crate::employees::Employee;
use crate::period::MonthYear;

const BENEFITS_RATE: f64 = 0.10;
const DEDUCTIONS_RATE: f64 = 0.08;
const PAY_DAY: u32 = 5;

infoco_core::record! {
    /// One employee's pay for one month.
    pub struct PayrollRecord / PayrollRecordDraft in Collection::Payrolls {
        req employee_id: RecordId,
        req month_year: MonthYear,
        req base_salary: f64,
        req benefits: f64,
        req deductions: f64,
        req net_pay: f64,
        req pay_date: NaiveDate,
    }
}

impl RecordRules for PayrollRecord {
    fn validate(&self) -> DomainResult<()> {
        if self.base_salary < 0.0 {
            return Err(DomainError::invalid_field("base_salary"));
        }
        Ok(())
    }
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl PayrollRecordDraft {
    /// Draft computed from a base salary: benefits 10%, deductions 8%,
    /// paid on day 5 of the month.
    pub fn computed(employee_id: RecordId, month_year: MonthYear, base_salary: f64) -> Self {
        let benefits = cents(base_salary * BENEFITS_RATE);
        let deductions = cents(base_salary * DEDUCTIONS_RATE);
        Self {
            id: None,
            employee_id: Some(employee_id),
            month_year: Some(month_year),
            base_salary: Some(base_salary),
            benefits: Some(benefits),
            deductions: Some(deductions),
            net_pay: Some(cents(base_salary + benefits - deductions)),
            pay_date: month_year.day(PAY_DAY),
        }
    }
}

/// Create the missing payroll records of `month`.
///
/// Employees without a base salary, and employees already paid for that
/// month, are skipped. Returns the ids created, in employee order.
pub fn generate_payroll(
    employees: &[Employee],
    payrolls: &mut EntityStore<PayrollRecord>,
    month: MonthYear,
) -> DomainResult<Vec<RecordId>> {
    let mut created = Vec::new();
    for employee in employees {
        let Some(salary) = employee.payable_salary() else {
            continue;
        };
        let paid = payrolls
            .list()
            .iter()
            .any(|p| p.employee_id == employee.id && p.month_year == month);
        if paid {
            continue;
        }
        let draft = PayrollRecordDraft::computed(employee.id, month, salary);
        created.push(payrolls.insert_with(|id| draft.into_record(id))?);
    }
    tracing::info!(month = %month, created = created.len(), "payroll generated");
    Ok(created)
}

labelled_enum! {
    pub enum LeaveType {
        Vacation => "Férias",
        MedicalLeave => "Licença Médica",
        Other => "Outro",
    }
}

labelled_enum! {
    pub enum LeaveStatus {
        Pending => "Pendente",
        Approved => "Aprovada",
        Rejected => "Rejeitada",
    }
}

infoco_core::record! {
    pub struct LeaveRequest / LeaveRequestDraft in Collection::LeaveRequests {
        req employee_id: RecordId,
        req #[serde(rename = "type")] kind: LeaveType,
        req start_date: NaiveDate,
        req end_date: NaiveDate,
        req reason: String,
        req status: LeaveStatus,
    }
    defaults {
        kind: Some(LeaveType::Vacation),
        status: Some(LeaveStatus::Pending)
    }
}

impl RecordRules for LeaveRequest {
    fn validate(&self) -> DomainResult<()> {
        if self.end_date < self.start_date {
            return Err(DomainError::invalid_field("end_date"));
        }
        Ok(())
    }
}

impl LeaveRequest {
    /// Calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
