//! Read-only aggregates: dashboard counters and the productivity report.

use core::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use infoco_core::RecordId;

use crate::employees::Employee;
use crate::finance::Municipality;
use crate::period::today;
use crate::tasks::Task;

/// Counters on the dashboard home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub employees: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
}

impl DashboardStats {
    pub fn compute(employees: &[Employee], tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            employees: employees.len(),
            total_tasks: tasks.len(),
            completed_tasks: completed,
            pending_tasks: tasks.len() - completed,
        }
    }
}

/// Contract end dates for the dashboard calendar, soonest first.
pub fn contract_deadlines(municipalities: &[Municipality]) -> Vec<(NaiveDate, &str)> {
    let mut deadlines: Vec<_> = municipalities
        .iter()
        .map(|m| (m.contract_end_date, m.municipality.as_str()))
        .collect();
    deadlines.sort();
    deadlines
}

/// Report window: the last `n` days, or everything.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReportPeriod {
    Days(u32),
    All,
}

impl Default for ReportPeriod {
    fn default() -> Self {
        ReportPeriod::Days(30)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected a number of days or 'all', got '{0}'")]
pub struct InvalidPeriod(pub String);

impl FromStr for ReportPeriod {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(ReportPeriod::All),
            days => days
                .parse()
                .map(ReportPeriod::Days)
                .map_err(|_| InvalidPeriod(s.to_string())),
        }
    }
}

impl core::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportPeriod::Days(n) => write!(f, "{n}"),
            ReportPeriod::All => f.write_str("all"),
        }
    }
}

impl Serialize for ReportPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReportPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl ReportPeriod {
    /// Earliest task date included when the report is run on `as_of`.
    pub fn cutoff(self, as_of: NaiveDate) -> Option<NaiveDate> {
        match self {
            ReportPeriod::Days(n) => as_of.checked_sub_signed(Duration::days(i64::from(n))),
            ReportPeriod::All => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    pub period: ReportPeriod,
    /// Empty means every department.
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReport {
    pub employee_id: RecordId,
    pub name: String,
    pub total_hours: f64,
    pub completed_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub filter: ReportFilter,
    pub total_hours: f64,
    /// Whole percent of tasks completed; 0 when no task matched.
    pub completion_rate: u32,
    pub employee_reports: Vec<EmployeeReport>,
}

impl TaskReport {
    pub fn run(filter: ReportFilter, employees: &[Employee], tasks: &[Task]) -> Self {
        Self::run_as_of(filter, employees, tasks, today())
    }

    pub fn run_as_of(filter: ReportFilter, employees: &[Employee], tasks: &[Task], as_of: NaiveDate) -> Self {
        let department = filter.department.as_deref().filter(|d| !d.trim().is_empty());
        let staff: Vec<&Employee> = employees
            .iter()
            .filter(|e| department.is_none_or(|d| e.department == d))
            .collect();
        let cutoff = filter.period.cutoff(as_of);

        let selected: Vec<&Task> = tasks
            .iter()
            .filter(|t| cutoff.is_none_or(|c| t.date >= c))
            .filter(|t| department.is_none() || staff.iter().any(|e| e.id == t.employee_id))
            .collect();

        let total_hours = selected.iter().map(|t| t.hours).sum();
        let completed = selected.iter().filter(|t| t.is_completed()).count();
        let completion_rate = if selected.is_empty() {
            0
        } else {
            (completed as f64 / selected.len() as f64 * 100.0).round() as u32
        };

        let employee_reports = staff
            .iter()
            .map(|e| {
                let own = selected.iter().filter(|t| t.employee_id == e.id);
                EmployeeReport {
                    employee_id: e.id,
                    name: e.name.clone(),
                    total_hours: own.clone().map(|t| t.hours).sum(),
                    completed_tasks: own.filter(|t| t.is_completed()).count(),
                }
            })
            .filter(|r| r.total_hours > 0.0 || r.completed_tasks > 0)
            .collect();

        Self {
            filter,
            total_hours,
            completion_rate,
            employee_reports,
        }
    }
}
