use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use infoco_core::{Collection, DomainError, DomainResult, RecordId, RecordRules};

use crate::period::today;

labelled_enum! {
    pub enum TaskStatus {
        Completed => "Concluída",
        InProgress => "Em Andamento",
        Pending => "Pendente",
    }
}

infoco_core::record! {
    /// Unit of work logged against an employee.
    pub struct Task / TaskDraft in Collection::Tasks {
        req employee_id: RecordId,
        req title: String,
        req description: String,
        req date: NaiveDate,
        req hours: f64,
        req status: TaskStatus,
    }
    defaults { date: Some(today()), status: Some(TaskStatus::Pending) }
}

impl RecordRules for Task {
    fn validate(&self) -> DomainResult<()> {
        if self.hours < 0.0 {
            return Err(DomainError::invalid_field("hours"));
        }
        Ok(())
    }
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Task list filter; empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    pub employee_id: Option<RecordId>,
    pub status: Option<TaskStatus>,
    pub date: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.employee_id.is_none_or(|id| task.employee_id == id)
            && self.status.is_none_or(|s| task.status == s)
            && self.date.is_none_or(|d| task.date == d)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::Record;

    use super::*;

    fn task(id: u64, employee: u64, status: TaskStatus, date: &str) -> Task {
        Task {
            id: RecordId::new(id),
            employee_id: RecordId::new(employee),
            title: format!("t{id}"),
            description: String::new(),
            date: date.parse().unwrap(),
            hours: 1.0,
            status,
        }
    }

    #[test]
    fn new_drafts_are_pending_and_dated_today() {
        let d = Task::new_draft();
        assert_eq!(d.status, Some(TaskStatus::Pending));
        assert_eq!(d.date, Some(today()));
        assert_eq!(d.employee_id, None);
    }

    #[test]
    fn status_uses_portuguese_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"Em Andamento\""
        );
    }

    #[test]
    fn filters_combine_with_and() {
        let tasks = vec![
            task(1, 1, TaskStatus::Completed, "2025-07-08"),
            task(2, 2, TaskStatus::InProgress, "2025-07-09"),
            task(3, 1, TaskStatus::Pending, "2025-07-09"),
        ];

        let all = TaskFilter::default().apply(&tasks);
        assert_eq!(all.len(), 3);

        let f = TaskFilter {
            employee_id: Some(RecordId::new(1)),
            date: Some("2025-07-09".parse().unwrap()),
            ..Default::default()
        };
        let hits: Vec<_> = f.apply(&tasks).iter().map(|t| t.id.get()).collect();
        assert_eq!(hits, vec![3]);
    }
}
