use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const COLUMNS: [&str; 3] = ["NOMBRE DEL PROYECTO", "FECHA LIMITE", "ESTADO"];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "COMPLETADA")]
    Completed,
    #[serde(rename = "EN PROGRESO")]
    InProgress,
    #[serde(rename = "PENDIENTE")]
    Pending,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Completed => "COMPLETADA",
            TaskStatus::InProgress => "EN PROGRESO",
            TaskStatus::Pending => "PENDIENTE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub project: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl TaskRow {
    /// Cells in column order, ready for the table.
    pub fn cells(&self) -> [String; 3] {
        [
            self.project.clone(),
            self.due_date.format("%Y-%m-%d").to_string(),
            self.status.to_string(),
        ]
    }
}

/// Source of the rows shown in the tasks panel.
pub trait TaskProvider {
    fn list_tasks(&self) -> Vec<TaskRow>;
}

/// The three fixed rows the tasks panel ships with.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoTasks;

impl TaskProvider for DemoTasks {
    fn list_tasks(&self) -> Vec<TaskRow> {
        [
            ("PROYECTO 1", (2024, 11, 4), TaskStatus::Completed),
            ("PROYECTO 2", (2024, 12, 1), TaskStatus::InProgress),
            ("PROYECTO 3", (2025, 1, 10), TaskStatus::Pending),
        ]
        .into_iter()
        .filter_map(|(project, (y, m, d), status)| {
            Some(TaskRow {
                project: project.to_string(),
                due_date: NaiveDate::from_ymd_opt(y, m, d)?,
                status,
            })
        })
        .collect()
    }
}
