use serde::{Deserialize, Serialize};

/// Lowest allowed priority value; `1` is the most urgent.
pub const PRIORITY_MIN: u8 = 1;
pub const PRIORITY_MAX: u8 = 5;
pub const DEFAULT_PRIORITY: u8 = 3;

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// One persisted todo record.
///
/// Field names serialize as camelCase so the stored payload stays a plain
/// JSON array of `{id, title, priority, order, dueDate, completed,
/// createdAt}` objects. `priority`, `order`, and `completed` default when
/// absent so payloads written before those fields existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}
