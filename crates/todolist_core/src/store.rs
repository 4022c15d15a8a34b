use crate::error::StoreError;
use crate::model::{DEFAULT_PRIORITY, PRIORITY_MAX, PRIORITY_MIN, Todo};
use crate::storage::{JsonStore, StorageSlot, store_path};
use log::{debug, warn};
use std::cmp::Ordering;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Partial update for [`TodoStore::update`]. Absent fields are left
/// untouched; `due_date: Some(None)` clears the due date.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub priority: Option<u8>,
    pub due_date: Option<Option<String>>,
}

/// The authoritative in-memory todo sequence plus its storage slot.
///
/// Every successful mutation writes the full sequence back to the slot. A
/// failed write is logged and swallowed; the in-memory mutation stands.
/// Derived views recompute from current state on every call.
pub struct TodoStore {
    todos: Vec<Todo>,
    slot: Box<dyn StorageSlot>,
}

impl TodoStore {
    /// Rehydrates from the slot. An unreadable or malformed slot is treated
    /// as "no data" and the store starts empty.
    pub fn new(slot: Box<dyn StorageSlot>) -> Self {
        let todos = match slot.load() {
            Ok(todos) => {
                debug!("rehydrated {} todos from slot", todos.len());
                todos
            }
            Err(err) => {
                warn!("slot unreadable, starting empty: {err}");
                Vec::new()
            }
        };

        Self { todos, slot }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        let path = store_path()?;
        Ok(Self::new(Box::new(JsonStore::new(path))))
    }

    /// Live records in insertion order. The store is the sole mutator.
    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    /// Ascending by priority (lower number = more urgent), ties broken by
    /// creation time then id, so the result is deterministic.
    pub fn sorted_list(&self) -> Vec<Todo> {
        let mut todos = self.todos.clone();
        todos.sort_by(compare_by_priority);
        todos
    }

    /// Ascending by the manual `order` field. This is the sequence
    /// [`TodoStore::reorder`] moves records within.
    pub fn ordered_list(&self) -> Vec<Todo> {
        self.indices_by_order()
            .into_iter()
            .map(|index| self.todos[index].clone())
            .collect()
    }

    /// Records due today or earlier (date-only comparison) that are not yet
    /// completed, in insertion order.
    pub fn past_due_list(&self) -> Vec<Todo> {
        let today = local_today();
        self.todos
            .iter()
            .filter(|todo| is_past_due_on(todo, today))
            .cloned()
            .collect()
    }

    pub fn add(
        &mut self,
        title: &str,
        priority: Option<u8>,
        due_date: Option<&str>,
    ) -> Result<Todo, StoreError> {
        let title = validate_title(title)?;
        let priority = match priority {
            Some(value) => validate_priority(value)?,
            None => DEFAULT_PRIORITY,
        };
        let due_date = match due_date {
            Some(value) => Some(validate_due_date(value)?),
            None => None,
        };

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| StoreError::storage(err.to_string()))?;
        let order = self.todos.iter().map(|todo| todo.order + 1).max().unwrap_or(0);

        let todo = Todo {
            id: self.next_id(),
            title,
            priority,
            order,
            due_date,
            completed: false,
            created_at,
        };

        self.todos.push(todo.clone());
        self.persist();
        Ok(todo)
    }

    pub fn update(&mut self, id: &str, patch: TodoPatch) -> Result<Todo, StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::validation("id is required"));
        }

        let index = self.position_of(trimmed_id)?;

        // Validate the whole patch before touching the record.
        let title = patch.title.as_deref().map(validate_title).transpose()?;
        let priority = patch.priority.map(validate_priority).transpose()?;
        let due_date = match patch.due_date {
            Some(Some(value)) => Some(Some(validate_due_date(&value)?)),
            Some(None) => Some(None),
            None => None,
        };

        let todo = &mut self.todos[index];
        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(priority) = priority {
            todo.priority = priority;
        }
        if let Some(due_date) = due_date {
            todo.due_date = due_date;
        }

        let updated = todo.clone();
        self.persist();
        Ok(updated)
    }

    /// Removes the record and renumbers the remaining `order` values to a
    /// dense 0-based sequence preserving relative order.
    pub fn remove(&mut self, id: &str) -> Result<Todo, StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::validation("id is required"));
        }

        let index = self.position_of(trimmed_id)?;
        let removed = self.todos.remove(index);
        self.renumber();
        self.persist();
        Ok(removed)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Todo, StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::validation("id is required"));
        }

        let index = self.position_of(trimmed_id)?;
        let todo = &mut self.todos[index];
        todo.completed = !todo.completed;

        let updated = todo.clone();
        self.persist();
        Ok(updated)
    }

    /// Swaps the record's `order` with its neighbor in the order-sorted
    /// sequence. Moving the first record up or the last record down is a
    /// no-op and nothing is persisted.
    pub fn reorder(&mut self, id: &str, direction: Direction) -> Result<Todo, StoreError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(StoreError::validation("id is required"));
        }

        let ordered = self.indices_by_order();
        let position = ordered
            .iter()
            .position(|&index| self.todos[index].id == trimmed_id)
            .ok_or_else(|| StoreError::not_found(format!("no todo with id {trimmed_id}")))?;

        let target = match direction {
            Direction::Up if position == 0 => return Ok(self.todos[ordered[position]].clone()),
            Direction::Down if position + 1 == ordered.len() => {
                return Ok(self.todos[ordered[position]].clone());
            }
            Direction::Up => position - 1,
            Direction::Down => position + 1,
        };

        let current = ordered[position];
        let adjacent = ordered[target];
        let swapped = self.todos[current].order;
        self.todos[current].order = self.todos[adjacent].order;
        self.todos[adjacent].order = swapped;

        let moved = self.todos[current].clone();
        self.persist();
        Ok(moved)
    }

    fn position_of(&self, id: &str) -> Result<usize, StoreError> {
        self.todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| StoreError::not_found(format!("no todo with id {id}")))
    }

    fn indices_by_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.todos.len()).collect();
        indices.sort_by(|&a, &b| {
            self.todos[a]
                .order
                .cmp(&self.todos[b].order)
                .then_with(|| self.todos[a].id.cmp(&self.todos[b].id))
        });
        indices
    }

    fn renumber(&mut self) {
        for (position, index) in self.indices_by_order().into_iter().enumerate() {
            self.todos[index].order = position as u32;
        }
    }

    fn next_id(&self) -> String {
        let mut id = format!("todo-{}", OffsetDateTime::now_utc().unix_timestamp_nanos());
        while self.todos.iter().any(|todo| todo.id == id) {
            id = format!("todo-{}", OffsetDateTime::now_utc().unix_timestamp_nanos());
        }
        id
    }

    fn persist(&self) {
        if let Err(err) = self.slot.save(&self.todos) {
            warn!("failed to persist todo list: {err}");
        }
    }
}

/// Date-only comparison against today's local calendar day. Completed todos
/// are never past due.
pub fn is_past_due(todo: &Todo) -> bool {
    is_past_due_on(todo, local_today())
}

fn is_past_due_on(todo: &Todo, today: Date) -> bool {
    if todo.completed {
        return false;
    }

    match todo.due_date.as_deref() {
        Some(value) => match Date::parse(value, DUE_DATE_FORMAT) {
            Ok(due) => due <= today,
            Err(_) => false,
        },
        None => false,
    }
}

fn local_today() -> Date {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset).date()
}

fn compare_by_priority(a: &Todo, b: &Todo) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| created_at_key(a).cmp(&created_at_key(b)))
        .then_with(|| a.id.cmp(&b.id))
}

fn created_at_key(todo: &Todo) -> OffsetDateTime {
    OffsetDateTime::parse(&todo.created_at, &Rfc3339).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn validate_title(title: &str) -> Result<String, StoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation("title is required"));
    }
    Ok(trimmed.to_string())
}

fn validate_priority(priority: u8) -> Result<u8, StoreError> {
    if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
        return Err(StoreError::validation(format!(
            "priority must be between {PRIORITY_MIN} and {PRIORITY_MAX}"
        )));
    }
    Ok(priority)
}

fn validate_due_date(value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    Date::parse(trimmed, DUE_DATE_FORMAT)
        .map_err(|_| StoreError::validation("due date must be YYYY-MM-DD"))?;
    Ok(trimmed.to_string())
}
