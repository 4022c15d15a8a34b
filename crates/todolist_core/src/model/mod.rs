mod todo;

pub use todo::{DEFAULT_PRIORITY, PRIORITY_MAX, PRIORITY_MIN, Todo};
