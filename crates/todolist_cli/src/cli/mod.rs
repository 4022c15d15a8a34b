use clap::{Parser, Subcommand, ValueEnum};
use todolist_core::store::Direction;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new todo
    ///
    /// Example: todolist add "Buy milk" --priority 2 --due 2026-09-01
    Add {
        title: String,
        /// Priority from 1 (most urgent) to 5
        #[arg(long)]
        priority: Option<u8>,
        /// Due date in YYYY-MM-DD format
        #[arg(long)]
        due: Option<String>,
    },
    /// List todos, most urgent first
    ///
    /// Example: todolist list
    /// Example: todolist list --by-order
    List {
        /// Sort by manual order instead of priority
        #[arg(long)]
        by_order: bool,
        /// Show todos in raw insertion order
        #[arg(long, conflicts_with = "by_order")]
        all: bool,
    },
    /// List todos that are due today or earlier
    ///
    /// Example: todolist overdue
    Overdue,
    /// Edit a todo's title, priority, or due date
    ///
    /// Example: todolist edit todo-1 --title "Buy oat milk"
    /// Example: todolist edit todo-1 --clear-due
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<u8>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Remove a todo
    ///
    /// Example: todolist remove todo-1
    Remove {
        id: String,
    },
    /// Toggle a todo's completed flag
    ///
    /// Example: todolist done todo-1
    Done {
        id: String,
    },
    /// Move a todo up or down in manual order
    ///
    /// Example: todolist move todo-1 up
    Move {
        id: String,
        direction: MoveDirection,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}
