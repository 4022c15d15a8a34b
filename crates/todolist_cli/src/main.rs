use clap::Parser;
use tabled::{Table, Tabled};
use todolist_cli::cli::{Cli, Command};
use todolist_core::error::StoreError;
use todolist_core::model::Todo;
use todolist_core::store::{TodoPatch, TodoStore, is_past_due};

fn status_label(todo: &Todo) -> &'static str {
    if todo.completed {
        "completed"
    } else if is_past_due(todo) {
        "overdue"
    } else {
        "pending"
    }
}

#[derive(Tabled)]
struct TodoRow {
    id: String,
    title: String,
    priority: u8,
    due: String,
    status: String,
}

fn todo_row(todo: &Todo) -> TodoRow {
    TodoRow {
        id: todo.id.clone(),
        title: todo.title.clone(),
        priority: todo.priority,
        due: todo.due_date.clone().unwrap_or_else(|| "-".to_string()),
        status: status_label(todo).to_string(),
    }
}

fn print_todos_plain(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos");
        return;
    }

    let rows: Vec<TodoRow> = todos.iter().map(todo_row).collect();
    println!("{}", Table::new(rows));
}

fn todo_json(todo: &Todo) -> serde_json::Value {
    serde_json::json!({
        "id": todo.id,
        "title": todo.title,
        "priority": todo.priority,
        "order": todo.order,
        "dueDate": todo.due_date,
        "completed": todo.completed,
        "createdAt": todo.created_at,
        "status": status_label(todo),
    })
}

fn print_todo_json(todo: &Todo) {
    println!("{}", todo_json(todo));
}

fn print_todos_json(todos: &[Todo]) {
    let payload: Vec<serde_json::Value> = todos.iter().map(todo_json).collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn run_command(cli: Cli) -> Result<(), StoreError> {
    let mut store = TodoStore::open_default()?;

    match cli.command {
        Command::Add {
            title,
            priority,
            due,
        } => {
            let todo = store.add(&title, priority, due.as_deref())?;
            if cli.json {
                print_todo_json(&todo);
            } else {
                println!("Added todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::List { by_order, all } => {
            let todos = if all {
                store.list().to_vec()
            } else if by_order {
                store.ordered_list()
            } else {
                store.sorted_list()
            };

            if cli.json {
                print_todos_json(&todos);
            } else {
                print_todos_plain(&todos);
            }
        }
        Command::Overdue => {
            let todos = store.past_due_list();
            if cli.json {
                print_todos_json(&todos);
            } else {
                print_todos_plain(&todos);
            }
        }
        Command::Edit {
            id,
            title,
            priority,
            due,
            clear_due,
        } => {
            if title.is_none() && priority.is_none() && due.is_none() && !clear_due {
                return Err(StoreError::validation("nothing to edit"));
            }

            let due_date = if clear_due { Some(None) } else { due.map(Some) };
            let patch = TodoPatch {
                title,
                priority,
                due_date,
            };

            let todo = store.update(&id, patch)?;
            if cli.json {
                print_todo_json(&todo);
            } else {
                println!("Updated todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Remove { id } => {
            let todo = store.remove(&id)?;
            if cli.json {
                print_todo_json(&todo);
            } else {
                println!("Removed todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Done { id } => {
            let todo = store.toggle_complete(&id)?;
            if cli.json {
                print_todo_json(&todo);
            } else if todo.completed {
                println!("Completed todo: {} ({})", todo.title, todo.id);
            } else {
                println!("Reopened todo: {} ({})", todo.title, todo.id);
            }
        }
        Command::Move { id, direction } => {
            let todo = store.reorder(&id, direction.into())?;
            if cli.json {
                print_todo_json(&todo);
            } else {
                println!("Moved todo: {} ({})", todo.title, todo.id);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
