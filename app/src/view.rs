//! Plain-text rendering of a `TodoStore`.

use todo_sync::{Todo, TodoStore};

pub fn render(store: &TodoStore) -> String {
    let mut out = String::from("Todo App\n");
    if !store.draft().is_empty() {
        out.push_str(&format!("new todo: {}\n", store.draft()));
    }
    if !store.is_loaded() {
        out.push_str("  (not loaded; try `reload`)\n");
    } else if store.is_empty() {
        out.push_str("  (no todos)\n");
    }
    for (row, todo) in store.todos().iter().enumerate() {
        out.push_str(&render_row(row + 1, todo));
        out.push('\n');
    }
    out
}

fn render_row(row: usize, todo: &Todo) -> String {
    let (mark, action) = if todo.completed {
        ("x", "Mark Incomplete")
    } else {
        (" ", "Mark Complete")
    };
    format!("{row:>3}. [{mark}] {}  (id {})  [{action}] [Delete]", todo.title, todo.id)
}
