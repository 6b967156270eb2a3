//! Local view state and its reconciliation rules.
//!
//! Every mutation here corresponds to a remote operation that has already
//! succeeded; the store itself never talks to the network. Ids are trusted to
//! be unique, but when they are not, updates and removals apply to every
//! record carrying the id.

use crate::types::{Todo, TodoId};

/// Ordered todo list plus the pending new-todo input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
    loaded: bool,
    draft: String,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// True once a full-list fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// First record with `id`.
    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Discard the local list and take the server's, in received order.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.loaded = true;
    }

    /// Append a freshly created record and clear the input.
    pub fn apply_created(&mut self, todo: Todo) {
        self.todos.push(todo);
        self.draft.clear();
    }

    /// Returns how many records matched.
    pub fn apply_completed(&mut self, id: &TodoId, completed: bool) -> usize {
        let mut matched = 0;
        for todo in self.todos.iter_mut().filter(|todo| &todo.id == id) {
            todo.completed = completed;
            matched += 1;
        }
        matched
    }

    /// Returns how many records were removed.
    pub fn apply_removed(&mut self, id: &TodoId) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| &todo.id != id);
        before - self.todos.len()
    }
}
