//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the remote collection's schema but are defined
//! independently of the mock-server crate. Integration tests catch any schema
//! drift between the two.
//!
//! The server owns identifiers. `TodoId` accepts either a JSON integer or a
//! JSON string and never interprets it beyond equality and URL formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo, opaque to the client.
///
/// Numeric ids keep the server's JSON number as-is, so values outside `i64`
/// still round-trip. A numeric id never equals a string id with the same
/// digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Num(serde_json::Number),
    Str(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Num(n) => write!(f, "{n}"),
            TodoId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        TodoId::Num(id.into())
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        TodoId::Str(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        TodoId::Str(id)
    }
}

/// A single todo item returned by the API. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    /// A fresh, not yet completed todo.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_integers_and_strings() {
        let int: TodoId = serde_json::from_str("7").unwrap();
        let string: TodoId = serde_json::from_str(r#""abc-7""#).unwrap();
        assert_eq!(int, TodoId::from(7));
        assert_eq!(string, TodoId::Str("abc-7".to_string()));
    }

    #[test]
    fn ids_beyond_i64_survive_a_list_decode() {
        let todos: Vec<Todo> =
            serde_json::from_str(r#"[{"id":18446744073709551615,"title":"big"},{"id":1,"title":"small"}]"#).unwrap();
        assert_eq!(todos[0].id.to_string(), "18446744073709551615");
        assert_eq!(todos[1].id, TodoId::from(1));
        assert_eq!(serde_json::to_string(&todos[0].id).unwrap(), "18446744073709551615");
    }

    #[test]
    fn integer_and_string_ids_never_compare_equal() {
        assert_ne!(TodoId::from(1), TodoId::from("1"));
    }

    #[test]
    fn id_displays_without_quotes() {
        assert_eq!(TodoId::from(42).to_string(), "42");
        assert_eq!(TodoId::from("x9").to_string(), "x9");
    }

    #[test]
    fn todo_ignores_unknown_fields_and_defaults_completed() {
        let todo: Todo = serde_json::from_str(r#"{"userId":1,"id":3,"title":"Feed cat"}"#).unwrap();
        assert_eq!(todo.id, TodoId::from(3));
        assert_eq!(todo.title, "Feed cat");
        assert!(!todo.completed);
    }

    #[test]
    fn completed_only_update_omits_title() {
        let body = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }
}
