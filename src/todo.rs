//! Todo list collaborators of the router: the record type, pure list helpers,
//! and the [`TodoApp`] host component.
//!
//! The helpers never mutate their input; they return new lists.

use serde::{Deserialize, Serialize};

use crate::Route;

mod app;

pub use app::*;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl Todo {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_complete: false,
        }
    }
}

pub fn add_todo(list: &[Todo], todo: Todo) -> Vec<Todo> {
    let mut list = list.to_vec();
    list.push(todo);
    list
}

pub fn find_by_id(id: u32, list: &[Todo]) -> Option<&Todo> {
    list.iter().find(|t| t.id == id)
}

pub fn toggle_todo(todo: &Todo) -> Todo {
    Todo {
        is_complete: !todo.is_complete,
        ..todo.clone()
    }
}

/// Replaces the todo with the same id as `updated`, keeping its position.
pub fn update_todo(list: &[Todo], updated: Todo) -> Vec<Todo> {
    list.iter()
        .map(|t| {
            if t.id == updated.id {
                updated.clone()
            } else {
                t.clone()
            }
        })
        .collect()
}

pub fn remove_todo(list: &[Todo], id: u32) -> Vec<Todo> {
    list.iter().filter(|t| t.id != id).cloned().collect()
}

/// Todos visible on `route`: `/active` shows incomplete ones, `/complete`
/// completed ones, and every other route shows all.
pub fn filter_todos(list: &[Todo], route: &Route) -> Vec<Todo> {
    match route.as_str() {
        "/active" => list.iter().filter(|t| !t.is_complete).cloned().collect(),
        "/complete" => list.iter().filter(|t| t.is_complete).cloned().collect(),
        _ => list.to_vec(),
    }
}

/// Id for a new todo: one more than the largest id in `list`.
pub fn next_id(list: &[Todo]) -> u32 {
    list.iter().map(|t| t.id).max().map_or(1, |id| id + 1)
}
