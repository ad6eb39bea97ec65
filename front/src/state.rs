use evo_api::v1::{Todo, TodoId};

use crate::notice::SuccessNotice;

pub const ADDED: &str = "Task Added Successfully in Todo List";
pub const UPDATED: &str = "Task Updated Successfully in Todo List";
pub const MARKED_COMPLETE: &str = "Task Marked as Complete Successfully";
pub const MARKED_INCOMPLETE: &str = "Task Marked as Incomplete Successfully";
pub const DELETED: &str = "Task Deleted Successfully from Todo List";

/// Which dashboard panels are open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub view_mode: bool,
    pub show_add_form: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            view_mode: false,
            show_add_form: false,
        }
    }
}

/// The visible collection and the transient flags around it.
///
/// Transitions are applied only after the server confirmed the change, so a
/// failed request never reaches this type.
#[derive(Debug, Default)]
pub struct TodoListState {
    todos: Vec<Todo>,
    view: ViewState,
    notice: SuccessNotice,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.text()
    }

    pub fn load(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.view.loading = false;
    }

    pub fn finish_loading(&mut self) {
        self.view.loading = false;
    }

    pub fn set_view_mode(&mut self, view_mode: bool) {
        self.view.view_mode = view_mode;
    }

    pub fn set_show_add_form(&mut self, visible: bool) {
        self.view.show_add_form = visible;
    }

    pub fn add(&mut self, todo: Todo) {
        self.todos.push(todo);
        self.settle(ADDED);
    }

    pub fn replace(&mut self, id: TodoId, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == id) {
            *slot = todo;
        }

        self.settle(UPDATED);
    }

    pub fn toggle(&mut self, id: TodoId, completed: bool) {
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            todo.completed = completed;
        }

        self.settle(match completed {
            true => MARKED_COMPLETE,
            false => MARKED_INCOMPLETE,
        });
    }

    pub fn remove(&mut self, id: TodoId) {
        self.todos.retain(|todo| todo.id != id);
        self.settle(DELETED);
    }

    fn settle(&mut self, notice: &str) {
        self.view.view_mode = false;
        self.view.show_add_form = false;
        self.notice.show(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: TodoId, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: None,
            due_date: None,
            completed: false,
        }
    }

    fn loaded(todos: Vec<Todo>) -> TodoListState {
        let mut state = TodoListState::new();
        state.load(todos);
        state
    }

    #[test]
    fn starts_loading_until_loaded() {
        let mut state = TodoListState::new();
        assert!(state.view().loading);

        state.load(vec![todo(1, "A")]);
        assert!(!state.view().loading);
        assert_eq!(state.todos().len(), 1);
    }

    #[test]
    fn add_appends_and_hides_the_form() {
        let mut state = loaded(vec![todo(1, "A")]);
        state.set_show_add_form(true);
        state.set_view_mode(true);

        state.add(todo(2, "B"));

        let ids: Vec<_> = state.todos().iter().map(|todo| todo.id).collect();
        assert_eq!(ids, [1, 2]);
        assert!(!state.view().show_add_form);
        assert!(!state.view().view_mode);
        assert_eq!(state.notice().as_deref(), Some(ADDED));
    }

    #[test]
    fn replace_substitutes_by_id() {
        let mut state = loaded(vec![todo(1, "A"), todo(2, "B")]);

        state.replace(2, todo(2, "B2"));

        assert_eq!(state.todos()[0].title, "A");
        assert_eq!(state.todos()[1].title, "B2");
        assert_eq!(state.notice().as_deref(), Some(UPDATED));
    }

    #[test]
    fn toggle_touches_only_completed() {
        let mut state = loaded(vec![todo(1, "A")]);

        state.toggle(1, true);
        assert_eq!(state.todos(), [Todo { completed: true, ..todo(1, "A") }]);
        assert_eq!(state.notice().as_deref(), Some(MARKED_COMPLETE));

        state.toggle(1, false);
        assert!(!state.todos()[0].completed);
        assert_eq!(state.notice().as_deref(), Some(MARKED_INCOMPLETE));
    }

    #[test]
    fn remove_keeps_the_rest_in_order() {
        let mut state = loaded(vec![todo(1, "A"), todo(2, "B"), todo(3, "C")]);

        state.remove(2);

        let ids: Vec<_> = state.todos().iter().map(|todo| todo.id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(state.notice().as_deref(), Some(DELETED));
    }

    #[test]
    fn unknown_id_leaves_the_collection_alone() {
        let mut state = loaded(vec![todo(1, "A")]);

        state.remove(7);
        state.toggle(7, true);

        assert_eq!(state.todos(), [todo(1, "A")]);
    }
}
